use std::fmt;

/// Where the kiosk backend is deployed.
///
/// Picks the settings overlay and the defaults an overlay does not set:
/// an unattended terminal logs JSON and hides language model labels that
/// are not in the purpose table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Developer machine with a browser kiosk front end.
    #[default]
    Local,
    /// Automated runs against mocked engines.
    Test,
    /// Terminal installed at a service counter.
    Prod,
}

impl Environment {
    pub const VARIABLE: &'static str = "APP_ENVIRONMENT";

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }

    /// Reads [`Environment::VARIABLE`]; unset means a developer machine.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var(Self::VARIABLE) {
            Ok(value) => value.try_into(),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Overlay loaded on top of `appsettings.yaml`, without extension.
    pub fn config_file_name(&self) -> String {
        format!("appsettings.{}", self.as_str())
    }

    pub fn is_counter_terminal(&self) -> bool {
        matches!(self, Environment::Prod)
    }

    /// Default for `logging.enable_json`.
    pub fn json_logs_by_default(&self) -> bool {
        self.is_counter_terminal()
    }

    /// Default for `classifier.reject_unknown_labels`.
    pub fn rejects_unknown_labels_by_default(&self) -> bool {
        self.is_counter_terminal()
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "local" | "dev" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "prod" | "production" | "kiosk" => Ok(Self::Prod),
            other => Err(format!(
                "Invalid {} '{}', expected local, test or prod",
                Self::VARIABLE,
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
