use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Closed,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Ready => "ready",
            EngineState::Closed => "closed",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            EngineState::Uninitialized => 0,
            EngineState::Ready => 1,
            EngineState::Closed => 2,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => EngineState::Uninitialized,
            1 => EngineState::Ready,
            _ => EngineState::Closed,
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
