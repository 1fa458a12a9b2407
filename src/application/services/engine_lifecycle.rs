use std::sync::atomic::{AtomicU8, Ordering};

use crate::domain::EngineState;

/// Lock-free `Uninitialized -> Ready -> Closed` state shared by the engine
/// gateways. `Closed` is terminal.
pub struct EngineLifecycle {
    engine: &'static str,
    state: AtomicU8,
}

impl EngineLifecycle {
    pub fn new(engine: &'static str) -> Self {
        Self {
            engine,
            state: AtomicU8::new(EngineState::Uninitialized.as_u8()),
        }
    }

    pub fn state(&self) -> EngineState {
        EngineState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_ready(&self) -> bool {
        self.state() == EngineState::Ready
    }

    pub fn initialize(&self) -> EngineState {
        match self.state.compare_exchange(
            EngineState::Uninitialized.as_u8(),
            EngineState::Ready.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                tracing::info!(engine = self.engine, "Engine initialized");
                EngineState::Ready
            }
            Err(current) => {
                let state = EngineState::from_u8(current);
                if state == EngineState::Closed {
                    tracing::warn!(engine = self.engine, "Ignoring initialize on a closed engine");
                }
                state
            }
        }
    }

    pub fn close(&self) {
        let previous = EngineState::from_u8(
            self.state
                .swap(EngineState::Closed.as_u8(), Ordering::AcqRel),
        );
        if previous != EngineState::Closed {
            tracing::info!(engine = self.engine, previous = %previous, "Engine closed");
        }
    }
}
