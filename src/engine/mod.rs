pub mod controller;
pub mod state;

pub use controller::FocusEngine;
pub use state::{EngineSnapshot, EngineState};
