// Service exports
pub mod engine;
pub mod gesture_session;

pub use engine::Engine;
pub use gesture_session::{GestureSession, GestureSessionHandle};
