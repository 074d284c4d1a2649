pub mod board;
pub mod drag;
pub mod input;
pub mod pick;

pub use board::{BoardEngine, BoardMutation, LoadReport, SaveSummary};
pub use input::GestureEvent;
