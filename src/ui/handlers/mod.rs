//! Handler modules for keyboard input and tracker actions.

mod input_handler;
mod tracker_handler;

pub use input_handler::InputHandler;
pub use tracker_handler::TrackerHandler;
