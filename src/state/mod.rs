pub mod touch;

pub use touch::{TouchPoint, TouchState};
