//! Supporting utilities: atomic file writes and progress indication.

pub mod fs;
pub mod progress;
