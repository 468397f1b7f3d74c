//! External resource integration
//!
//! This module wraps the audio alert the timer plays at phase boundaries.

pub mod alert;

// Re-export main types
pub use alert::*;
