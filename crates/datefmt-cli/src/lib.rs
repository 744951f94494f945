//! CLI library components for date/time pattern inference.

pub mod inputs;
pub mod logging;
pub mod rows;
