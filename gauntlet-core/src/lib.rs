// Core types for the Gauntlet validation engine
// The request/response shapes the engine reads from and renders into, plus logging setup

pub mod error;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use error::*;
pub use http::*;
