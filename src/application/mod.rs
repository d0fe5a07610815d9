// Application layer: file loading and the error boundary between the
// domain and the CLI.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
