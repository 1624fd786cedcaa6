pub mod errors;

pub use errors::{ConfigError, FramelinkError, TransportError};

pub type Result<T> = std::result::Result<T, FramelinkError>;
