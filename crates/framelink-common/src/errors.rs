use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures raised by a host transport. These never reach callers of the
/// outbound bridge operations; the bridge logs and drops them.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    #[error("post failed: {0}")]
    Post(String),

    #[error("listener install failed: {0}")]
    Listen(String),

    #[error("encode error: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FramelinkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("frame.fallback_height out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: frame.fallback_height out of range"
        );
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::Unavailable("no parent window".into());
        assert_eq!(err.to_string(), "transport unavailable: no parent window");

        let err = TransportError::Post("DataCloneError".into());
        assert_eq!(err.to_string(), "post failed: DataCloneError");

        let err = TransportError::Listen("no window".into());
        assert_eq!(err.to_string(), "listener install failed: no window");

        let err = TransportError::Encode("NaN height".into());
        assert_eq!(err.to_string(), "encode error: NaN height");
    }

    #[test]
    fn framelink_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: FramelinkError = config_err.into();
        assert!(matches!(err, FramelinkError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn framelink_error_from_transport() {
        let transport_err = TransportError::Post("detached frame".into());
        let err: FramelinkError = transport_err.into();
        assert!(matches!(err, FramelinkError::Transport(_)));
        assert!(err.to_string().contains("detached frame"));
    }

    #[test]
    fn framelink_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: FramelinkError = io_err.into();
        assert!(matches!(err, FramelinkError::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn framelink_error_protocol_display() {
        let err = FramelinkError::Protocol("missing type tag".into());
        assert_eq!(err.to_string(), "protocol error: missing type tag");
    }
}
