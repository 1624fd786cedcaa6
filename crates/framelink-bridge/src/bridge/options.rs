/// Options for constructing a `ComponentBridge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// `targetOrigin` for every outbound post.
    pub target_origin: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            target_origin: "*".to_string(),
        }
    }
}

impl BridgeOptions {
    pub fn with_target_origin(origin: impl Into<String>) -> Self {
        Self {
            target_origin: origin.into(),
        }
    }
}
