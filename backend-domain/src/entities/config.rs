// Runtime configuration shared across layers

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    /// Embedding/matching service endpoint. None disables the outbound
    /// notification entirely.
    pub matcher_url: Option<String>,
    /// Snapshot file for the document store. None keeps state in memory only.
    pub store_path: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}
