use std::fmt;

#[derive(Clone)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    /// Carries the API key in its path, keep it out of logs.
    pub rpc_url: String,
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("chain_id", &self.chain_id)
            .field("name", &self.name)
            .field("rpc_url", &"<redacted>")
            .finish()
    }
}
