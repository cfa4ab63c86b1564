use serde::{Deserialize, Serialize};

/// Upper bound of a single DNS character-string on the wire.
pub const MAX_CHARACTER_STRING_BYTES: usize = 255;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TxtConfig {
    /// Nominal byte budget of each character-string in the answer record.
    #[serde(default = "default_max_chunk_bytes")]
    pub max_chunk_bytes: usize,

    #[serde(default)]
    pub ttl: u32,
}

impl Default for TxtConfig {
    fn default() -> Self {
        Self {
            max_chunk_bytes: default_max_chunk_bytes(),
            ttl: 0,
        }
    }
}

fn default_max_chunk_bytes() -> usize {
    crate::txt_chunk::DEFAULT_MAX_CHUNK_BYTES
}
