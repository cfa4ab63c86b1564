use std::ops::Deref;

/// Default per-string budget, well under the 255-byte wire limit.
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 200;

/// Ordered, never-empty list of strings that become the character-strings
/// of one TXT record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtChunkSet(Vec<String>);

impl TxtChunkSet {
    /// Greedily pack whitespace-separated words into chunks of at most
    /// `max_chunk_bytes` bytes. Words are never split, so a single word
    /// longer than the budget becomes its own oversized chunk.
    pub fn pack(text: &str, max_chunk_bytes: usize) -> Self {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;

        for word in text.split_whitespace() {
            let add_len = word.len() + usize::from(!current.is_empty());
            if !current.is_empty() && current_len + add_len > max_chunk_bytes {
                chunks.push(current.join(" "));
                current.clear();
                current_len = 0;
            }
            current_len += word.len() + usize::from(!current.is_empty());
            current.push(word);
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }
        if chunks.is_empty() {
            chunks.push(String::new());
        }

        Self(chunks)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    pub fn total_bytes(&self) -> usize {
        self.0.iter().map(String::len).sum()
    }
}

impl Deref for TxtChunkSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub fn chunk_text(text: &str, max_chunk_bytes: usize) -> TxtChunkSet {
    TxtChunkSet::pack(text, max_chunk_bytes)
}
