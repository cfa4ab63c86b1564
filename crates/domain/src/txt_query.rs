use super::RecordType;
use std::sync::Arc;

/// A question as handed over by the wire layer: the raw QNAME labels in
/// order plus the query type. Label bytes are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtQuery {
    labels: Arc<[Box<[u8]>]>,
    pub record_type: RecordType,
}

impl TxtQuery {
    pub fn new<I, L>(labels: I, record_type: RecordType) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Box<[u8]>>,
    {
        let mut labels: Vec<Box<[u8]>> = labels.into_iter().map(Into::into).collect();
        if labels.last().is_some_and(|label| label.is_empty()) {
            labels.pop();
        }
        Self {
            labels: labels.into(),
            record_type,
        }
    }

    /// Build a query from a dotted name, mostly useful in tests and logs.
    pub fn from_dotted(name: &str, record_type: RecordType) -> Self {
        Self::new(
            name.split('.').map(|label| label.as_bytes().to_vec()),
            record_type,
        )
    }

    pub fn labels(&self) -> &[Box<[u8]>] {
        &self.labels
    }

    pub fn is_txt(&self) -> bool {
        self.record_type.is_txt()
    }
}
