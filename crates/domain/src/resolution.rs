use crate::TxtChunkSet;

/// Terminal state of resolving one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// NOERROR with the answer attached as one TXT record.
    Answer(TxtChunkSet),
    /// NOTIMP, the query type is not TXT.
    NotImplemented,
    /// SERVFAIL, access control is on but the server has no secret.
    ServerFailure,
    /// REFUSED, the access token did not match.
    Refused,
}

impl ResolutionOutcome {
    pub fn rcode_name(&self) -> &'static str {
        match self {
            ResolutionOutcome::Answer(_) => "NOERROR",
            ResolutionOutcome::NotImplemented => "NOTIMP",
            ResolutionOutcome::ServerFailure => "SERVFAIL",
            ResolutionOutcome::Refused => "REFUSED",
        }
    }

    pub fn chunks(&self) -> Option<&TxtChunkSet> {
        match self {
            ResolutionOutcome::Answer(chunks) => Some(chunks),
            _ => None,
        }
    }
}
