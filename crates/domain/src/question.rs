//! Turns QNAME labels into an optional access token and a question.
//!
//! Label grammar:
//! - first label `key-<token>`: access token, contributes nothing to the question
//! - `b64-<base64url, padding optional>`: decoded verbatim
//! - anything else: underscores become spaces
//!
//! Decoding never fails; bad UTF-8 is replaced and bad base64 falls back to
//! the literal label text.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use std::sync::Arc;

pub const ACCESS_TOKEN_PREFIX: &str = "key-";
pub const BASE64_PREFIX: &str = "b64-";

const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub access_token: Option<Arc<str>>,
    pub question: Arc<str>,
}

impl ParsedRequest {
    pub fn new(access_token: Option<&str>, question: impl Into<Arc<str>>) -> Self {
        Self {
            access_token: access_token.map(Arc::from),
            question: question.into(),
        }
    }

    pub fn from_labels<L: AsRef<[u8]>>(labels: &[L]) -> Self {
        decode_labels(labels)
    }
}

pub fn decode_labels<L: AsRef<[u8]>>(labels: &[L]) -> ParsedRequest {
    let labels = match labels.split_last() {
        Some((root, rest)) if root.as_ref().is_empty() => rest,
        _ => labels,
    };

    let mut access_token = None;
    let mut rest = labels;
    if let Some((first, tail)) = labels.split_first() {
        if let Some(token) = first.as_ref().strip_prefix(ACCESS_TOKEN_PREFIX.as_bytes()) {
            access_token = Some(Arc::from(String::from_utf8_lossy(token).as_ref()));
            rest = tail;
        }
    }

    let tokens: Vec<String> = rest
        .iter()
        .map(|label| decode_label(label.as_ref()))
        .collect();

    let question = match tokens.as_slice() {
        [single] if single.contains(' ') => single.clone(),
        _ => tokens.join(" "),
    };

    ParsedRequest {
        access_token,
        question: question.into(),
    }
}

fn decode_label(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);

    if let Some(encoded) = text.strip_prefix(BASE64_PREFIX) {
        if let Some(decoded) = decode_base64url(encoded) {
            return decoded;
        }
    }

    text.replace('_', " ")
}

fn decode_base64url(encoded: &str) -> Option<String> {
    let mut padded = String::with_capacity(encoded.len() + 3);
    padded.push_str(encoded);
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = LENIENT_URL_SAFE.decode(padded.as_bytes()).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
