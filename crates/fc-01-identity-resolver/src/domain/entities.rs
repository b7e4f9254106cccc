//! # Identifier Classification and Inbox Location
//!
//! Pure functions: no network access happens here.

use super::errors::{ResolutionError, ResolutionResult};
use shared_crypto::sha3_256;
use shared_types::{vocab, DataAddress, Graph, TypeTag, XorName};

/// Length of a hex-encoded raw wallet key.
pub const RAW_KEY_HEX_LEN: usize = 64;

/// A classified recipient identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecipientIdentifier {
    /// A raw wallet key, normalized to lowercase hex.
    RawKey(String),
    /// A profile-document URI, trimmed.
    ProfileUri(String),
}

impl RecipientIdentifier {
    /// Classify user input.
    ///
    /// Input is trimmed first; an empty result is `EmptyIdentifier`. Exactly
    /// 64 hex characters is a raw key, anything else a profile URI.
    pub fn parse(input: &str) -> ResolutionResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResolutionError::EmptyIdentifier);
        }
        if is_raw_key(trimmed) {
            Ok(Self::RawKey(trimmed.to_ascii_lowercase()))
        } else {
            Ok(Self::ProfileUri(trimmed.to_string()))
        }
    }

    /// Canonical text form, used as the checkpoint key for a recipient.
    pub fn normalized(&self) -> &str {
        match self {
            Self::RawKey(key) => key,
            Self::ProfileUri(uri) => uri,
        }
    }
}

fn is_raw_key(s: &str) -> bool {
    s.len() == RAW_KEY_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Deterministic inbox address of a raw key.
///
/// `name = SHA3-256(key)` where `key` is already normalized.
pub fn raw_key_inbox(normalized_key: &str, inbox_type_tag: TypeTag) -> DataAddress {
    DataAddress::new(XorName::new(sha3_256(normalized_key.as_bytes())), inbox_type_tag)
}

/// Locate the inbox a profile document points at.
///
/// The explicit `ldp:inbox` link wins; otherwise the legacy `xorName` /
/// `typeTag` literal pair is used.
pub fn inbox_from_profile(uri: &str, profile: &Graph) -> ResolutionResult<DataAddress> {
    if let Some(link) = profile.object_of(uri, vocab::LDP_INBOX) {
        return DataAddress::parse_uri(link.value()).map_err(|e| {
            ResolutionError::MalformedInboxLink {
                uri: uri.to_string(),
                reason: e.to_string(),
            }
        });
    }

    let name = profile.object_of(uri, vocab::SAFE_XOR_NAME);
    let tag = profile.object_of(uri, vocab::SAFE_TYPE_TAG);
    match (name, tag) {
        (Some(name), Some(tag)) => {
            let malformed = |reason: String| ResolutionError::MalformedInboxLink {
                uri: uri.to_string(),
                reason,
            };
            let name = XorName::from_hex(name.value().trim()).map_err(|e| malformed(e.to_string()))?;
            let tag = tag
                .value()
                .trim()
                .parse::<TypeTag>()
                .map_err(|e| malformed(e.to_string()))?;
            Ok(DataAddress::new(name, tag))
        }
        _ => Err(ResolutionError::MissingInboxLink {
            uri: uri.to_string(),
        }),
    }
}
