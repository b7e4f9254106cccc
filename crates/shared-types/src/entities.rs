//! # Core Entities
//!
//! Addresses, identifiers and descriptors shared across subsystems.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte hash.
pub type Hash = [u8; 32];

/// Numeric record kind classifier attached to every mutable record.
pub type TypeTag = u64;

/// URI scheme used for data addresses and profile documents.
pub const URI_SCHEME: &str = "safe://";

/// A 256-bit network name.
///
/// Serialized as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct XorName(pub Hash);

impl XorName {
    /// Wrap raw bytes.
    pub fn new(bytes: Hash) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// Lowercase hex encoding (64 chars).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode from a 64-char hex string.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let bytes = hex::decode(s).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        let array: Hash = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }
}

impl fmt::Display for XorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for XorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XorName({}..)", &self.to_hex()[..8])
    }
}

impl TryFrom<String> for XorName {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<XorName> for String {
    fn from(name: XorName) -> Self {
        name.to_hex()
    }
}

/// Location of a mutable record: name plus record kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataAddress {
    pub name: XorName,
    pub type_tag: TypeTag,
}

impl DataAddress {
    pub fn new(name: XorName, type_tag: TypeTag) -> Self {
        Self { name, type_tag }
    }

    /// Render as `safe://<hex name>?tag=<type tag>`.
    pub fn to_uri(&self) -> String {
        format!("{}{}?tag={}", URI_SCHEME, self.name.to_hex(), self.type_tag)
    }

    /// Parse the form produced by [`DataAddress::to_uri`].
    pub fn parse_uri(uri: &str) -> Result<Self, ParseError> {
        let rest = uri
            .strip_prefix(URI_SCHEME)
            .ok_or_else(|| ParseError::InvalidUri(uri.to_string()))?;
        let (name, tag) = rest
            .split_once("?tag=")
            .ok_or_else(|| ParseError::InvalidUri(uri.to_string()))?;
        let type_tag = tag
            .parse::<TypeTag>()
            .map_err(|_| ParseError::InvalidTypeTag(tag.to_string()))?;
        Ok(Self::new(XorName::from_hex(name)?, type_tag))
    }
}

impl fmt::Display for DataAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

/// Identifier of a minted reward token: the name of its record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub XorName);

impl TokenId {
    pub fn name(&self) -> XorName {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({}..)", &self.0.to_hex()[..8])
    }
}

/// Identifier of a transaction notification (64 hex chars).
///
/// Doubles as the entry key under which the notification is appended to the
/// recipient's inbox.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved delivery target for a transaction notification.
///
/// INVARIANT: `encryption_public_key` is non-empty and `inbox` pointed at an
/// existing record when the resolver produced this value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInfo {
    /// Owner key the reward tokens are minted to.
    pub wallet_public_key: String,
    /// Hex-encoded SEC1 key notifications are sealed to.
    pub encryption_public_key: String,
    /// The recipient's append-only transaction inbox.
    pub inbox: DataAddress,
}

/// A 0-5 star rating, or no rating at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(Option<u8>);

impl Rating {
    pub const MAX_STARS: u8 = 5;

    /// No rating given.
    pub const fn none() -> Self {
        Self(None)
    }

    /// Map a raw widget value; anything outside `0..=5` means "no rating".
    pub fn from_raw(raw: i64) -> Self {
        match u8::try_from(raw) {
            Ok(stars) if stars <= Self::MAX_STARS => Self(Some(stars)),
            _ => Self(None),
        }
    }

    pub fn stars(&self) -> Option<u8> {
        self.0
    }

    /// Bracketed label used in feedback bodies, e.g. `[5 stars]`.
    pub fn label(&self) -> String {
        match self.0 {
            Some(1) => "[1 star]".to_string(),
            Some(n) => format!("[{} stars]", n),
            None => "[no rating]".to_string(),
        }
    }
}

/// Capabilities an application may request at authorization time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppPermission {
    /// Raw access to mutable and immutable data primitives.
    LowLevelApi,
}

/// Descriptor presented to the authorization provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub vendor: String,
    pub permissions: Vec<AppPermission>,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            id: "thanks-faucet".to_string(),
            name: "Thanks Faucet".to_string(),
            version: "0.1.0".to_string(),
            vendor: "thanks-faucet".to_string(),
            permissions: vec![AppPermission::LowLevelApi],
        }
    }
}

/// Actions a permission set can allow on a mutable record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Insert,
    Update,
    Delete,
    ManagePermissions,
}

/// Who a permission grant applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grantee {
    /// Every session on the network.
    Anyone,
    /// A single application.
    App(String),
}

/// Permission list attached to a mutable record at creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    grants: Vec<(Grantee, Vec<Action>)>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grant.
    pub fn allow(mut self, grantee: Grantee, actions: &[Action]) -> Self {
        self.grants.push((grantee, actions.to_vec()));
        self
    }

    /// Whether `app_id` may perform `action`.
    pub fn permits(&self, app_id: &str, action: Action) -> bool {
        self.grants.iter().any(|(grantee, actions)| {
            let applies = match grantee {
                Grantee::Anyone => true,
                Grantee::App(id) => id == app_id,
            };
            applies && actions.contains(&action)
        })
    }
}
