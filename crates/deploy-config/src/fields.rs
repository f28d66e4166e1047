//! The `DeployConfig` schema as data: every key with the kind of value it holds.

use std::fmt;

use serde::Serialize;

/// Semantic kind of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// `0x`-prefixed 40-hex-digit literal
    Address,
    /// Human-readable name, non-empty
    Name,
    /// Short ticker, non-empty without whitespace, conventionally uppercase
    Symbol,
    /// Version token such as `1` or `1.0.2`
    Version,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Address => "address",
            FieldKind::Name => "name",
            FieldKind::Symbol => "symbol",
            FieldKind::Version => "version",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One key of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// camelCase key used in config files
    pub key: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, kind }
}

pub const FIELD_COUNT: usize = 16;

/// Schema in declaration order. Validation reports the first failing key in
/// this order.
pub const FIELDS: [FieldSpec; FIELD_COUNT] = [
    field("ddd", FieldKind::Address),
    field("l2ProxyOwnerAddress", FieldKind::Address),
    field("optimistName", FieldKind::Name),
    field("optimistSymbol", FieldKind::Symbol),
    field("optimistBaseUriAttestorAddress", FieldKind::Address),
    field("optimistInviterInviteGranter", FieldKind::Address),
    field("optimistInviterName", FieldKind::Name),
    field("optimistAllowlistAllowlistAttestor", FieldKind::Address),
    field("optimistAllowlistCoinbaseQuestAttestor", FieldKind::Address),
    field("faucetAdmin", FieldKind::Address),
    field("githubFamAdmin", FieldKind::Address),
    field("githubFamName", FieldKind::Name),
    field("githubFamVersion", FieldKind::Version),
    field("optimistFamAdmin", FieldKind::Address),
    field("optimistFamName", FieldKind::Name),
    field("optimistFamVersion", FieldKind::Version),
];

/// Look up a key in the schema.
pub fn spec(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}
