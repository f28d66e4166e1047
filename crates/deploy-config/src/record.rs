//! The deploy config record.
//!
//! A [`DeployConfig`] fully parameterizes one deployment environment of the
//! periphery contracts. It is declared once, either as a `static` (see
//! [`crate::environments`]) or as a TOML/JSON file, and is never mutated: a
//! changed environment gets a new record.
//!
//! # Examples
//!
//! ```rust
//! use periphery_deploy_config::{DeployConfig, OPTIMISM_GOERLI};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let toml = OPTIMISM_GOERLI.to_toml_string()?;
//! let config = DeployConfig::from_toml_str(&toml)?;
//! assert_eq!(config.optimist_symbol, "OPTIMIST");
//! assert_eq!(config, OPTIMISM_GOERLI);
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::address::Address;
use crate::error::ConfigError;
use crate::fields::{FieldKind, FieldSpec, FIELDS, FIELD_COUNT};
use crate::format::Format;

/// Human-readable value, borrowed in static records and owned when loaded.
pub type Text = Cow<'static, str>;

/// Parameters for deploying the periphery contracts to one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PartialDeployConfig")]
pub struct DeployConfig {
    pub ddd: Address,
    /// Owner of the L2 proxies
    pub l2_proxy_owner_address: Address,
    pub optimist_name: Text,
    pub optimist_symbol: Text,
    pub optimist_base_uri_attestor_address: Address,
    pub optimist_inviter_invite_granter: Address,
    pub optimist_inviter_name: Text,
    pub optimist_allowlist_allowlist_attestor: Address,
    pub optimist_allowlist_coinbase_quest_attestor: Address,
    pub faucet_admin: Address,
    pub github_fam_admin: Address,
    pub github_fam_name: Text,
    pub github_fam_version: Text,
    pub optimist_fam_admin: Address,
    pub optimist_fam_name: Text,
    pub optimist_fam_version: Text,
}

/// A record as read from a file, before the totality and shape checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialDeployConfig {
    pub ddd: Option<String>,
    pub l2_proxy_owner_address: Option<String>,
    pub optimist_name: Option<String>,
    pub optimist_symbol: Option<String>,
    pub optimist_base_uri_attestor_address: Option<String>,
    pub optimist_inviter_invite_granter: Option<String>,
    pub optimist_inviter_name: Option<String>,
    pub optimist_allowlist_allowlist_attestor: Option<String>,
    pub optimist_allowlist_coinbase_quest_attestor: Option<String>,
    pub faucet_admin: Option<String>,
    pub github_fam_admin: Option<String>,
    pub github_fam_name: Option<String>,
    pub github_fam_version: Option<String>,
    pub optimist_fam_admin: Option<String>,
    pub optimist_fam_name: Option<String>,
    pub optimist_fam_version: Option<String>,
}

impl PartialDeployConfig {
    /// Values paired with their schema entry, in declaration order.
    pub fn entries(&self) -> [(FieldSpec, Option<&str>); FIELD_COUNT] {
        let values = [
            self.ddd.as_deref(),
            self.l2_proxy_owner_address.as_deref(),
            self.optimist_name.as_deref(),
            self.optimist_symbol.as_deref(),
            self.optimist_base_uri_attestor_address.as_deref(),
            self.optimist_inviter_invite_granter.as_deref(),
            self.optimist_inviter_name.as_deref(),
            self.optimist_allowlist_allowlist_attestor.as_deref(),
            self.optimist_allowlist_coinbase_quest_attestor.as_deref(),
            self.faucet_admin.as_deref(),
            self.github_fam_admin.as_deref(),
            self.github_fam_name.as_deref(),
            self.github_fam_version.as_deref(),
            self.optimist_fam_admin.as_deref(),
            self.optimist_fam_name.as_deref(),
            self.optimist_fam_version.as_deref(),
        ];
        std::array::from_fn(|i| (FIELDS[i], values[i]))
    }
}

impl TryFrom<PartialDeployConfig> for DeployConfig {
    type Error = ConfigError;

    fn try_from(partial: PartialDeployConfig) -> Result<Self, Self::Error> {
        for (spec, value) in partial.entries() {
            let value = value.ok_or(ConfigError::MissingField(spec.key))?;
            check_value(&spec, value)?;
        }

        let PartialDeployConfig {
            ddd,
            l2_proxy_owner_address,
            optimist_name,
            optimist_symbol,
            optimist_base_uri_attestor_address,
            optimist_inviter_invite_granter,
            optimist_inviter_name,
            optimist_allowlist_allowlist_attestor,
            optimist_allowlist_coinbase_quest_attestor,
            faucet_admin,
            github_fam_admin,
            github_fam_name,
            github_fam_version,
            optimist_fam_admin,
            optimist_fam_name,
            optimist_fam_version,
        } = partial;

        Ok(DeployConfig {
            ddd: address("ddd", ddd)?,
            l2_proxy_owner_address: address("l2ProxyOwnerAddress", l2_proxy_owner_address)?,
            optimist_name: text("optimistName", optimist_name)?,
            optimist_symbol: text("optimistSymbol", optimist_symbol)?,
            optimist_base_uri_attestor_address: address(
                "optimistBaseUriAttestorAddress",
                optimist_base_uri_attestor_address,
            )?,
            optimist_inviter_invite_granter: address(
                "optimistInviterInviteGranter",
                optimist_inviter_invite_granter,
            )?,
            optimist_inviter_name: text("optimistInviterName", optimist_inviter_name)?,
            optimist_allowlist_allowlist_attestor: address(
                "optimistAllowlistAllowlistAttestor",
                optimist_allowlist_allowlist_attestor,
            )?,
            optimist_allowlist_coinbase_quest_attestor: address(
                "optimistAllowlistCoinbaseQuestAttestor",
                optimist_allowlist_coinbase_quest_attestor,
            )?,
            faucet_admin: address("faucetAdmin", faucet_admin)?,
            github_fam_admin: address("githubFamAdmin", github_fam_admin)?,
            github_fam_name: text("githubFamName", github_fam_name)?,
            github_fam_version: text("githubFamVersion", github_fam_version)?,
            optimist_fam_admin: address("optimistFamAdmin", optimist_fam_admin)?,
            optimist_fam_name: text("optimistFamName", optimist_fam_name)?,
            optimist_fam_version: text("optimistFamVersion", optimist_fam_version)?,
        })
    }
}

fn address(field: &'static str, value: Option<String>) -> Result<Address, ConfigError> {
    let value = value.ok_or(ConfigError::MissingField(field))?;
    Address::parse(&value).map_err(|source| ConfigError::InvalidAddress {
        field,
        value,
        source,
    })
}

fn text(field: &'static str, value: Option<String>) -> Result<Text, ConfigError> {
    value.map(Cow::Owned).ok_or(ConfigError::MissingField(field))
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+')
}

/// Check one value against the rules for its kind.
fn check_value(spec: &FieldSpec, value: &str) -> Result<(), ConfigError> {
    match spec.kind {
        FieldKind::Address => {
            Address::parse(value).map_err(|source| ConfigError::InvalidAddress {
                field: spec.key,
                value: value.to_string(),
                source,
            })?;
        }
        FieldKind::Name => {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(spec.key));
            }
        }
        FieldKind::Symbol => {
            if value.is_empty() {
                return Err(ConfigError::EmptyField(spec.key));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidSymbol {
                    field: spec.key,
                    value: value.to_string(),
                });
            }
            if value.chars().any(char::is_lowercase) {
                warn!(field = spec.key, value, "symbol is not uppercase");
            }
        }
        FieldKind::Version => {
            if value.is_empty() {
                return Err(ConfigError::EmptyField(spec.key));
            }
            if !value.chars().all(is_version_char) {
                return Err(ConfigError::InvalidVersion {
                    field: spec.key,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(())
}

impl DeployConfig {
    /// Parse and validate a TOML record.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let partial: PartialDeployConfig = toml::from_str(s)?;
        Self::from_partial(partial)
    }

    /// Parse and validate a JSON record.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let partial: PartialDeployConfig = serde_json::from_str(s)?;
        Self::from_partial(partial)
    }

    pub fn parse(s: &str, format: Format) -> Result<Self, ConfigError> {
        match format {
            Format::Toml => Self::from_toml_str(s),
            Format::Json => Self::from_json_str(s),
        }
    }

    fn from_partial(partial: PartialDeployConfig) -> Result<Self, ConfigError> {
        let config = DeployConfig::try_from(partial)?;
        debug!(
            optimist_symbol = %config.optimist_symbol,
            faucet_admin = %config.faucet_admin,
            "loaded deploy config"
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: Format) -> Result<String, ConfigError> {
        match format {
            Format::Toml => self.to_toml_string(),
            Format::Json => self.to_json_string(),
        }
    }

    /// Check every field in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first failing field as a `ConfigError` naming its key:
    /// - an empty name, symbol or version
    /// - a symbol containing whitespace
    /// - a version with characters other than alphanumerics, `.`, `-`, `+`
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.entries()
            .iter()
            .try_for_each(|(spec, value)| check_value(spec, value))
    }

    /// Values paired with their schema entry, in declaration order.
    pub fn entries(&self) -> [(FieldSpec, &str); FIELD_COUNT] {
        let values: [&str; FIELD_COUNT] = [
            self.ddd.as_str(),
            self.l2_proxy_owner_address.as_str(),
            &self.optimist_name,
            &self.optimist_symbol,
            self.optimist_base_uri_attestor_address.as_str(),
            self.optimist_inviter_invite_granter.as_str(),
            &self.optimist_inviter_name,
            self.optimist_allowlist_allowlist_attestor.as_str(),
            self.optimist_allowlist_coinbase_quest_attestor.as_str(),
            self.faucet_admin.as_str(),
            self.github_fam_admin.as_str(),
            &self.github_fam_name,
            &self.github_fam_version,
            self.optimist_fam_admin.as_str(),
            &self.optimist_fam_name,
            &self.optimist_fam_version,
        ];
        std::array::from_fn(|i| (FIELDS[i], values[i]))
    }

    /// Value of a field by its camelCase key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(spec, _)| spec.key == key)
            .map(|(_, value)| value)
    }
}
