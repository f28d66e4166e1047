//! Periphery deploy configuration
//!
//! Typed, validated records holding the fixed parameters (addresses, names,
//! version tags) used to deploy the periphery contracts to one environment.
//! A deployment driver loads exactly one [`DeployConfig`] per environment and
//! passes its values through unmodified.

pub mod address;
pub mod environments;
pub mod error;
pub mod fields;
pub mod format;
pub mod record;

pub use address::Address;
pub use environments::{Network, UnknownNetwork, OPTIMISM_GOERLI};
pub use error::{AddressError, ConfigError};
pub use fields::{FieldKind, FieldSpec, FIELDS};
pub use format::Format;
pub use record::{DeployConfig, PartialDeployConfig};
