//! Deployment settings resolution
//!
//! Decides which environment a deployment targets and loads that
//! environment's deploy config record. Settings are resolved in priority
//! order:
//!
//! 1. Environment variables (DEPLOY_*)
//! 2. deploy.toml profile selection
//! 3. Built-in defaults for the network
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use periphery_tools::settings::Settings;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load(Path::new("."), None)?;
//! println!("Network: {}", settings.network);
//! println!("Faucet admin: {}", settings.deploy_config.faucet_admin);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use periphery_deploy_config::{ConfigError, DeployConfig, Format, Network, UnknownNetwork};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Directory searched for `<network>.toml` / `<network>.json` records.
pub const DEFAULT_CONFIG_DIR: &str = "config/deploy";

/// Profile file at the workspace root.
pub const DEPLOY_TOML: &str = "deploy.toml";

pub const ENV_NETWORK: &str = "DEPLOY_NETWORK";
pub const ENV_RPC_URL: &str = "DEPLOY_RPC_URL";
pub const ENV_CONFIG_DIR: &str = "DEPLOY_CONFIG_DIR";

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read deploy config {path}: {source}")]
    ReadRecord {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in deploy.toml: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    InvalidNetwork(#[from] UnknownNetwork),

    #[error("No deploy config for {network}: searched {searched} and no built-in record exists")]
    MissingDeployConfig { network: Network, searched: String },

    #[error("Invalid deploy config {source_name}: {source}")]
    InvalidRecord {
        source_name: String,
        #[source]
        source: ConfigError,
    },

    #[error("Settings validation failed: {0}")]
    ValidationError(String),
}

/// `[profile.<network>]` section of deploy.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkProfile {
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Record file, relative to deploy.toml
    #[serde(default)]
    pub config: Option<PathBuf>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Contents of deploy.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployToml {
    #[serde(default)]
    pub default: Option<DefaultProfile>,
    #[serde(default)]
    pub profile: HashMap<String, NetworkProfile>,
}

/// Default profile section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub network: Option<String>,
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub network: Option<String>,
    pub rpc_url: Option<String>,
    pub config_dir: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        EnvOverrides {
            network: std::env::var(ENV_NETWORK).ok(),
            rpc_url: std::env::var(ENV_RPC_URL).ok(),
            config_dir: std::env::var(ENV_CONFIG_DIR).ok().map(PathBuf::from),
        }
    }
}

/// Where the deploy config record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    File(PathBuf),
    Builtin,
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::File(path) => write!(f, "{}", path.display()),
            RecordSource::Builtin => write!(f, "built-in"),
        }
    }
}

/// Resolved settings with a validated deploy config record
#[derive(Debug, Clone)]
pub struct Settings {
    /// Target network
    pub network: Network,
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Origin of `deploy_config`
    pub source: RecordSource,
    /// Record for `network`
    pub deploy_config: DeployConfig,
}

impl Settings {
    /// Load settings from the environment and `<root>/deploy.toml`
    ///
    /// A `.env` file is read first if present.
    pub fn load(root: &Path, network: Option<Network>) -> Result<Self, SettingsError> {
        // Load .env file if it exists (non-fatal)
        let _ = dotenvy::dotenv();

        Self::resolve(root, &EnvOverrides::from_env(), network)
    }

    /// Resolve settings rooted at `root`.
    ///
    /// # Resolution Order
    ///
    /// 1. Network: `network` argument, then DEPLOY_NETWORK, then the
    ///    `[default]` of deploy.toml, then optimism-goerli
    /// 2. RPC URL: DEPLOY_RPC_URL, then the profile, then the network default
    /// 3. Record: the profile's `config` file, then
    ///    `<config dir>/<network>.{toml,json}`, then the built-in record
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if:
    /// - The network name is unknown
    /// - No record exists for the network
    /// - The record is malformed or incomplete
    /// - The RPC URL is not http(s)
    pub fn resolve(
        root: &Path,
        env: &EnvOverrides,
        network: Option<Network>,
    ) -> Result<Self, SettingsError> {
        let deploy_toml = Self::load_deploy_toml(root)?;

        let network = match network {
            Some(network) => network,
            None => env
                .network
                .clone()
                .or_else(|| deploy_toml.default.as_ref().and_then(|d| d.network.clone()))
                .map(|name| name.parse::<Network>())
                .transpose()?
                .unwrap_or(Network::OptimismGoerli),
        };

        let profile = deploy_toml.profile.get(network.as_str());

        let rpc_url = env
            .rpc_url
            .clone()
            .or_else(|| profile.and_then(|p| p.rpc_url.clone()))
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        Self::validate_rpc_url(&rpc_url)?;

        let config_dir = root.join(
            env.config_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
        );

        let (source, deploy_config) =
            match Self::find_record_file(root, &config_dir, network, profile) {
                Some(path) => {
                    let config = Self::load_record(&path)?;
                    (RecordSource::File(path), config)
                }
                None => {
                    let builtin = network.builtin_config().ok_or_else(|| {
                        SettingsError::MissingDeployConfig {
                            network,
                            searched: config_dir.display().to_string(),
                        }
                    })?;
                    builtin
                        .validate()
                        .map_err(|source| SettingsError::InvalidRecord {
                            source_name: RecordSource::Builtin.to_string(),
                            source,
                        })?;
                    (RecordSource::Builtin, builtin.clone())
                }
            };

        info!(%network, %source, "resolved deploy config");

        Ok(Settings {
            network,
            rpc_url,
            source,
            deploy_config,
        })
    }

    /// Read and validate one record file. The format follows the extension.
    pub fn load_record(path: &Path) -> Result<DeployConfig, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| SettingsError::ReadRecord {
                path: path.display().to_string(),
                source,
            })?;
        DeployConfig::parse(&content, Format::from_path(path)).map_err(|source| {
            SettingsError::InvalidRecord {
                source_name: path.display().to_string(),
                source,
            }
        })
    }

    /// Chain id of the target network
    pub fn chain_id(&self) -> u64 {
        self.network.chain_id()
    }

    fn load_deploy_toml(root: &Path) -> Result<DeployToml, SettingsError> {
        let path = root.join(DEPLOY_TOML);
        if !path.exists() {
            debug!(path = %path.display(), "no deploy.toml");
            return Ok(DeployToml::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    fn find_record_file(
        root: &Path,
        config_dir: &Path,
        network: Network,
        profile: Option<&NetworkProfile>,
    ) -> Option<PathBuf> {
        // An explicit profile path wins even if the file is missing, so the
        // read reports it instead of silently using another record.
        if let Some(config) = profile.and_then(|p| p.config.as_ref()) {
            return Some(root.join(config));
        }

        [Format::Toml, Format::Json]
            .iter()
            .map(|format| config_dir.join(format!("{}.{}", network, format.extension())))
            .find(|path| path.exists())
    }

    fn validate_rpc_url(rpc_url: &str) -> Result<(), SettingsError> {
        if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
            return Err(SettingsError::ValidationError(format!(
                "RPC URL must start with http:// or https://: {}",
                rpc_url
            )));
        }
        Ok(())
    }

    /// Print the resolved settings and every record value
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║         PERIPHERY DEPLOY CONFIGURATION RESOLVED                ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!("  Network:             {}", self.network);
        println!("  Chain ID:            {}", self.chain_id());
        println!("  RPC URL:             {}", self.rpc_url);
        println!("  Record:              {}", self.source);
        println!();
        for (spec, value) in self.deploy_config.entries() {
            println!("  {:<40} {}", spec.key, value);
        }
        println!("╚════════════════════════════════════════════════════════════════╝");
    }

    /// Get settings as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Settings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("network", &self.network)?;
        map.serialize_entry("chain_id", &self.chain_id())?;
        map.serialize_entry("rpc_url", &self.rpc_url)?;
        map.serialize_entry("source", &self.source.to_string())?;
        map.serialize_entry("deploy_config", &self.deploy_config)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use periphery_deploy_config::OPTIMISM_GOERLI;
    use std::fs;
    use tempfile::TempDir;

    const ADMIN: &str = "0xEa193Fd9565284E7534dDDA15b07B119e7792644";

    fn no_env() -> EnvOverrides {
        EnvOverrides::default()
    }

    fn devnet_toml() -> String {
        OPTIMISM_GOERLI
            .to_toml_string()
            .unwrap()
            .replace("\"OPTIMIST\"", "\"DEVOPT\"")
    }

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_to_builtin_goerli() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::resolve(dir.path(), &no_env(), None).unwrap();

        assert_eq!(settings.network, Network::OptimismGoerli);
        assert_eq!(settings.chain_id(), 420);
        assert_eq!(settings.rpc_url, "https://goerli.optimism.io");
        assert_eq!(settings.source, RecordSource::Builtin);
        assert_eq!(settings.deploy_config, OPTIMISM_GOERLI);
    }

    #[test]
    fn test_missing_record_for_network() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), DEPLOY_TOML, "[default]\nnetwork = \"devnet\"\n");

        let err = Settings::resolve(dir.path(), &no_env(), None).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::MissingDeployConfig {
                network: Network::Devnet,
                ..
            }
        ));
    }

    #[test]
    fn test_record_from_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "config/deploy/devnet.toml", &devnet_toml());

        let settings = Settings::resolve(dir.path(), &no_env(), Some(Network::Devnet)).unwrap();
        assert_eq!(settings.source, RecordSource::File(path));
        assert_eq!(settings.deploy_config.optimist_symbol, "DEVOPT");
        assert_eq!(settings.deploy_config.faucet_admin, ADMIN);
        assert_eq!(settings.rpc_url, "http://localhost:9545");
    }

    #[test]
    fn test_json_record_from_config_dir() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "config/deploy/optimism.json",
            &OPTIMISM_GOERLI.to_json_string().unwrap(),
        );

        let settings = Settings::resolve(dir.path(), &no_env(), Some(Network::Optimism)).unwrap();
        assert_eq!(settings.chain_id(), 10);
        assert_eq!(settings.deploy_config, OPTIMISM_GOERLI);
    }

    #[test]
    fn test_file_overrides_builtin() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config/deploy/optimism-goerli.toml", &devnet_toml());

        let settings = Settings::resolve(dir.path(), &no_env(), None).unwrap();
        assert!(matches!(settings.source, RecordSource::File(_)));
        assert_eq!(settings.deploy_config.optimist_symbol, "DEVOPT");
    }

    #[test]
    fn test_profile_sets_rpc_and_record() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "records/local.toml", &devnet_toml());
        write(
            dir.path(),
            DEPLOY_TOML,
            r#"
[default]
network = "devnet"

[profile.devnet]
rpc_url = "http://127.0.0.1:8545"
config = "records/local.toml"
description = "local devnet"
"#,
        );

        let settings = Settings::resolve(dir.path(), &no_env(), None).unwrap();
        assert_eq!(settings.network, Network::Devnet);
        assert_eq!(settings.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(
            settings.source,
            RecordSource::File(dir.path().join("records/local.toml"))
        );
    }

    #[test]
    fn test_profile_record_must_exist() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            DEPLOY_TOML,
            "[profile.optimism-goerli]\nconfig = \"gone.toml\"\n",
        );

        let err = Settings::resolve(dir.path(), &no_env(), None).unwrap_err();
        assert!(err.to_string().contains("gone.toml"), "{err}");
        match err {
            SettingsError::ReadRecord { path, source } => {
                assert_eq!(PathBuf::from(path), dir.path().join("gone.toml"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_env_overrides_deploy_toml() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "alt/devnet.toml", &devnet_toml());
        write(
            dir.path(),
            DEPLOY_TOML,
            "[default]\nnetwork = \"optimism\"\n\n[profile.devnet]\nrpc_url = \"http://127.0.0.1:8545\"\n",
        );

        let env = EnvOverrides {
            network: Some("devnet".to_string()),
            rpc_url: Some("https://rpc.example.com".to_string()),
            config_dir: Some(PathBuf::from("alt")),
        };
        let settings = Settings::resolve(dir.path(), &env, None).unwrap();
        assert_eq!(settings.network, Network::Devnet);
        assert_eq!(settings.rpc_url, "https://rpc.example.com");
        assert_eq!(settings.deploy_config.optimist_symbol, "DEVOPT");
    }

    #[test]
    fn test_argument_overrides_env() {
        let dir = TempDir::new().unwrap();
        let env = EnvOverrides {
            network: Some("devnet".to_string()),
            ..Default::default()
        };
        let settings =
            Settings::resolve(dir.path(), &env, Some(Network::OptimismGoerli)).unwrap();
        assert_eq!(settings.network, Network::OptimismGoerli);
    }

    #[test]
    fn test_unknown_network() {
        let dir = TempDir::new().unwrap();
        let env = EnvOverrides {
            network: Some("ropsten".to_string()),
            ..Default::default()
        };
        let err = Settings::resolve(dir.path(), &env, None).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidNetwork(_)));
    }

    #[test]
    fn test_invalid_rpc_url() {
        let dir = TempDir::new().unwrap();
        let env = EnvOverrides {
            rpc_url: Some("ws://localhost:8546".to_string()),
            ..Default::default()
        };
        let err = Settings::resolve(dir.path(), &env, None).unwrap_err();
        assert!(matches!(err, SettingsError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_record_names_field() {
        let dir = TempDir::new().unwrap();
        let bad = OPTIMISM_GOERLI
            .to_toml_string()
            .unwrap()
            .replace("0x9C6373dE60c2D3297b18A8f964618ac46E011B58", "nothex");
        write(dir.path(), "config/deploy/optimism-goerli.toml", &bad);

        let err = Settings::resolve(dir.path(), &no_env(), None).unwrap_err();
        match err {
            SettingsError::InvalidRecord { source, .. } => {
                assert_eq!(source.field(), Some("ddd"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_deploy_toml() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), DEPLOY_TOML, "[default\nnetwork = ");
        let err = Settings::resolve(dir.path(), &no_env(), None).unwrap_err();
        assert!(matches!(err, SettingsError::TomlError(_)));
    }

    fn repo_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    #[test]
    fn test_shipped_deploy_toml() {
        let root = repo_root();
        let settings = Settings::resolve(&root, &no_env(), None).unwrap();
        assert_eq!(settings.network, Network::OptimismGoerli);
        assert_eq!(
            settings.source,
            RecordSource::File(root.join("config/deploy/optimism-goerli.toml"))
        );
        assert_eq!(settings.deploy_config, OPTIMISM_GOERLI);

        // devnet has a profile but no record until one is written locally
        let err = Settings::resolve(&root, &no_env(), Some(Network::Devnet)).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::MissingDeployConfig {
                network: Network::Devnet,
                ..
            }
        ));
    }

    #[test]
    fn test_load_with_network_argument() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path(), Some(Network::OptimismGoerli)).unwrap();
        assert_eq!(settings.network, Network::OptimismGoerli);
        assert_eq!(settings.source, RecordSource::Builtin);
    }

    #[test]
    fn test_to_json() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::resolve(dir.path(), &no_env(), None).unwrap();
        let json: serde_json::Value = serde_json::from_str(&settings.to_json().unwrap()).unwrap();

        assert_eq!(json["network"], "optimism-goerli");
        assert_eq!(json["chain_id"], 420);
        assert_eq!(json["source"], "built-in");
        assert_eq!(json["deploy_config"]["optimistSymbol"], "OPTIMIST");
        assert_eq!(json["deploy_config"]["faucetAdmin"], ADMIN);
    }
}
