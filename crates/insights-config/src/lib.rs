//! Shared configuration for Insights API tools.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), the legacy
//! `BASEURL` / `API_TOKEN` / `INSECURE_SSL` environment, and translation to
//! an `insights_api::InsightsClient`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use insights_api::{InsightsClient, TlsMode, TransportConfig};

/// Keyring service name; entries are keyed `{profile}/api-token`.
pub const KEYRING_SERVICE: &str = "insights";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}' and BASEURL is not set")]
    NoProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("keyring access failed: {0}")]
    Keyring(#[from] keyring::Error),

    #[error(transparent)]
    Api(#[from] insights_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named service profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
        }
    }
}

fn default_output() -> String {
    "table".into()
}

/// A named service profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
    /// Service base URL (e.g., "https://insights.example.com/api").
    pub base_url: String,

    /// API token in plaintext; prefer keyring or env var.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Environment variable name containing the API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token_env: Option<String>,

    /// Username sent to the auth endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override the global insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

/// Flat `BASEURL` / `API_TOKEN` / `INSECURE_SSL` environment.
#[derive(Debug, Default, Deserialize)]
struct LegacyEnv {
    #[serde(default, rename = "baseurl")]
    base_url: Option<String>,
    #[serde(default)]
    api_token: Option<String>,
    #[serde(default)]
    insecure_ssl: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "insights", "insights").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("insights");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path`, with `INSIGHTS_*` env vars layered on top.
///
/// Nested keys use a double underscore, e.g.
/// `INSIGHTS_PROFILES__PROD__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("INSIGHTS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Record `username` on a saved profile so later `auth` runs reuse it.
///
/// Returns `false` without writing when the profile is not in the config
/// file (built from `--base-url` or `BASEURL`) or already has that username.
pub fn remember_username(profile_name: &str, username: &str) -> Result<bool, ConfigError> {
    remember_username_in(&config_path(), profile_name, username)
}

pub fn remember_username_in(
    path: &Path,
    profile_name: &str,
    username: &str,
) -> Result<bool, ConfigError> {
    let mut config = load_config_from(path)?;
    let Some(profile) = config.profiles.get_mut(profile_name) else {
        return Ok(false);
    };
    if profile.username.as_deref() == Some(username) {
        return Ok(false);
    }

    profile.username = Some(username.to_owned());
    save_config_to(&config, path)?;
    debug!(profile = profile_name, "saved username to config");
    Ok(true)
}

// ── Profile resolution ──────────────────────────────────────────────

/// Build a profile from `BASEURL` / `API_TOKEN` / `INSECURE_SSL`.
///
/// Returns `None` when `BASEURL` is unset.
pub fn legacy_env_profile() -> Result<Option<Profile>, ConfigError> {
    let env: LegacyEnv =
        Figment::from(Env::raw().only(&["BASEURL", "API_TOKEN", "INSECURE_SSL"])).extract()?;

    Ok(env.base_url.map(|base_url| Profile {
        base_url,
        api_token: env.api_token,
        insecure: env.insecure_ssl,
        ..Profile::default()
    }))
}

/// Pick the active profile: `requested` > `default_profile` > `"default"`.
///
/// Falls back to the legacy environment when the config has no profile of
/// that name.
pub fn resolve_profile(
    config: &Config,
    requested: Option<&str>,
) -> Result<(String, Profile), ConfigError> {
    let name = requested
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    if let Some(profile) = config.profiles.get(&name) {
        return Ok((name, profile.clone()));
    }

    match legacy_env_profile()? {
        Some(profile) => {
            debug!("using BASEURL environment profile");
            Ok((name, profile))
        }
        None => Err(ConfigError::NoProfile { profile: name }),
    }
}

/// Resolve the API token from the credential chain.
///
/// Order: `api_token_env` → system keyring → plaintext `api_token`.
/// `None` means the client starts unauthenticated.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's api_token_env → env var lookup
    if let Some(ref env_name) = profile.api_token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-token")) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    profile.api_token.clone().map(SecretString::from)
}

/// Store a token in the system keyring under `{profile}/api-token`.
pub fn store_token(profile_name: &str, token: &SecretString) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-token"))?;
    entry.set_password(token.expose_secret())?;
    debug!(profile = profile_name, "stored API token in keyring");
    Ok(())
}

/// TLS + timeout settings for a profile. Verification stays on unless
/// `insecure` is set on the profile or in the global defaults.
pub fn transport_config(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        ..TransportConfig::default()
    }
}

/// Build a ready client from a profile.
pub fn build_client(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<InsightsClient, ConfigError> {
    if profile.base_url.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: "must not be empty".into(),
        });
    }

    let token = resolve_token(profile, profile_name);
    let transport = transport_config(profile, defaults);
    Ok(InsightsClient::new(&profile.base_url, token, &transport)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn loads_profiles_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "prod"

                [defaults]
                output = "json"

                [profiles.prod]
                base_url = "https://insights.example.com/api"
                api_token_env = "PROD_TOKEN"
                insecure = true
                "#,
            )?;

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.default_profile.as_deref(), Some("prod"));
            assert_eq!(config.defaults.output, "json");
            let prod = &config.profiles["prod"];
            assert_eq!(prod.base_url, "https://insights.example.com/api");
            assert_eq!(prod.insecure, Some(true));
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_| {
            let config = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(config.default_profile.as_deref(), Some("default"));
            assert!(config.profiles.is_empty());
            assert!(!config.defaults.insecure);
            Ok(())
        });
    }

    #[test]
    fn prefixed_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [profiles.default]
                base_url = "https://file.example.com"
                "#,
            )?;
            jail.set_env("INSIGHTS_PROFILES__DEFAULT__BASE_URL", "https://env.example.com");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.profiles["default"].base_url, "https://env.example.com");
            Ok(())
        });
    }

    #[test]
    fn legacy_env_is_used_without_a_profile() {
        Jail::expect_with(|jail| {
            jail.set_env("BASEURL", "https://legacy.example.com");
            jail.set_env("API_TOKEN", "legacy-token");
            jail.set_env("INSECURE_SSL", "true");

            let (name, profile) = resolve_profile(&Config::default(), None).unwrap();
            assert_eq!(name, "default");
            assert_eq!(profile.base_url, "https://legacy.example.com");
            assert_eq!(profile.api_token.as_deref(), Some("legacy-token"));
            assert_eq!(profile.insecure, Some(true));
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_without_env_is_an_error() {
        Jail::expect_with(|_| {
            let err = resolve_profile(&Config::default(), Some("staging")).unwrap_err();
            assert!(matches!(err, ConfigError::NoProfile { ref profile } if profile == "staging"));
            Ok(())
        });
    }

    #[test]
    fn token_env_var_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("NHS_INSIGHTS_TOKEN", "from-env");
            let profile = Profile {
                base_url: "https://insights.example.com".into(),
                api_token: Some("from-file".into()),
                api_token_env: Some("NHS_INSIGHTS_TOKEN".into()),
                ..Profile::default()
            };
            let token = resolve_token(&profile, "insights-test-env").unwrap();
            assert_eq!(token.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn transport_is_secure_unless_asked() {
        let defaults = Defaults::default();
        let mut profile = Profile {
            base_url: "https://insights.example.com".into(),
            ..Profile::default()
        };
        assert_eq!(transport_config(&profile, &defaults).tls, TlsMode::System);

        profile.ca_cert = Some(PathBuf::from("/etc/insights/ca.pem"));
        assert_eq!(
            transport_config(&profile, &defaults).tls,
            TlsMode::CustomCa(PathBuf::from("/etc/insights/ca.pem"))
        );

        profile.insecure = Some(true);
        assert_eq!(
            transport_config(&profile, &defaults).tls,
            TlsMode::DangerAcceptInvalid
        );
    }

    #[test]
    fn round_trips_through_save() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested/config.toml");
            let mut config = Config::default();
            config.profiles.insert(
                "default".into(),
                Profile {
                    base_url: "https://insights.example.com".into(),
                    username: Some("svc-sync".into()),
                    ..Profile::default()
                },
            );
            save_config_to(&config, &path).unwrap();

            let loaded = load_config_from(&path).unwrap();
            assert_eq!(loaded.profiles["default"], config.profiles["default"]);
            Ok(())
        });
    }

    #[test]
    fn remembers_username_only_for_saved_profiles() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [profiles.prod]
                base_url = "https://insights.example.com/api"
                "#,
            )?;
            let path = jail.directory().join("config.toml");

            assert!(remember_username_in(&path, "prod", "svc-sync").unwrap());
            let loaded = load_config_from(&path).unwrap();
            assert_eq!(loaded.profiles["prod"].username.as_deref(), Some("svc-sync"));

            // Unchanged username and unknown profiles leave the file alone
            assert!(!remember_username_in(&path, "prod", "svc-sync").unwrap());
            assert!(!remember_username_in(&path, "staging", "svc-sync").unwrap());
            assert!(!load_config_from(&path).unwrap().profiles.contains_key("staging"));
            Ok(())
        });
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = build_client(&Profile::default(), "insights-test-empty", &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
    }
}
