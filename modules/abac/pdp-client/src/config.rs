//! Configuration for the PDP client.
//!
//! Resolved once at startup and passed to [`PdpClientModule::init`](crate::module::PdpClientModule::init).
//! Sources, lowest precedence first: defaults, an optional YAML file,
//! `NAIS_APP_NAME` (as `pep_id`), then `ABAC_PDP_*` environment variables.
//!
//! String settings are taken from the environment verbatim, so a password
//! like `0123` or an app name like `007` is not parsed as a number.

use std::collections::BTreeMap;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

pub const DEFAULT_ENDPOINT_URL: &str = "http://abac-foreldrepenger.teamabac/application/authorize";

const ENV_PREFIX: &str = "ABAC_PDP_";
const APP_NAME_ENV: &str = "NAIS_APP_NAME";

/// Fields read from the environment as plain strings.
const STRING_KEYS: [&str; 4] = ["endpoint_url", "username", "password", "pep_id"];

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdpClientConfig {
    /// PDP authorize endpoint.
    pub endpoint_url: String,

    /// System user for Basic authentication against the PDP.
    pub username: String,

    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,

    /// Application name sent as the policy enforcement point id.
    pub pep_id: String,

    /// Forward `TokenX` token bodies to the PDP. Off until the PDP policies
    /// for `TokenX` subjects are in place.
    pub attach_tokenx_payload: bool,
}

impl Default for PdpClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_owned(),
            username: String::new(),
            password: SecretString::from(String::new()),
            pep_id: String::new(),
            attach_tokenx_payload: false,
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Environment values as strings, bypassing figment's value parsing.
fn verbatim(env: &Env) -> Serialized<BTreeMap<String, String>> {
    let values = env
        .iter()
        .map(|(key, value)| (key.as_str().to_owned(), value))
        .collect();
    Serialized::defaults(values)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load PDP client configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("PDP system username is not configured")]
    MissingUsername,

    #[error("invalid PDP endpoint url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("failed to build PDP HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("PDP credentials cannot be sent as an HTTP header")]
    InvalidCredentials,
}

impl PdpClientConfig {
    /// The layered configuration sources.
    #[must_use]
    pub fn figment(yaml: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = yaml {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(verbatim(
                &Env::raw().only(&[APP_NAME_ENV]).map(|_| "pep_id".into()),
            ))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&STRING_KEYS))
            .merge(verbatim(&Env::prefixed(ENV_PREFIX).only(&STRING_KEYS)))
    }

    /// Load and validate.
    ///
    /// # Errors
    ///
    /// - `Load` if a source cannot be read or has unknown/mistyped fields
    /// - `MissingUsername`, `InvalidEndpoint` from [`PdpClientConfig::validate`]
    pub fn load(yaml: Option<&Path>) -> Result<Self, ConfigError> {
        let cfg: Self = Self::figment(yaml).extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the values a working client needs.
    ///
    /// # Errors
    ///
    /// - `MissingUsername` if the username is empty
    /// - `InvalidEndpoint` if the endpoint is not an absolute http(s) url
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        let url = reqwest::Url::parse(&self.endpoint_url).map_err(|e| {
            ConfigError::InvalidEndpoint {
                url: self.endpoint_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                url: self.endpoint_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(())
    }

    /// `Authorization` header value: `Basic base64(username:password)`.
    #[must_use]
    pub fn basic_credentials(&self) -> SecretString {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        SecretString::from(format!("Basic {}", STANDARD.encode(raw)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_point_at_the_well_known_pdp() {
        let cfg = PdpClientConfig::default();
        assert_eq!(cfg.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert!(!cfg.attach_tokenx_payload);
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingUsername)));
    }

    #[test]
    fn basic_credentials_are_base64_of_username_and_password() {
        let cfg = PdpClientConfig {
            username: "srvfpsak".to_owned(),
            password: SecretString::from("hemmelig".to_owned()),
            ..PdpClientConfig::default()
        };
        assert_eq!(
            cfg.basic_credentials().expose_secret(),
            "Basic c3J2ZnBzYWs6aGVtbWVsaWc="
        );
    }

    #[test]
    fn env_overrides_yaml_and_app_name_becomes_pep_id() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "pdp.yaml",
                "endpoint_url: http://localhost:8080/authorize\nusername: from-yaml\n",
            )?;
            jail.set_env("ABAC_PDP_USERNAME", "srvfpsak");
            jail.set_env("ABAC_PDP_PASSWORD", "hemmelig");
            jail.set_env("NAIS_APP_NAME", "fpsak");

            let cfg = PdpClientConfig::load(Some(Path::new("pdp.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(cfg.endpoint_url, "http://localhost:8080/authorize");
            assert_eq!(cfg.username, "srvfpsak");
            assert_eq!(cfg.password.expose_secret(), "hemmelig");
            assert_eq!(cfg.pep_id, "fpsak");
            Ok(())
        });
    }

    #[test]
    fn explicit_pep_id_wins_over_app_name() {
        Jail::expect_with(|jail| {
            jail.set_env("ABAC_PDP_USERNAME", "srvfpsak");
            jail.set_env("NAIS_APP_NAME", "fpsak");
            jail.set_env("ABAC_PDP_PEP_ID", "fpsak-frontend");

            let cfg = PdpClientConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.pep_id, "fpsak-frontend");
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_env_values_stay_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("ABAC_PDP_USERNAME", "4711");
            jail.set_env("ABAC_PDP_PASSWORD", "0123456");
            jail.set_env("ABAC_PDP_ATTACH_TOKENX_PAYLOAD", "true");
            jail.set_env("NAIS_APP_NAME", "007");

            let cfg = PdpClientConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.username, "4711");
            assert_eq!(cfg.password.expose_secret(), "0123456");
            assert_eq!(cfg.pep_id, "007");
            assert!(cfg.attach_tokenx_payload);
            Ok(())
        });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("pdp.yaml", "username: srv\nretries: 3\n")?;
            let result = PdpClientConfig::load(Some(Path::new("pdp.yaml")));
            assert!(matches!(result, Err(ConfigError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let cfg = PdpClientConfig {
            username: "srv".to_owned(),
            endpoint_url: "ftp://pdp/authorize".to_owned(),
            ..PdpClientConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }
}
