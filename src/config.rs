use crate::models::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
const SOURCE_VAR: &str = "PROMPT_REFINER_CREDENTIAL_SOURCE";
const MODEL_VAR: &str = "PROMPT_REFINER_MODEL";
const TEMPERATURE_VAR: &str = "PROMPT_REFINER_TEMPERATURE";
const API_URL_VAR: &str = "PROMPT_REFINER_API_URL";
const TIMEOUT_VAR: &str = "PROMPT_REFINER_TIMEOUT_SECS";
const SYSTEM_PROMPT_VAR: &str = "PROMPT_REFINER_SYSTEM_PROMPT";

/// API key. Never printed through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Where the API key comes from, and what happens when there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Typed into a masked prompt; submissions are refused without it.
    Interactive,
    /// Read from `OPENAI_API_KEY`; falls back to mock mode when unset.
    Environment,
    /// Always mock mode.
    None,
}

impl CredentialSource {
    pub fn requires_credential(self) -> bool {
        matches!(self, CredentialSource::Interactive)
    }
}

impl FromStr for CredentialSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "interactive" => Ok(CredentialSource::Interactive),
            "environment" | "env" => Ok(CredentialSource::Environment),
            "none" | "mock" => Ok(CredentialSource::None),
            other => Err(Error::Config(format!(
                "unknown credential source '{}' (expected interactive, environment or none)",
                other
            ))),
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialSource::Interactive => "interactive",
            CredentialSource::Environment => "environment",
            CredentialSource::None => "none",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credential_source: CredentialSource,
    /// Key resolved at startup. Only set for the environment source.
    pub credential: Option<Credential>,
    pub model: String,
    pub temperature: f32,
    pub api_url: String,
    pub timeout: Duration,
    pub system_prompt: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential_source: CredentialSource::Environment,
            credential: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            system_prompt: None,
        }
    }
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(source) = get(SOURCE_VAR) {
            config.credential_source = source.parse()?;
        }

        if config.credential_source == CredentialSource::Environment {
            config.credential = get(API_KEY_VAR).and_then(Credential::new);
        }

        if let Some(model) = get(MODEL_VAR) {
            config.model = model.trim().to_string();
        }

        if let Some(raw) = get(TEMPERATURE_VAR) {
            let temperature: f32 = raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} must be a number, got '{}'", TEMPERATURE_VAR, raw)))?;
            if !(0.0..=1.0).contains(&temperature) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    TEMPERATURE_VAR, temperature
                )));
            }
            config.temperature = temperature;
        }

        if let Some(url) = get(API_URL_VAR) {
            config.api_url = url.trim().to_string();
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| Error::Config(format!("{} must be a positive integer, got '{}'", TIMEOUT_VAR, raw)))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.system_prompt = get(SYSTEM_PROMPT_VAR);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.credential_source, CredentialSource::Environment);
        assert!(config.credential.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.system_prompt.is_none());
    }

    #[test]
    fn environment_source_reads_key() {
        let config = config_from(&[(API_KEY_VAR, "sk-test")]).unwrap();
        assert_eq!(config.credential.unwrap().expose(), "sk-test");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = config_from(&[(API_KEY_VAR, "   ")]).unwrap();
        assert!(config.credential.is_none());
    }

    #[test]
    fn non_environment_sources_ignore_env_key() {
        let config = config_from(&[(SOURCE_VAR, "interactive"), (API_KEY_VAR, "sk-test")]).unwrap();
        assert_eq!(config.credential_source, CredentialSource::Interactive);
        assert!(config.credential.is_none());

        let config = config_from(&[(SOURCE_VAR, "none"), (API_KEY_VAR, "sk-test")]).unwrap();
        assert_eq!(config.credential_source, CredentialSource::None);
        assert!(config.credential.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            (MODEL_VAR, "gpt-4o-mini"),
            (TEMPERATURE_VAR, "0.2"),
            (API_URL_VAR, "http://localhost:8080/v1/chat/completions"),
            (TIMEOUT_VAR, "5"),
            (SYSTEM_PROMPT_VAR, "Be terse."),
        ])
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.api_url, "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.system_prompt.as_deref(), Some("Be terse."));
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        assert!(matches!(config_from(&[(TEMPERATURE_VAR, "1.5")]), Err(Error::Config(_))));
        assert!(matches!(config_from(&[(TEMPERATURE_VAR, "warm")]), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_zero_timeout_and_unknown_source() {
        assert!(matches!(config_from(&[(TIMEOUT_VAR, "0")]), Err(Error::Config(_))));
        assert!(matches!(config_from(&[(SOURCE_VAR, "keychain")]), Err(Error::Config(_))));
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("sk-secret").unwrap();
        assert!(!format!("{:?}", credential).contains("sk-secret"));
    }
}
