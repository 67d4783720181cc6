use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if the Anthropic credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    /// Validate the parsed analysis against the typed result shape before returning it.
    pub schema_validation: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            schema_validation: parse_flag(
                std::env::var("ANALYSIS_SCHEMA_VALIDATION").ok().as_deref(),
            )
            .context("ANALYSIS_SCHEMA_VALIDATION must be true or false")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn parse_flag(raw: Option<&str>) -> Result<bool> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => anyhow::bail!("unrecognised boolean value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_defaults_to_false() {
        assert!(!parse_flag(None).unwrap());
        assert!(!parse_flag(Some("  ")).unwrap());
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag(Some("true")).unwrap());
        assert!(parse_flag(Some("TRUE")).unwrap());
        assert!(parse_flag(Some("1")).unwrap());
        assert!(!parse_flag(Some("off")).unwrap());
    }

    #[test]
    fn test_require_env_fails_when_unset() {
        let key = "VISA_API_TEST_REQUIRE_ENV_UNSET";
        std::env::remove_var(key);
        let err = require_env(key).unwrap_err();
        assert!(err.to_string().contains("is not set"), "{err}");
        assert!(err.to_string().contains(key));
    }

    #[test]
    fn test_require_env_fails_when_blank() {
        let key = "VISA_API_TEST_REQUIRE_ENV_BLANK";
        std::env::set_var(key, "   ");
        let err = require_env(key).unwrap_err();
        assert!(err.to_string().contains("is empty"), "{err}");
        std::env::remove_var(key);
    }

    #[test]
    fn test_require_env_returns_value() {
        let key = "VISA_API_TEST_REQUIRE_ENV_SET";
        std::env::set_var(key, "sk-ant-test");
        assert_eq!(require_env(key).unwrap(), "sk-ant-test");
        std::env::remove_var(key);
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        assert!(parse_flag(Some("maybe")).is_err());
    }
}
