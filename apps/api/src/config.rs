use anyhow::{Context, Result};

/// Placeholder value shipped in the sample `.env`; treated the same as an unset key.
pub const PLACES_KEY_PLACEHOLDER: &str = "YOUR_GOOGLE_MAPS_API_KEY_HERE";

const DEFAULT_PLACES_API_URL: &str = "https://places.googleapis.com/v1/places:searchText";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// Places text-search key. `None` disables the local-opportunities search.
    pub google_maps_api_key: Option<String>,
    pub places_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            google_maps_api_key: optional_key(std::env::var("GOOGLE_MAPS_API_KEY").ok()),
            places_api_url: std::env::var("PLACES_API_URL")
                .unwrap_or_else(|_| DEFAULT_PLACES_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Blank and placeholder keys count as missing.
fn optional_key(raw: Option<String>) -> Option<String> {
    raw.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && k != PLACES_KEY_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_key_rejects_placeholder() {
        assert_eq!(optional_key(Some(PLACES_KEY_PLACEHOLDER.to_string())), None);
        assert_eq!(optional_key(Some("   ".to_string())), None);
        assert_eq!(optional_key(None), None);
        assert_eq!(
            optional_key(Some(" abc123 ".to_string())),
            Some("abc123".to_string())
        );
    }
}
