//! Console client configuration.
//!
//! Read with `envy` from `TENMO_`-prefixed variables, after loading an
//! optional `.env` file.

use serde::Deserialize;

/// # Environment Variables
///
/// - `TENMO_API_BASE_URL` (optional): server base URL, defaults to
///   `http://localhost:8080/`
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/".to_string()
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::prefixed("TENMO_").from_env::<ClientConfig>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_local_server() {
        let vars: Vec<(String, String)> = Vec::new();

        let config = envy::prefixed("TENMO_").from_iter::<_, ClientConfig>(vars).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080/");
    }

    #[test]
    fn base_url_is_read_from_prefixed_variable() {
        let vars = vec![(
            "TENMO_API_BASE_URL".to_string(),
            "http://tenmo.test:9000/".to_string(),
        )];

        let config = envy::prefixed("TENMO_").from_iter::<_, ClientConfig>(vars).unwrap();

        assert_eq!(config.api_base_url, "http://tenmo.test:9000/");
    }
}
