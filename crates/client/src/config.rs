/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend. In production,
/// override via environment variables (or a `.env` file loaded by the
/// binary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without the `/api` suffix (default: `http://localhost:5000`).
    pub api_url: String,
    /// Bearer token sent with every request, if set.
    pub api_token: Option<String>,
    /// Whole-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// TCP connect timeout in seconds (default: `10`).
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            api_token: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HRPORTAL_API_URL`     | `http://localhost:5000`  |
    /// | `HRPORTAL_API_TOKEN`   | (none)                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `CONNECT_TIMEOUT_SECS` | `10`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("HRPORTAL_API_URL") {
            Some(url) => parse_base_url(&url)?,
            None => defaults.api_url,
        };

        let api_token = lookup("HRPORTAL_API_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let request_timeout_secs = parse_secs(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS"),
            defaults.request_timeout_secs,
        )?;
        let connect_timeout_secs = parse_secs(
            "CONNECT_TIMEOUT_SECS",
            lookup("CONNECT_TIMEOUT_SECS"),
            defaults.connect_timeout_secs,
        )?;

        Ok(Self {
            api_url,
            api_token,
            request_timeout_secs,
            connect_timeout_secs,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError {
            var: "HRPORTAL_API_URL",
            message: format!("must be an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url.to_string())
}

fn parse_secs(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError {
            var,
            message: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError {
            var,
            message: format!("'{raw}' is not a number of seconds ({e})"),
        }),
    }
}
