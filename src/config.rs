/// Application-level constants
pub const APP_NAME: &str = "docfinder";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Remote JSON list of doctors
pub const DEFAULT_SOURCE_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Suggestions shown under the search box
pub const SUGGESTION_LIMIT: usize = 3;

pub const ENV_SOURCE_URL: &str = "DOCFINDER_SOURCE_URL";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "DOCFINDER_FETCH_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    "docfinder_lib=info"
}

/// Runtime settings for the practitioner source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub source_url: String,
    pub fetch_timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl DirectoryConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`. Blank or invalid values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_SOURCE_URL)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
        {
            config.source_url = url;
        }

        if let Some(raw) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.fetch_timeout_secs = secs,
                _ => tracing::warn!(
                    value = %raw,
                    "Ignoring invalid {ENV_FETCH_TIMEOUT_SECS}"
                ),
            }
        }

        config
    }
}
