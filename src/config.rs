const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub struct Configuration {
    pub analyzer_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub capture_buffer_size: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            analyzer_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            capture_buffer_size: 4,
        }
    }
}

impl Configuration {
    // The analyzer endpoint is environment-provided; anything unset falls
    // back to the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            analyzer_base_url: std::env::var("MEALSNAP_ANALYZER_URL")
                .unwrap_or(defaults.analyzer_base_url),
            request_timeout_secs: env_u64(
                "MEALSNAP_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            connect_timeout_secs: env_u64(
                "MEALSNAP_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            ),
            capture_buffer_size: env_usize(
                "MEALSNAP_CAPTURE_BUFFER_SIZE",
                defaults.capture_buffer_size,
            ),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
