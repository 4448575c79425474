use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the book/recommendation service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of books shown per shelf row
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiescence window for book selection, in milliseconds
    #[serde(default = "default_select_debounce_ms")]
    pub select_debounce_ms: u64,

    /// Distance from the viewport at which images start loading
    #[serde(default = "default_image_root_margin_px")]
    pub image_root_margin_px: u32,

    /// HTTP request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://faiss-app-p2s3lyhluq-uc.a.run.app".to_string()
}

fn default_page_size() -> usize {
    6
}

fn default_select_debounce_ms() -> u64 {
    300
}

fn default_image_root_margin_px() -> u32 {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            select_debounce_ms: default_select_debounce_ms(),
            image_root_margin_px: default_image_root_margin_px(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.page_size == 0 {
            anyhow::bail!("Failed to load config: PAGE_SIZE must be positive");
        }

        Ok(config)
    }

    pub fn select_debounce(&self) -> Duration {
        Duration::from_millis(self.select_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
