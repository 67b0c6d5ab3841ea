use std::{env, time::Duration};

use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: Url,
    pub device_id: Option<String>,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = env::var("POS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url)?;
        let device_id = env::var("POS_DEVICE_ID").ok().filter(|id| !id.is_empty());
        let http_timeout = env::var("POS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        Ok(Self {
            api_url,
            device_id,
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}
