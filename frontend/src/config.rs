use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    pub enabled: bool,
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: 2,
            base_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub retry: RetryConfig,
    pub log_level: log::LevelFilter,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryConfig::default(),
            log_level: log::LevelFilter::Info,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RetryOverrides {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub base_delay_ms: Option<u64>,
}

/// One partially-filled configuration source (env.js, window config,
/// `config.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,
    #[serde(default, alias = "RETRY")]
    pub retry: Option<RetryOverrides>,
    #[serde(default, alias = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Merges sources in priority order: the first layer that sets a field wins.
pub fn resolve(layers: &[ConfigOverrides]) -> RuntimeConfig {
    let defaults = RuntimeConfig::default();
    let api_base_url = layers
        .iter()
        .find_map(|layer| layer.api_base_url.clone())
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or(defaults.api_base_url);
    let request_timeout_ms = layers
        .iter()
        .find_map(|layer| layer.request_timeout_ms)
        .filter(|ms| *ms > 0)
        .unwrap_or(defaults.request_timeout_ms);
    let retries = || layers.iter().filter_map(|layer| layer.retry.as_ref());
    let retry = RetryConfig {
        enabled: retries()
            .find_map(|r| r.enabled)
            .unwrap_or(defaults.retry.enabled),
        max_retries: retries()
            .find_map(|r| r.max_retries)
            .unwrap_or(defaults.retry.max_retries),
        base_delay_ms: retries()
            .find_map(|r| r.base_delay_ms)
            .unwrap_or(defaults.retry.base_delay_ms),
    };
    let log_level = layers
        .iter()
        .find_map(|layer| layer.log_level.as_deref())
        .and_then(|level| level.parse().ok())
        .unwrap_or(defaults.log_level);
    RuntimeConfig {
        api_base_url,
        request_timeout_ms,
        retry,
        log_level,
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Resolved configuration, or the defaults before [`init`] completes.
pub fn current() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::ConfigOverrides;
    use wasm_bindgen::JsValue;

    fn read_global(name: &str) -> Option<ConfigOverrides> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let json = js_sys::JSON::stringify(&value).ok()?.as_string()?;
        match serde_json::from_str(&json) {
            Ok(overrides) => Some(overrides),
            Err(err) => {
                log::warn!("ignoring malformed {}: {}", name, err);
                None
            }
        }
    }

    pub fn from_env_js() -> Option<ConfigOverrides> {
        read_global("__ATTENDANCE_ENV")
    }

    pub fn from_window_config() -> Option<ConfigOverrides> {
        read_global("__ATTENDANCE_CONFIG")
    }

    pub async fn from_config_json() -> Option<ConfigOverrides> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<ConfigOverrides>().await.ok()
    }
}

#[cfg(target_arch = "wasm32")]
async fn load_layers() -> Vec<ConfigOverrides> {
    let mut layers: Vec<ConfigOverrides> = [browser::from_env_js(), browser::from_window_config()]
        .into_iter()
        .flatten()
        .collect();
    if layers.iter().all(|layer| layer.api_base_url.is_none()) {
        if let Some(file) = browser::from_config_json().await {
            layers.push(file);
        } else {
            log::info!("no runtime config found, using defaults");
        }
    }
    layers
}

#[cfg(not(target_arch = "wasm32"))]
async fn load_layers() -> Vec<ConfigOverrides> {
    Vec::new()
}

pub async fn init() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    let resolved = resolve(&load_layers().await);
    RUNTIME_CONFIG.get_or_init(|| resolved).clone()
}
