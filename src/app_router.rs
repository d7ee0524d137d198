use web_sys::UrlSearchParams;

use meshpaint_core::{EXPORT_SCALE_DEFAULT, EXPORT_SCALE_MAX};

pub(crate) const GENERATE_DELAY_MS_DEFAULT: u32 = 500;
pub(crate) const GENERATE_DELAY_MS_MAX: u32 = 10_000;
pub(crate) const EXPORT_SCALE_MIN: u32 = 1;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InitConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) generate_delay_ms: u32,
    pub(crate) export_scale: u32,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            seed: None,
            generate_delay_ms: GENERATE_DELAY_MS_DEFAULT,
            export_scale: EXPORT_SCALE_DEFAULT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("'{key}' must be an unsigned integer, got '{value}'")]
    NotANumber { key: &'static str, value: String },
    #[error("'{key}' must be within {min}..={max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

pub(crate) fn load_init_config() -> InitConfig {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    let (config, errors) = parse_init_config(&search);
    for err in errors {
        gloo::console::warn!("ignoring url parameter", err.to_string());
    }
    config
}

/// Reads `seed`, `delay` and `scale` from a query string. Bad values fall
/// back to their defaults and are reported alongside the config.
pub(crate) fn parse_init_config(search: &str) -> (InitConfig, Vec<ConfigError>) {
    let mut config = InitConfig::default();
    let mut errors = Vec::new();
    let search = search.trim();
    if search.is_empty() {
        return (config, errors);
    }
    let Ok(params) = UrlSearchParams::new_with_str(search) else {
        return (config, errors);
    };
    if let Some(raw) = params.get("seed") {
        match parse_u64("seed", &raw) {
            Ok(seed) => config.seed = Some(seed),
            Err(err) => errors.push(err),
        }
    }
    if let Some(raw) = params.get("delay") {
        match parse_bounded("delay", &raw, 0, GENERATE_DELAY_MS_MAX) {
            Ok(delay) => config.generate_delay_ms = delay,
            Err(err) => errors.push(err),
        }
    }
    if let Some(raw) = params.get("scale") {
        match parse_bounded("scale", &raw, EXPORT_SCALE_MIN, EXPORT_SCALE_MAX) {
            Ok(scale) => config.export_scale = scale,
            Err(err) => errors.push(err),
        }
    }
    (config, errors)
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    trimmed.parse::<u64>().map_err(|_| ConfigError::NotANumber {
        key,
        value: trimmed.to_string(),
    })
}

fn parse_bounded(key: &'static str, raw: &str, min: u32, max: u32) -> Result<u32, ConfigError> {
    let value = parse_u64(key, raw)?;
    if value < min as u64 || value > max as u64 {
        return Err(ConfigError::OutOfRange {
            key,
            value,
            min: min as u64,
            max: max as u64,
        });
    }
    Ok(value as u32)
}

/// Seed for sessions that did not ask for one.
pub(crate) fn session_seed() -> u64 {
    let noise = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let now = js_sys::Date::now().max(0.0) as u64;
    noise ^ now.rotate_left(32)
}
