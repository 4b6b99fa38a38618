//! Reads the runtime configuration the host document publishes before start-up.

use common::runtime_config::RuntimeConfig;

/// Global the host document sets (`window.config`).
pub const HOST_CONFIG_GLOBAL: &str = "config";
/// Fallback for non-web targets: JSON in this environment variable.
pub const HOST_CONFIG_ENV: &str = "CHATBOT_CONFIG";

#[cfg(target_arch = "wasm32")]
pub fn load_runtime_config() -> anyhow::Result<RuntimeConfig> {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return Ok(RuntimeConfig::default());
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(HOST_CONFIG_GLOBAL))
        .map_err(|e| anyhow::anyhow!("Failed to read window.{}: {:?}", HOST_CONFIG_GLOBAL, e))?;
    if value.is_undefined() || value.is_null() {
        return Ok(RuntimeConfig::default());
    }
    let json: serde_json::Value = serde_wasm_bindgen::from_value(value)
        .map_err(|e| anyhow::anyhow!("Failed to convert window.{}: {}", HOST_CONFIG_GLOBAL, e))?;
    Ok(RuntimeConfig::from_value(json)?)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_runtime_config() -> anyhow::Result<RuntimeConfig> {
    match std::env::var(HOST_CONFIG_ENV) {
        Ok(json) => Ok(RuntimeConfig::from_json_str(&json)?),
        Err(_) => Ok(RuntimeConfig::default()),
    }
}
