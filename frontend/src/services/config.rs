use anyhow::{Context, Result};
use shared::WidgetConfig;

use crate::services::logging::Logger;

/// Id of the optional `<script type="application/json">` override block.
pub const CONFIG_ELEMENT_ID: &str = "odometer-config";

/// Read the page's override block, falling back to defaults.
pub fn load_or_default() -> WidgetConfig {
    let block = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match config_from_block(block) {
        Ok(config) => config,
        Err(e) => {
            Logger::warn_with_component("config", &format!("{:#}; using defaults", e));
            WidgetConfig::default()
        }
    }
}

pub fn config_from_block(block: Option<String>) -> Result<WidgetConfig> {
    match block {
        Some(text) if !text.trim().is_empty() => WidgetConfig::from_json(&text)
            .with_context(|| format!("Could not apply #{}", CONFIG_ELEMENT_ID)),
        _ => Ok(WidgetConfig::default()),
    }
}
