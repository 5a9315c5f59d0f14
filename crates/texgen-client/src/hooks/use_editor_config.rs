//! Editor configuration persisted in localStorage.

use texgen_core::EditorConfig;
use yew::prelude::*;

use super::use_localstorage::read_raw;
use crate::hooks::use_localstorage;

const EDITOR_CONFIG_KEY: &str = "$texgen$/config/editor";

/// Reads the stored config outside of a component. Invalid or missing entries yield defaults.
pub fn load_editor_config() -> EditorConfig {
    match read_raw(EDITOR_CONFIG_KEY).as_deref().map(EditorConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            // tracing is not installed yet when main calls this.
            gloo::console::warn!(format!("Ignoring stored editor config: {err}"));
            EditorConfig::default()
        }
        None => EditorConfig::default(),
    }
}

#[hook]
pub fn use_editor_config() -> UseStateHandle<EditorConfig> {
    let config = use_localstorage(EDITOR_CONFIG_KEY, EditorConfig::default);
    {
        let config = config.clone();
        use_effect_with((), move |()| {
            if let Err(err) = config.validate() {
                tracing::warn!("Stored editor config rejected ({}), using defaults", err);
                config.set(EditorConfig::default());
            }
            || ()
        });
    }
    config
}
