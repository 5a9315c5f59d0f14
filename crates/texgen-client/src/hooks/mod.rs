mod use_editor_config;
mod use_localstorage;

pub use use_editor_config::{load_editor_config, use_editor_config};
pub use use_localstorage::use_localstorage;
