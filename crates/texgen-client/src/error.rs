use texgen_core::{EngineError, GraphError};
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
