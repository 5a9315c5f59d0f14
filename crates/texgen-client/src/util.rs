use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::ClientError;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, ClientError> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| ClientError::Js("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ClientError::Js("context is not a CanvasRenderingContext2d".to_string()))
}
