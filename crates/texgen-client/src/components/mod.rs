mod node_canvas;
mod scene_preview;

pub use node_canvas::NodeCanvas;
pub use scene_preview::ScenePreview;
