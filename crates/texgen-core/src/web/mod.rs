//! Browser adapter: runs the built-in engine against a 2D canvas context.
//!
//! The graph is rasterised into an RGBA buffer and copied to the canvas with
//! `putImageData`.

pub mod wasm_entry;

use image::RgbaImage;
use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, MouseEvent};

use crate::engine::{DeltaPrecision, EngineError, GraphEngine, NodeId, SurfaceSize};
use crate::graph::NodeGraph;
use crate::interaction::{CanvasGeometry, PointerDelta, PointerInput, PointerPosition};

/// [`NodeGraph`] drawing onto a `CanvasRenderingContext2d`.
#[derive(Debug, Clone)]
pub struct CanvasEngine {
    graph: NodeGraph,
    buffer: RgbaImage,
}

impl CanvasEngine {
    pub fn new(graph: NodeGraph) -> Self {
        Self {
            graph,
            buffer: RgbaImage::new(0, 0),
        }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut NodeGraph {
        &mut self.graph
    }
}

impl GraphEngine for CanvasEngine {
    type Surface = CanvasRenderingContext2d;

    const DELTA_PRECISION: DeltaPrecision = <NodeGraph as GraphEngine>::DELTA_PRECISION;

    fn initialize(&mut self) -> Result<(), EngineError> {
        self.graph.initialize()
    }

    fn hit_test(
        &mut self,
        surface: &mut CanvasRenderingContext2d,
        at: PointerPosition,
    ) -> Result<(), EngineError> {
        self.graph.hit_test(&mut self.buffer, at)?;
        if self.buffer.width() > 0 && self.buffer.height() > 0 {
            put_image(surface, &self.buffer)?;
        }
        Ok(())
    }

    fn active_selection(&self) -> Option<NodeId> {
        self.graph.active_selection()
    }

    fn move_node(&mut self, node: NodeId, delta: PointerDelta) -> Result<(), EngineError> {
        self.graph.move_node(node, delta)
    }

    fn redraw(
        &mut self,
        surface: &mut CanvasRenderingContext2d,
        size: SurfaceSize,
    ) -> Result<(), EngineError> {
        self.graph.redraw(&mut self.buffer, size)?;
        put_image(surface, &self.buffer)
    }

    fn render_scene(
        &mut self,
        surface: &mut CanvasRenderingContext2d,
        size: SurfaceSize,
    ) -> Result<(), EngineError> {
        let mut scene = RgbaImage::new(0, 0);
        self.graph.render_scene(&mut scene, size)?;
        put_image(surface, &scene)
    }
}

fn put_image(ctx: &CanvasRenderingContext2d, image: &RgbaImage) -> Result<(), EngineError> {
    let data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(image.as_raw().as_slice()),
        image.width(),
        image.height(),
    )
    .map_err(js_error)?;
    ctx.put_image_data(&data, 0.0, 0.0).map_err(js_error)
}

pub(crate) fn js_error(err: JsValue) -> EngineError {
    EngineError::Surface(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Samples the canvas geometry used by [`crate::interaction::CoordinateMapper`].
pub fn geometry_of(canvas: &HtmlCanvasElement) -> CanvasGeometry {
    let rect = canvas.get_bounding_client_rect();
    CanvasGeometry {
        rect_left: rect.left(),
        rect_top: rect.top(),
        offset_left: f64::from(canvas.offset_left()),
        offset_top: f64::from(canvas.offset_top()),
        border_left: f64::from(canvas.client_left()),
        border_top: f64::from(canvas.client_top()),
    }
}

/// Raw coordinates of a mouse or pointer event.
pub fn pointer_input(event: &MouseEvent) -> PointerInput {
    PointerInput {
        client_x: f64::from(event.client_x()),
        client_y: f64::from(event.client_y()),
        page_x: f64::from(event.page_x()),
        page_y: f64::from(event.page_y()),
    }
}
