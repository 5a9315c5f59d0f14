use image::RgbaImage;

use super::{GraphError, NodeGraph};
use crate::engine::{DeltaPrecision, EngineError, GraphEngine, NodeId, SurfaceSize};
use crate::interaction::{PointerDelta, PointerPosition};
use crate::render;

/// Node positions are integers, so the controller hands over whole-pixel deltas.
impl GraphEngine for NodeGraph {
    type Surface = RgbaImage;

    const DELTA_PRECISION: DeltaPrecision = DeltaPrecision::Whole;

    fn initialize(&mut self) -> Result<(), EngineError> {
        self.refresh_preview()?;
        tracing::info!(
            preview_size = self.preview_size(),
            nodes = self.node_count(),
            "Graph initialized"
        );
        Ok(())
    }

    fn hit_test(&mut self, surface: &mut RgbaImage, at: PointerPosition) -> Result<(), EngineError> {
        self.select_at(at);
        if surface.width() > 0 && surface.height() > 0 {
            render::draw_graph(self, surface);
        }
        Ok(())
    }

    fn active_selection(&self) -> Option<NodeId> {
        self.selection()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn move_node(&mut self, node: NodeId, delta: PointerDelta) -> Result<(), EngineError> {
        self.move_node_by(node, delta.dx.round() as i64, delta.dy.round() as i64)
            .map_err(|err| match err {
                GraphError::UnknownNode(id) => EngineError::UnknownNode(id),
                other => EngineError::Graph(other),
            })
    }

    fn redraw(&mut self, surface: &mut RgbaImage, size: SurfaceSize) -> Result<(), EngineError> {
        if size.is_empty() {
            return Err(GraphError::EmptySurface {
                width: size.width,
                height: size.height,
            }
            .into());
        }
        if surface.dimensions() != (size.width, size.height) {
            *surface = RgbaImage::new(size.width, size.height);
        }
        render::draw_graph(self, surface);
        Ok(())
    }

    fn render_scene(&mut self, surface: &mut RgbaImage, size: SurfaceSize) -> Result<(), EngineError> {
        *surface = self.generate(size)?;
        Ok(())
    }
}
