//! Rasterises a [`NodeGraph`] for the editor canvas.

use image::{Rgba, RgbaImage};

use crate::graph::{GraphNode, NodeGraph, NodeKind, Placement};
use crate::raster::{self, GLYPH_SIZE};

const BACKGROUND: Rgba<u8> = Rgba([26, 26, 46, 255]);
const LINK_COLOR: Rgba<u8> = Rgba([15, 75, 165, 255]);
const LINK_WIDTH: u32 = 5;
const HIGHLIGHT: Rgba<u8> = Rgba([255, 200, 0, 255]);
const HIGHLIGHT_WIDTH: u32 = 3;
const LABEL_SCALE: u32 = 2;
const PADDING: u32 = 5;

/// Redraws the whole graph into `image`, keeping its dimensions.
pub fn draw_graph(graph: &NodeGraph, image: &mut RgbaImage) {
    raster::fill(image, BACKGROUND);

    for (from, to, _) in graph.links() {
        let (Some(from), Some(to)) = (graph.node(from), graph.node(to)) else {
            continue;
        };
        let start = from.placement.center();
        let end = to.placement.center();
        if start != end {
            raster::draw_line(image, start, end, LINK_WIDTH, LINK_COLOR);
        }
    }

    for (id, node) in graph.nodes_by_depth() {
        if !on_surface(&node.placement, image) {
            continue;
        }
        draw_node(graph, node, image);
        if graph.selection() == Some(id) {
            let placement = &node.placement;
            raster::stroke_rect(
                image,
                placement.position,
                placement.size,
                HIGHLIGHT_WIDTH,
                HIGHLIGHT,
            );
        }
    }
}

/// Whether any part of the node body lands on the image.
fn on_surface(placement: &Placement, image: &RgbaImage) -> bool {
    let (x, y) = placement.position;
    let (w, h) = placement.size;
    x < i64::from(image.width())
        && y < i64::from(image.height())
        && x.saturating_add(i64::from(w)) > 0
        && y.saturating_add(i64::from(h)) > 0
}

fn draw_node(graph: &NodeGraph, node: &GraphNode, image: &mut RgbaImage) {
    let placement = &node.placement;
    let (x, y) = placement.position;
    let (w, h) = placement.size;
    raster::fill_rect(image, placement.position, placement.size, Rgba(placement.color));

    let pad = i64::from(PADDING);
    let label_height = i64::from(GLYPH_SIZE * LABEL_SCALE);
    let inner_width = w.saturating_sub(2 * PADDING);
    let label = fit_label(&node.name, inner_width);
    raster::draw_text(
        image,
        (x + pad, y + pad),
        label,
        label_color(placement.color),
        LABEL_SCALE,
    );

    let body_top = y + pad + label_height + pad;
    let body_height = u32::try_from(y + i64::from(h) - pad - body_top).unwrap_or(0);

    match &node.kind {
        NodeKind::Gradient(gradient) => {
            let strip_height = body_height.min(GLYPH_SIZE * LABEL_SCALE);
            for column in 0..inner_width {
                let t = f64::from(column) / f64::from(inner_width.saturating_sub(1).max(1));
                let color = gradient.sample(t).to_pixel();
                raster::fill_rect(
                    image,
                    (x + pad + i64::from(column), body_top),
                    (1, strip_height),
                    color,
                );
            }
        }
        NodeKind::Output => {
            if let Some(preview) = graph.preview() {
                let side = graph.preview_size().min(inner_width).min(body_height);
                raster::blit_scaled(image, preview, (x + pad, body_top), (side, side));
            }
        }
        _ => {}
    }
}

/// Longest prefix of `name` that fits in `width` pixels.
fn fit_label(name: &str, width: u32) -> &str {
    let mut end = 0;
    for (start, ch) in name.char_indices() {
        let next = start + ch.len_utf8();
        if raster::text_width(&name[..next], LABEL_SCALE) > width {
            break;
        }
        end = next;
    }
    &name[..end]
}

/// Black on light bodies, white on dark ones.
fn label_color(body: [u8; 4]) -> Rgba<u8> {
    let [r, g, b, _] = body.map(u32::from);
    let luma = (299 * r + 587 * g + 114 * b) / 1000;
    if luma < 128 {
        Rgba([255, 255, 255, 255])
    } else {
        Rgba([0, 0, 0, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::graph::{Gradient, Value};
    use crate::interaction::PointerPosition;

    #[test]
    fn test_background_fill() {
        let graph = {
            let mut graph = NodeGraph::new(10);
            graph.move_node_to(graph.output_node(), 1000, 1000).unwrap();
            graph
        };
        let mut image = RgbaImage::new(20, 20);
        draw_graph(&graph, &mut image);

        assert!(image.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_node_body_drawn_at_position() {
        let mut graph = NodeGraph::new(10);
        graph.move_node_to(graph.output_node(), 1000, 1000).unwrap();
        graph
            .add_node("", NodeKind::Constant(Value::rgb(10, 200, 30)), (50, 60))
            .unwrap();

        let mut image = RgbaImage::new(300, 200);
        draw_graph(&graph, &mut image);

        assert_eq!(*image.get_pixel(50, 60), Rgba([10, 200, 30, 255]));
        assert_eq!(*image.get_pixel(189, 129), Rgba([10, 200, 30, 255]));
        assert_eq!(*image.get_pixel(49, 60), BACKGROUND);
        assert_eq!(*image.get_pixel(190, 60), BACKGROUND);
    }

    #[test]
    fn test_link_drawn_between_centres() {
        let mut graph = NodeGraph::new(10);
        let output = graph.output_node();
        graph.move_node_to(output, 1000, 1000).unwrap();
        let a = graph
            .add_node("", NodeKind::Constant(Value::rgb(0, 0, 0)), (0, 0))
            .unwrap();
        let b = graph.add_node("", NodeKind::Invert, (400, 0)).unwrap();
        graph.connect(a, b, "input").unwrap();

        let mut image = RgbaImage::new(600, 100);
        draw_graph(&graph, &mut image);

        // Between the two bodies, on the centre line.
        assert_eq!(*image.get_pixel(300, 35), LINK_COLOR);
        assert_eq!(*image.get_pixel(300, 10), BACKGROUND);
    }

    #[test]
    fn test_selection_highlight() {
        let mut graph = NodeGraph::new(10);
        graph.move_node_to(graph.output_node(), 1000, 1000).unwrap();
        graph.add_node("", NodeKind::Mix, (10, 10)).unwrap();

        let mut image = RgbaImage::new(200, 100);
        draw_graph(&graph, &mut image);
        assert_ne!(*image.get_pixel(10, 10), HIGHLIGHT);

        graph.select_at(PointerPosition::new(20.0, 20.0));
        draw_graph(&graph, &mut image);
        assert_eq!(*image.get_pixel(10, 10), HIGHLIGHT);
        assert_eq!(*image.get_pixel(149, 79), HIGHLIGHT);
    }

    #[test]
    fn test_gradient_strip() {
        let mut graph = NodeGraph::new(10);
        graph.move_node_to(graph.output_node(), 1000, 1000).unwrap();
        let gradient = Gradient::new(vec![
            (Value::rgb(0, 0, 0), 0.0),
            (Value::rgb(255, 255, 255), 1.0),
        ])
        .unwrap();
        graph.add_node("", NodeKind::Gradient(gradient), (0, 0)).unwrap();

        let mut image = RgbaImage::new(200, 100);
        draw_graph(&graph, &mut image);

        // Strip starts below the label row.
        assert_eq!(*image.get_pixel(5, 26), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(134, 26), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_output_preview_blitted() {
        let mut graph = NodeGraph::new(4);
        let color = graph
            .add_node("", NodeKind::Constant(Value::rgb(1, 2, 3)), (500, 500))
            .unwrap();
        graph.connect(color, graph.output_node(), "input").unwrap();
        graph.refresh_preview().unwrap();

        let mut image = RgbaImage::new(100, 100);
        draw_graph(&graph, &mut image);

        assert_eq!(*image.get_pixel(5, 26), Rgba([1, 2, 3, 255]));
        assert_eq!(*image.get_pixel(8, 29), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_far_away_nodes_are_skipped() {
        let mut graph = NodeGraph::demo(&EditorConfig::default()).unwrap();
        let output = graph.output_node();
        let mut image = RgbaImage::new(50, 50);

        graph.move_node_to(output, i64::MAX - 5, 0).unwrap();
        draw_graph(&graph, &mut image);

        graph.move_node_to(output, 20_000_000, 0).unwrap();
        draw_graph(&graph, &mut image);

        graph.move_node_to(output, i64::MIN, i64::MIN).unwrap();
        draw_graph(&graph, &mut image);
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn test_fit_label() {
        assert_eq!(fit_label("Gradient", 130), "Gradient");
        assert_eq!(fit_label("Gradient", 50), "Gra");
        assert_eq!(fit_label("Mix", 0), "");
        assert_eq!(fit_label("Über", 32), "Üb");
    }

    #[test]
    fn test_label_color() {
        assert_eq!(label_color([255, 255, 255, 255]), Rgba([0, 0, 0, 255]));
        assert_eq!(label_color([20, 0, 40, 255]), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_demo_renders() {
        let mut graph = NodeGraph::demo(&EditorConfig::default()).unwrap();
        graph.refresh_preview().unwrap();

        let mut image = RgbaImage::new(800, 600);
        draw_graph(&graph, &mut image);
        assert!(image.pixels().any(|p| *p == LINK_COLOR));
    }
}
