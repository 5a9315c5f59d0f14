//! Per-pixel evaluation of the output node.

use std::collections::HashMap;

use image::RgbaImage;
use petgraph::algo::{has_path_connecting, toposort};
use petgraph::stable_graph::NodeIndex;

use super::library::{NodeKind, Sample};
use super::value::Value;
use super::{GraphError, NodeGraph, node_id};
use crate::engine::SurfaceSize;

/// One node in evaluation order, with its inputs resolved to earlier slots.
struct Step<'a> {
    kind: &'a NodeKind,
    inputs: Vec<(&'static str, usize)>,
}

impl NodeGraph {
    /// Renders the texture produced by the output node.
    pub fn generate(&self, size: SurfaceSize) -> Result<RgbaImage, GraphError> {
        if size.is_empty() {
            return Err(GraphError::EmptySurface {
                width: size.width,
                height: size.height,
            });
        }

        let (plan, output) = self.plan()?;
        let mut values = vec![Value::Nothing; plan.len()];

        let image = RgbaImage::from_fn(size.width, size.height, |x, y| {
            let sample = Sample {
                x,
                y,
                width: size.width,
                height: size.height,
            };
            for (slot, step) in plan.iter().enumerate() {
                let value = step.kind.evaluate(sample, |port| {
                    step.inputs
                        .iter()
                        .find(|(name, _)| *name == port)
                        .map_or(Value::Nothing, |&(_, source)| values[source])
                });
                values[slot] = value;
            }
            values[output].to_pixel()
        });

        tracing::debug!(
            width = size.width,
            height = size.height,
            nodes = plan.len(),
            "Texture generated"
        );
        Ok(image)
    }

    /// Nodes feeding the output, dependencies first, and the output's slot.
    fn plan(&self) -> Result<(Vec<Step<'_>>, usize), GraphError> {
        let graph = self.inner();
        let output = self.output_index();

        let order = toposort(graph, None).map_err(|cycle| {
            let node = node_id(cycle.node_id());
            GraphError::Cycle { from: node, to: node }
        })?;

        let order: Vec<NodeIndex> = order
            .into_iter()
            .filter(|&index| has_path_connecting(graph, index, output, None))
            .collect();
        let slots: HashMap<NodeIndex, usize> = order
            .iter()
            .enumerate()
            .map(|(slot, &index)| (index, slot))
            .collect();

        let plan = order
            .iter()
            .map(|&index| Step {
                kind: &graph[index].kind,
                inputs: self
                    .inputs(index)
                    .filter_map(|(port, source)| Some((port, *slots.get(&source)?)))
                    .collect(),
            })
            .collect();

        Ok((plan, slots[&output]))
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::config::EditorConfig;

    #[test]
    fn test_empty_size_rejected() {
        let graph = NodeGraph::new(10);
        assert!(matches!(
            graph.generate(SurfaceSize::new(0, 4)),
            Err(GraphError::EmptySurface { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_unconnected_output_is_transparent() {
        let graph = NodeGraph::new(10);
        let image = graph.generate(SurfaceSize::new(3, 2)).unwrap();

        assert_eq!(image.dimensions(), (3, 2));
        assert!(image.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_constant_through_invert() {
        let mut graph = NodeGraph::new(10);
        let color = graph
            .add_node("Static", NodeKind::Constant(Value::rgb(255, 0, 100)), (0, 0))
            .unwrap();
        let invert = graph.add_node("Invert", NodeKind::Invert, (0, 0)).unwrap();
        graph.connect(color, invert, "input").unwrap();
        graph.connect(invert, graph.output_node(), "input").unwrap();

        let image = graph.generate(SurfaceSize::new(4, 4)).unwrap();
        assert!(image.pixels().all(|p| *p == Rgba([0, 255, 155, 255])));
    }

    #[test]
    fn test_unreachable_nodes_are_skipped() {
        let mut graph = NodeGraph::new(10);
        let used = graph
            .add_node("Static", NodeKind::Constant(Value::rgb(9, 9, 9)), (0, 0))
            .unwrap();
        graph
            .add_node("Static", NodeKind::Constant(Value::rgb(1, 1, 1)), (0, 0))
            .unwrap();
        graph.connect(used, graph.output_node(), "input").unwrap();

        let (plan, output) = graph.plan().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(output, 1);
    }

    #[test]
    fn test_checker_pattern() {
        let mut graph = NodeGraph::new(10);
        let white = graph
            .add_node("Static", NodeKind::Constant(Value::rgb(255, 255, 255)), (0, 0))
            .unwrap();
        let checker = graph
            .add_node("Checker", NodeKind::Checker { cell: 1 }, (0, 0))
            .unwrap();
        graph.connect(white, checker, "input").unwrap();
        graph.connect(checker, graph.output_node(), "input").unwrap();

        let image = graph.generate(SurfaceSize::new(2, 2)).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(1, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_demo_output_blends_between_inputs() {
        let graph = NodeGraph::demo(&EditorConfig::default()).unwrap();
        let image = graph.generate(SurfaceSize::new(16, 16)).unwrap();

        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            assert_eq!(a, 255);
            assert!((254..=256).contains(&(u16::from(r) + u16::from(g))));
            assert!((100..=150).contains(&b));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let graph = NodeGraph::demo(&EditorConfig::default()).unwrap();
        let a = graph.generate(SurfaceSize::new(8, 8)).unwrap();
        let b = graph.generate(SurfaceSize::new(8, 8)).unwrap();
        assert_eq!(a, b);
    }
}
