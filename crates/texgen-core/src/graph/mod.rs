//! Texture node graph: node storage, links, placement and hit-testing.
//!
//! Nodes live in a `StableGraph`, so a [`NodeId`] stays valid for the lifetime of the
//! graph. Edges point from a producing node into a named input port of the consumer.

mod engine;
mod generate;
pub mod library;
mod value;

pub use library::{Gradient, Noise, NodeKind, Sample};
pub use value::Value;

use image::RgbaImage;
use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use crate::config::EditorConfig;
use crate::engine::NodeId;
use crate::interaction::PointerPosition;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Node {0} cannot link to itself")]
    SelfLink(NodeId),
    #[error("Linking {from} -> {to} would create a cycle")]
    Cycle { from: NodeId, to: NodeId },
    #[error("Node {node} has no input port '{port}'")]
    UnknownPort { node: NodeId, port: String },
    #[error("Graph already has an output node")]
    DuplicateOutput,
    #[error("Gradient needs at least two stops, got {0}")]
    InvalidGradient(usize),
    #[error("Cannot render into an empty {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },
}

/// Where a node sits on the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Top-left corner
    pub position: (i64, i64),
    pub size: (u32, u32),
    /// Higher values are drawn (and hit) on top
    pub z_index: i32,
    pub color: [u8; 4],
}

impl Placement {
    /// Inclusive rectangle test.
    #[allow(clippy::cast_precision_loss)]
    pub fn contains(&self, at: PointerPosition) -> bool {
        let (left, top) = (self.position.0 as f64, self.position.1 as f64);
        let right = left + f64::from(self.size.0);
        let bottom = top + f64::from(self.size.1);
        at.x >= left && at.x <= right && at.y >= top && at.y <= bottom
    }

    pub fn center(&self) -> (i64, i64) {
        (
            self.position.0.saturating_add(i64::from(self.size.0 / 2)),
            self.position.1.saturating_add(i64::from(self.size.1 / 2)),
        )
    }
}

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub name: String,
    pub kind: NodeKind,
    pub placement: Placement,
}

/// Edge payload: the consumer's input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub port: &'static str,
}

const NODE_SIZE: (u32, u32) = (140, 70);

pub(crate) fn node_index(id: NodeId) -> NodeIndex {
    NodeIndex::new(id.raw() as usize)
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn node_id(index: NodeIndex) -> NodeId {
    NodeId::new(index.index() as u32)
}

/// Procedural texture graph with a single output node.
#[derive(Debug, Clone)]
pub struct NodeGraph {
    graph: StableDiGraph<GraphNode, Link>,
    output: NodeIndex,
    next_z: i32,
    selection: Option<NodeId>,
    preview_size: u32,
    preview: Option<RgbaImage>,
}

impl NodeGraph {
    /// Creates a graph holding only the output node, at the canvas origin.
    pub fn new(preview_size: u32) -> Self {
        let mut graph = StableDiGraph::new();
        let output = graph.add_node(GraphNode {
            name: NodeKind::Output.label().to_string(),
            placement: Placement {
                position: (0, 0),
                size: (preview_size.saturating_add(10), preview_size.saturating_add(31)),
                z_index: 0,
                color: [240, 240, 240, 255],
            },
            kind: NodeKind::Output,
        });

        Self {
            graph,
            output,
            next_z: 1,
            selection: None,
            preview_size,
            preview: None,
        }
    }

    /// The default editor graph: noise-driven mix of two colours.
    pub fn demo(config: &EditorConfig) -> Result<Self, GraphError> {
        let mut graph = Self::new(config.preview_size);
        let scale = config.noise.scale;

        let noise = graph.add_node(
            "Noise",
            NodeKind::Noise(
                Noise::new(config.noise.seed)
                    .with_scale([scale, scale, 1.0])
                    .with_offset(config.noise.offset),
            ),
            (40, 40),
        )?;
        let first = graph.add_node("Static", NodeKind::Constant(Value::rgb(255, 0, 100)), (40, 200))?;
        let second = graph.add_node("Static", NodeKind::Constant(Value::rgb(0, 255, 150)), (40, 360))?;
        let mix = graph.add_node("Mix", NodeKind::Mix, (280, 200))?;
        let output = graph.output_node();

        graph.connect(noise, mix, "factor")?;
        graph.connect(first, mix, "first")?;
        graph.connect(second, mix, "second")?;
        graph.connect(mix, output, "input")?;
        graph.move_node_to(output, 520, 160)?;

        Ok(graph)
    }

    /// Adds a node on top of every existing one.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        position: (i64, i64),
    ) -> Result<NodeId, GraphError> {
        if matches!(kind, NodeKind::Output) {
            return Err(GraphError::DuplicateOutput);
        }

        let color = match &kind {
            NodeKind::Constant(value) => {
                let [r, g, b, _] = value.to_pixel().0;
                [r, g, b, 255]
            }
            NodeKind::Noise(_) => [200, 200, 200, 255],
            NodeKind::Gradient(_) => [230, 230, 230, 255],
            NodeKind::Mix => [0, 255, 100, 255],
            NodeKind::Invert => [180, 180, 255, 255],
            NodeKind::Checker { .. } => [255, 220, 150, 255],
            NodeKind::Output => [240, 240, 240, 255],
        };
        let placement = Placement {
            position,
            size: NODE_SIZE,
            z_index: self.next_z,
            color,
        };
        self.next_z += 1;

        let name = name.into();
        let index = self.graph.add_node(GraphNode {
            name,
            kind,
            placement,
        });
        tracing::debug!(node = %node_id(index), "Node added");
        Ok(node_id(index))
    }

    /// Links `from` into `port` of `to`, replacing any link already bound to that port.
    pub fn connect(&mut self, from: NodeId, to: NodeId, port: &str) -> Result<(), GraphError> {
        let source = self.checked(from)?;
        let target = self.checked(to)?;
        if from == to {
            return Err(GraphError::SelfLink(from));
        }

        let port = self.graph[target]
            .kind
            .port(port)
            .ok_or_else(|| GraphError::UnknownPort {
                node: to,
                port: port.to_string(),
            })?;

        if has_path_connecting(&self.graph, target, source, None) {
            return Err(GraphError::Cycle { from, to });
        }

        let bound = self
            .graph
            .edges_directed(target, Direction::Incoming)
            .find(|edge| edge.weight().port == port)
            .map(|edge| edge.id());
        if let Some(edge) = bound {
            self.graph.remove_edge(edge);
        }

        self.graph.add_edge(source, target, Link { port });
        tracing::debug!(%from, %to, port, "Nodes linked");
        Ok(())
    }

    pub fn output_node(&self) -> NodeId {
        node_id(self.output)
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.graph.node_weight(node_index(id))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.graph
            .node_indices()
            .map(|index| (node_id(index), &self.graph[index]))
    }

    /// Nodes in draw order: ascending z-index, insertion order within equal z.
    pub fn nodes_by_depth(&self) -> Vec<(NodeId, &GraphNode)> {
        let mut nodes: Vec<_> = self.nodes().collect();
        nodes.sort_by_key(|(_, node)| node.placement.z_index);
        nodes
    }

    /// `(from, to, port)` for every link.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId, &'static str)> + '_ {
        self.graph.edge_indices().filter_map(|edge| {
            let (source, target) = self.graph.edge_endpoints(edge)?;
            Some((node_id(source), node_id(target), self.graph[edge].port))
        })
    }

    /// Producers bound to the input ports of `index`.
    pub(crate) fn inputs(&self, index: NodeIndex) -> impl Iterator<Item = (&'static str, NodeIndex)> + '_ {
        self.graph
            .edges_directed(index, Direction::Incoming)
            .map(|edge| (edge.weight().port, edge.source()))
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<GraphNode, Link> {
        &self.graph
    }

    pub(crate) fn output_index(&self) -> NodeIndex {
        self.output
    }

    /// Topmost node containing `at`, if any.
    pub fn node_at(&self, at: PointerPosition) -> Option<NodeId> {
        self.graph
            .node_indices()
            .filter(|&index| self.graph[index].placement.contains(at))
            .max_by_key(|&index| self.graph[index].placement.z_index)
            .map(node_id)
    }

    /// Hit-tests `at` and stores the result as the selection. A miss clears it.
    pub fn select_at(&mut self, at: PointerPosition) -> Option<NodeId> {
        self.selection = self.node_at(at);
        self.selection
    }

    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    pub fn move_node_by(&mut self, id: NodeId, dx: i64, dy: i64) -> Result<(), GraphError> {
        let index = self.checked(id)?;
        let position = &mut self.graph[index].placement.position;
        position.0 = position.0.saturating_add(dx);
        position.1 = position.1.saturating_add(dy);
        Ok(())
    }

    pub fn move_node_to(&mut self, id: NodeId, x: i64, y: i64) -> Result<(), GraphError> {
        let index = self.checked(id)?;
        self.graph[index].placement.position = (x, y);
        Ok(())
    }

    pub fn preview_size(&self) -> u32 {
        self.preview_size
    }

    /// Texture drawn inside the output node, once generated.
    pub fn preview(&self) -> Option<&RgbaImage> {
        self.preview.as_ref()
    }

    pub fn refresh_preview(&mut self) -> Result<(), GraphError> {
        let size = crate::engine::SurfaceSize::new(self.preview_size, self.preview_size);
        self.preview = Some(self.generate(size)?);
        Ok(())
    }

    fn checked(&self, id: NodeId) -> Result<NodeIndex, GraphError> {
        let index = node_index(id);
        if self.graph.contains_node(index) {
            Ok(index)
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }
}
