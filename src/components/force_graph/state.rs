use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;
use crate::network::Shape;
use crate::network::model::DEFAULT_NODE_COLOR;

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	pub border: String,
	pub shape: Shape,
	pub highlighted: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LinkStyle {
	pub visible: bool,
	pub homology: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Set once the pointer leaves the click slop.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

fn new_graph() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	links: HashMap<(DefaultNodeIdx, DefaultNodeIdx), LinkStyle>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: new_graph(),
			links: HashMap::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.sync(data);
		state
	}

	/// Rebuild the simulation from a new snapshot. Nodes that survive keep
	/// their position and pinning; new ones are placed on a ring around the
	/// origin.
	pub fn sync(&mut self, data: &GraphData) {
		let mut placed: HashMap<String, (f32, f32, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			placed.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});

		let mut graph = new_graph();
		let mut id_to_idx = HashMap::new();
		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y, is_anchor) = placed.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32, false)
			});
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color.clone().unwrap_or_else(|| DEFAULT_NODE_COLOR.into()),
					border: node.border.clone(),
					shape: node.shape,
					highlighted: node.highlighted,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		let mut links = HashMap::new();
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				// Hidden edges still pull on the layout.
				graph.add_edge(src, tgt, EdgeData::default());
				links.insert(
					(src, tgt),
					LinkStyle {
						visible: link.visible,
						homology: link.homology,
					},
				);
			}
		}

		self.graph = graph;
		self.links = links;
		self.hover = HoverState::default();
		self.drag = DragState::default();
	}

	pub fn link_style(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> LinkStyle {
		self.links.get(&(src, tgt)).copied().unwrap_or_default()
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for (&(src, tgt), style) in &self.links {
				if !style.visible {
					continue;
				}
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: None,
			color: None,
			border: "#000".into(),
			shape: Shape::Circle,
			highlighted: false,
		}
	}

	fn link(source: &str, target: &str, visible: bool) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			visible,
			homology: false,
		}
	}

	fn position(state: &ForceGraphState, id: &str) -> Option<(f32, f32)> {
		let mut found = None;
		state.graph.visit_nodes(|n| {
			if n.data.user_data.id == id {
				found = Some((n.x(), n.y()));
			}
		});
		found
	}

	#[test]
	fn sync_keeps_positions_of_surviving_nodes() {
		let mut state = ForceGraphState::new(
			&GraphData {
				nodes: vec![node("A"), node("B")],
				links: vec![link("A", "B", true)],
			},
			800.0,
			600.0,
		);
		state.graph.visit_nodes_mut(|n| {
			if n.data.user_data.id == "A" {
				n.data.x = 42.0;
				n.data.y = -7.0;
			}
		});

		state.sync(&GraphData {
			nodes: vec![node("C"), node("A")],
			links: vec![],
		});
		assert_eq!(position(&state, "A"), Some((42.0, -7.0)));
		assert!(position(&state, "B").is_none());
		assert!(position(&state, "C").is_some());
	}

	#[test]
	fn hover_ignores_hidden_links() {
		let mut state = ForceGraphState::new(
			&GraphData {
				nodes: vec![node("A"), node("B"), node("C")],
				links: vec![link("A", "B", true), link("A", "C", false)],
			},
			800.0,
			600.0,
		);
		let mut idx = HashMap::new();
		state.graph.visit_nodes(|n| {
			idx.insert(n.data.user_data.id.clone(), n.index());
		});

		state.set_hover(Some(idx["A"]));
		assert!(state.hover.neighbors.contains(&idx["B"]));
		assert!(!state.hover.neighbors.contains(&idx["C"]));
		assert!(!state.link_style(idx["A"], idx["C"]).visible);
		assert_eq!(state.node_id(idx["B"]).as_deref(), Some("B"));
	}
}
