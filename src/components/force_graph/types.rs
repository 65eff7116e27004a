use crate::network::{EdgeKind, Explorer, Shape};
use crate::network::model::DEFAULT_NODE_COLOR;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	/// Fill; the expression color when one is mapped.
	pub color: Option<String>,
	/// Stroke, taken from the node's catalog.
	pub border: String,
	pub shape: Shape,
	/// Matched by the current search.
	pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	/// False when the visibility filter hides the edge.
	pub visible: bool,
	pub homology: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// What the canvas should draw for the explorer's current state.
	pub fn from_explorer(explorer: &Explorer) -> Self {
		let visibility = explorer.visibility();
		let nodes = explorer
			.store()
			.nodes()
			.map(|node| GraphNode {
				id: node.id.clone(),
				label: Some(node.name.clone()),
				color: node
					.expression
					.clone()
					.or_else(|| node.color.clone())
					.or_else(|| Some(DEFAULT_NODE_COLOR.to_string())),
				border: node.database.border_color().to_string(),
				shape: node.database.shape(),
				highlighted: visibility.is_highlighted(&node.id),
			})
			.collect();
		let links = explorer
			.store()
			.edges()
			.map(|edge| GraphLink {
				source: edge.source.clone(),
				target: edge.target.clone(),
				visible: visibility.edge_visible(&edge.key()),
				homology: edge.kind != EdgeKind::Interaction,
			})
			.collect();
		Self { nodes, links }
	}
}
