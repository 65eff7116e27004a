//! Projection of the network onto human homologs.

use log::debug;

use super::fragment::Fragment;
use super::model::{Edge, EdgeKind, Node};
use super::store::GraphStore;

/// Build the `Human` layer for the current graph.
///
/// Every primary node with a homolog yields a homolog node plus a homology
/// edge pointing back at it. Direct interactions (`pathlength == 1`) between
/// two primary nodes that both have homologs are mirrored between those
/// homologs. Two-hop interactions are never mirrored.
pub fn expand_homologs(store: &GraphStore) -> Fragment {
	let mut fragment = Fragment::default();

	for node in store.nodes().filter(|n| n.is_primary()) {
		if let Some(homolog) = node.homolog() {
			fragment.nodes.push(Node::homolog_projection(homolog));
			fragment.edges.push(Edge::homology(homolog, node.id.as_str()));
		}
	}

	for edge in store.edges() {
		if edge.kind != EdgeKind::Interaction || edge.pathlength != Some(1) {
			continue;
		}
		let (Some(source), Some(target)) = (store.node(&edge.source), store.node(&edge.target)) else {
			continue;
		};
		if !source.is_primary() || !target.is_primary() {
			continue;
		}
		if let (Some(a), Some(b)) = (source.homolog(), target.homolog()) {
			fragment.edges.push(Edge::homology_interaction(a, b));
		}
	}

	debug!(
		"homolog layer: {} nodes, {} edges",
		fragment.nodes.len(),
		fragment.edges.len()
	);
	fragment
}

/// Remove the `Human` layer: all homolog nodes, their incident edges, and
/// any homology edge left attached to a primary node.
pub fn collapse_homologs(store: &mut GraphStore) -> Vec<String> {
	let removed = store.remove_nodes(|n| !n.is_primary());
	store.remove_edges(|e| e.kind != EdgeKind::Interaction);
	removed
}
