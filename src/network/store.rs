use std::collections::{HashMap, HashSet};

use super::fragment::Fragment;
use super::model::{Edge, EdgeKey, EdgeKind, Node};

/// The nodes and edges currently on screen.
///
/// Insertion order is preserved. Node ids and edge keys are unique; re-adding
/// an existing element never overwrites it.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	node_index: HashMap<String, usize>,
	edges: Vec<Edge>,
	edge_keys: HashSet<EdgeKey>,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_fragment(fragment: Fragment) -> Self {
		let mut store = Self::new();
		store.upsert_nodes(fragment.nodes);
		store.upsert_edges(fragment.edges);
		store
	}

	/// Insert nodes whose id is not present yet. Returns how many were added.
	pub fn upsert_nodes<I>(&mut self, nodes: I) -> usize
	where
		I: IntoIterator<Item = Node>,
	{
		let mut added = 0;
		for node in nodes {
			if self.node_index.contains_key(&node.id) {
				continue;
			}
			self.node_index.insert(node.id.clone(), self.nodes.len());
			self.nodes.push(node);
			added += 1;
		}
		added
	}

	/// Insert edges whose endpoint pair is not present yet.
	///
	/// The one exception to never overwriting: an interaction replaces a
	/// homology edge holding the same endpoint pair, so that collapsing the
	/// homolog layer later keeps it.
	pub fn upsert_edges<I>(&mut self, edges: I) -> usize
	where
		I: IntoIterator<Item = Edge>,
	{
		let mut added = 0;
		for edge in edges {
			let key = edge.key();
			if self.edge_keys.insert(key.clone()) {
				self.edges.push(edge);
				added += 1;
			} else if edge.kind == EdgeKind::Interaction {
				let slot = self
					.edges
					.iter_mut()
					.find(|e| e.kind != EdgeKind::Interaction && e.key() == key);
				if let Some(slot) = slot {
					*slot = edge;
					added += 1;
				}
			}
		}
		added
	}

	/// Remove every node matching `predicate` together with its incident
	/// edges. Returns the removed node ids in insertion order.
	pub fn remove_nodes<F>(&mut self, mut predicate: F) -> Vec<String>
	where
		F: FnMut(&Node) -> bool,
	{
		let mut removed = Vec::new();
		self.nodes.retain(|node| {
			if predicate(node) {
				removed.push(node.id.clone());
				false
			} else {
				true
			}
		});
		if removed.is_empty() {
			return removed;
		}

		let gone: HashSet<&str> = removed.iter().map(String::as_str).collect();
		self.edges
			.retain(|e| !gone.contains(e.source.as_str()) && !gone.contains(e.target.as_str()));
		self.reindex();
		removed
	}

	/// Remove every edge matching `predicate`. Returns how many were removed.
	pub fn remove_edges<F>(&mut self, mut predicate: F) -> usize
	where
		F: FnMut(&Edge) -> bool,
	{
		let before = self.edges.len();
		self.edges.retain(|e| !predicate(e));
		let removed = before - self.edges.len();
		if removed > 0 {
			self.reindex();
		}
		removed
	}

	pub fn clear(&mut self) {
		self.nodes.clear();
		self.node_index.clear();
		self.edges.clear();
		self.edge_keys.clear();
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.node_index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.node_index.get(id).map(|&i| &mut self.nodes[i])
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node_index.contains_key(id)
	}

	pub fn contains_edge(&self, key: &EdgeKey) -> bool {
		self.edge_keys.contains(key)
	}

	/// Restartable iteration over the current nodes.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> + Clone {
		self.nodes.iter()
	}

	/// Restartable iteration over the current edges.
	pub fn edges(&self) -> impl Iterator<Item = &Edge> + Clone {
		self.edges.iter()
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Owned copy of the current graph.
	pub fn snapshot(&self) -> Fragment {
		Fragment::new(self.nodes.clone(), self.edges.clone())
	}

	fn reindex(&mut self) {
		self.node_index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		self.edge_keys = self.edges.iter().map(Edge::key).collect();
	}
}
