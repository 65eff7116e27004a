use std::collections::HashMap;

use serde::Deserialize;

use super::model::DEFAULT_NODE_COLOR;
use super::store::GraphStore;

/// Expression-to-color mapping returned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExpressionMap {
	/// Node id to CSS color.
	#[serde(default)]
	pub colormap: HashMap<String, String>,
	/// Pre-rendered legend, displayed as is.
	#[serde(default)]
	pub legend: String,
}

impl ExpressionMap {
	pub fn is_empty(&self) -> bool {
		self.colormap.is_empty()
	}

	/// Color every primary node; nodes missing from the map get the default
	/// fill. Returns how many nodes had a mapped color.
	pub fn apply(&self, store: &mut GraphStore) -> usize {
		let ids: Vec<String> = store
			.nodes()
			.filter(|n| n.is_primary())
			.map(|n| n.id.clone())
			.collect();
		let mut mapped = 0;
		for id in ids {
			let color = match self.colormap.get(&id) {
				Some(color) => {
					mapped += 1;
					color.clone()
				}
				None => DEFAULT_NODE_COLOR.to_string(),
			};
			if let Some(node) = store.node_mut(&id) {
				node.expression = Some(color);
			}
		}
		mapped
	}
}

/// Remove every expression color.
pub fn clear_expression(store: &mut GraphStore) {
	let ids: Vec<String> = store.nodes().map(|n| n.id.clone()).collect();
	for id in ids {
		if let Some(node) = store.node_mut(&id) {
			node.expression = None;
		}
	}
}
