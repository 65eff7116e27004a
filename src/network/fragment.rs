//! Graph fragments and their cytoscape-style JSON wire format.
//!
//! The backend and the JSON exports wrap every element in a `data` object:
//!
//! ```json
//! {"nodes": [{"data": {"id": "A", "database": "Smest"}}],
//!  "edges": [{"data": {"id": "A-B", "source": "A", "target": "B", "probability": 0.8}}]}
//! ```
//!
//! Bare elements without the wrapper, and a flat element array tagged with
//! `"group": "nodes" | "edges"`, are accepted as well.

use serde::{Deserialize, Serialize};

use super::error::ExplorerResult;
use super::model::{Edge, Element, Node};

/// A batch of nodes and edges not yet merged into the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fragment {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl Fragment {
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self { nodes, edges }
	}

	/// Build a fragment from loose elements, validating each one.
	pub fn from_elements<I>(elements: I) -> ExplorerResult<Self>
	where
		I: IntoIterator<Item = Element>,
	{
		let mut fragment = Fragment::default();
		for element in elements {
			match element.validate()? {
				Element::Node(node) => fragment.nodes.push(node),
				Element::Edge(edge) => fragment.edges.push(edge),
			}
		}
		Ok(fragment)
	}

	/// Parse and validate a JSON payload.
	pub fn from_json(json: &str) -> ExplorerResult<Self> {
		let wire: WireGraph = serde_json::from_str(json)?;
		Self::from_elements(wire.into_elements())
	}

	pub fn to_json(&self) -> ExplorerResult<String> {
		let wire = WireGraphOut {
			nodes: self.nodes.iter().map(|data| Wrapped { data }).collect(),
			edges: self
				.edges
				.iter()
				.map(|edge| Wrapped {
					data: EdgeOut { id: edge.id(), edge },
				})
				.collect(),
		};
		Ok(serde_json::to_string(&wire)?)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// True if `id` names a node of this fragment.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireElement<T> {
	Wrapped { data: T },
	Bare(T),
}

impl<T> WireElement<T> {
	fn into_inner(self) -> T {
		match self {
			WireElement::Wrapped { data } | WireElement::Bare(data) => data,
		}
	}
}

#[derive(Deserialize)]
#[serde(tag = "group", rename_all = "lowercase")]
enum GroupedElement {
	Nodes { data: Node },
	Edges { data: Edge },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireGraph {
	Split {
		nodes: Vec<WireElement<Node>>,
		#[serde(default)]
		edges: Vec<WireElement<Edge>>,
	},
	Flat(Vec<GroupedElement>),
}

impl WireGraph {
	fn into_elements(self) -> Vec<Element> {
		match self {
			WireGraph::Split { nodes, edges } => nodes
				.into_iter()
				.map(|n| Element::Node(n.into_inner()))
				.chain(edges.into_iter().map(|e| Element::Edge(e.into_inner())))
				.collect(),
			WireGraph::Flat(elements) => elements
				.into_iter()
				.map(|element| match element {
					GroupedElement::Nodes { data } => Element::Node(data),
					GroupedElement::Edges { data } => Element::Edge(data),
				})
				.collect(),
		}
	}
}

#[derive(Serialize)]
struct Wrapped<T> {
	data: T,
}

#[derive(Serialize)]
struct EdgeOut<'a> {
	id: String,
	#[serde(flatten)]
	edge: &'a Edge,
}

#[derive(Serialize)]
struct WireGraphOut<'a> {
	nodes: Vec<Wrapped<&'a Node>>,
	edges: Vec<Wrapped<EdgeOut<'a>>>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::model::{Database, EdgeKind};

	#[test]
	fn parses_wrapped_backend_payload() {
		let fragment = Fragment::from_json(
			r#"{"nodes":[{"data":{"id":"A","name":"A","database":"Smest","homolog":"TP53"}},
			             {"data":{"id":"B","database":"Smest"}}],
			    "edges":[{"data":{"id":"A-B","source":"A","target":"B","probability":0.8,"pathlength":1}}]}"#,
		)
		.unwrap();
		assert_eq!(fragment.node_count(), 2);
		assert_eq!(fragment.nodes[1].name, "B");
		assert_eq!(fragment.edges[0].pathlength, Some(1));
		assert!(fragment.contains_node("A"));
	}

	#[test]
	fn accepts_bare_and_flat_layouts() {
		let bare = Fragment::from_json(r#"{"nodes":[{"id":"A"}],"edges":[]}"#).unwrap();
		assert_eq!(bare.nodes[0].database, Database::Custom);

		let flat = Fragment::from_json(
			r#"[{"group":"nodes","data":{"id":"H1","database":"Human"}},
			    {"group":"edges","data":{"source":"H1","target":"A","type":"homology"}}]"#,
		)
		.unwrap();
		assert_eq!(flat.nodes[0].database, Database::Human);
		assert_eq!(flat.edges[0].kind, EdgeKind::Homology);
	}

	#[test]
	fn rejects_malformed_payloads() {
		assert!(Fragment::from_json("{not json").is_err());
		assert!(Fragment::from_json(r#"{"nodes":[{"data":{"id":""}}]}"#).is_err());
		assert!(Fragment::from_json(r#"{"nodes":[{"data":{"id":"A","database":"Mars"}}]}"#).is_err());

		// Objects without a node list are not graphs, even when otherwise valid JSON.
		assert!(Fragment::from_json("{}").is_err());
		assert!(Fragment::from_json(r#"{"colormap":{},"legend":""}"#).is_err());
		assert!(Fragment::from_json(r#"{"elements":{"nodes":[{"data":{"id":"A"}}],"edges":[]}}"#).is_err());
		assert!(Fragment::from_json(r#"{"nodes":[]}"#).unwrap().is_empty());
	}

	#[test]
	fn export_writes_conventional_edge_ids() {
		let fragment = Fragment::new(
			vec![Node::new("A", Database::Smest), Node::new("B", Database::Smest)],
			vec![Edge::interaction("A", "B", 0.9)],
		);
		let json = fragment.to_json().unwrap();
		assert!(json.contains(r#""id":"A-B""#));
		assert_eq!(Fragment::from_json(&json).unwrap(), fragment);
	}
}
