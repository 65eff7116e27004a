//! Nodes, edges and the catalogs they belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ExplorerError;

/// Fill color used for nodes without an expression value.
pub const DEFAULT_NODE_COLOR: &str = "#404040";
/// Border color given to a node once it has been expanded.
pub const EXPANDED_NODE_COLOR: &str = "#449D44";
/// Color of homolog projection nodes and their edges.
pub const HOMOLOG_COLOR: &str = "#6785d0";

/// How a node is drawn by the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
	#[default]
	Circle,
	Triangle,
}

/// Source catalog a node comes from.
///
/// `Human` marks cross-species homolog projections and `Custom` marks nodes
/// authored by the user; everything else is a transcriptome catalog served by
/// the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Database {
	Human,
	#[default]
	Custom,
	Smest,
	Cthulhu,
	Consolidated,
	Dresden,
	Graveley,
	Illuminaplus,
	Newmark,
	Smed454,
	Smedgd,
	Adamidi,
	Blythe,
	Pearson,
	Gbrna,
}

impl Database {
	/// Every known catalog, in display order.
	pub const ALL: [Database; 15] = [
		Database::Smest,
		Database::Cthulhu,
		Database::Consolidated,
		Database::Dresden,
		Database::Graveley,
		Database::Illuminaplus,
		Database::Newmark,
		Database::Smed454,
		Database::Smedgd,
		Database::Adamidi,
		Database::Blythe,
		Database::Pearson,
		Database::Gbrna,
		Database::Custom,
		Database::Human,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Database::Human => "Human",
			Database::Custom => "Custom",
			Database::Smest => "Smest",
			Database::Cthulhu => "Cthulhu",
			Database::Consolidated => "Consolidated",
			Database::Dresden => "Dresden",
			Database::Graveley => "Graveley",
			Database::Illuminaplus => "Illuminaplus",
			Database::Newmark => "Newmark",
			Database::Smed454 => "Smed454",
			Database::Smedgd => "Smedgd",
			Database::Adamidi => "Adamidi",
			Database::Blythe => "Blythe",
			Database::Pearson => "Pearson",
			Database::Gbrna => "Gbrna",
		}
	}

	/// Border color used by the stylesheet for this catalog.
	pub fn border_color(self) -> &'static str {
		match self {
			Database::Human => HOMOLOG_COLOR,
			Database::Custom => "#ddadad",
			Database::Smest => "#bb4ab7",
			Database::Cthulhu => "#49b9d1",
			Database::Consolidated => "#74be47",
			Database::Dresden => "#ca552d",
			Database::Graveley => "#4b8c38",
			Database::Illuminaplus => "#b175e3",
			Database::Newmark => "#bcb042",
			Database::Smed454 => "#de9640",
			Database::Smedgd => "#e4857b",
			Database::Adamidi => "#648ad0",
			Database::Blythe => "#d34057",
			Database::Pearson => "#5fc38f",
			Database::Gbrna => "#818941",
		}
	}

	pub fn shape(self) -> Shape {
		match self {
			Database::Smed454 | Database::Smedgd => Shape::Triangle,
			_ => Shape::Circle,
		}
	}

	/// True for the synthetic homolog catalog.
	pub fn is_homolog(self) -> bool {
		self == Database::Human
	}
}

impl fmt::Display for Database {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Database {
	type Err = ExplorerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Database::ALL
			.into_iter()
			.find(|db| db.as_str() == s)
			.ok_or_else(|| ExplorerError::UnknownDatabase(s.to_string()))
	}
}

impl TryFrom<String> for Database {
	type Error = ExplorerError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Database> for String {
	fn from(db: Database) -> Self {
		db.as_str().to_string()
	}
}

/// A gene/protein in the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	/// Display label. Empty on the wire means "same as `id`".
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub database: Database,
	/// Id of the corresponding `Human` node, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub homolog: Option<String>,
	#[serde(rename = "colorNODE", default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub degree: Option<u32>,
	/// Fill color set by an expression mapping. Never serialized.
	#[serde(skip)]
	pub expression: Option<String>,
}

impl Node {
	pub fn new(id: impl Into<String>, database: Database) -> Self {
		let id = id.into();
		Self {
			name: id.clone(),
			id,
			database,
			homolog: None,
			color: None,
			degree: None,
			expression: None,
		}
	}

	/// A node authored in the editor.
	pub fn custom(name: impl Into<String>) -> Self {
		Self::new(name, Database::Custom).with_color(DEFAULT_NODE_COLOR)
	}

	/// The `Human` projection of a homolog id.
	pub fn homolog_projection(id: impl Into<String>) -> Self {
		Self::new(id, Database::Human).with_color(HOMOLOG_COLOR)
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_homolog(mut self, homolog: impl Into<String>) -> Self {
		self.homolog = Some(homolog.into());
		self
	}

	pub fn with_color(mut self, color: impl Into<String>) -> Self {
		self.color = Some(color.into());
		self
	}

	pub fn with_degree(mut self, degree: u32) -> Self {
		self.degree = Some(degree);
		self
	}

	/// Homolog id, ignoring empty strings.
	pub fn homolog(&self) -> Option<&str> {
		self.homolog.as_deref().filter(|h| !h.is_empty())
	}

	/// True for nodes that were not derived from another node's homolog.
	pub fn is_primary(&self) -> bool {
		!self.database.is_homolog()
	}
}

/// What an edge represents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
	/// An ordinary interaction from the backend or an import.
	#[default]
	Interaction,
	/// A node linked to its own `Human` homolog.
	Homology,
	/// A direct interaction mirrored between two homologs.
	HomologyInt,
}

impl EdgeKind {
	pub fn is_interaction(&self) -> bool {
		*self == EdgeKind::Interaction
	}
}

/// Structural identity of an edge: its ordered pair of endpoints.
///
/// Used instead of the `"<source>-<target>"` string so that ids containing
/// hyphens cannot collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
	pub source: String,
	pub target: String,
}

impl EdgeKey {
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

impl fmt::Display for EdgeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.source, self.target)
	}
}

/// A scored link between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub source: String,
	pub target: String,
	/// Confidence in [0, 1]. `None` means the edge is never filtered out.
	#[serde(
		default,
		deserialize_with = "deserialize_probability",
		skip_serializing_if = "Option::is_none"
	)]
	pub probability: Option<f64>,
	/// 1 for a direct interaction, 2 for an inferred two-hop interaction.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pathlength: Option<u8>,
	#[serde(rename = "type", default, skip_serializing_if = "EdgeKind::is_interaction")]
	pub kind: EdgeKind,
	#[serde(rename = "colorEDGE", default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
}

impl Edge {
	pub fn interaction(source: impl Into<String>, target: impl Into<String>, probability: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			probability: Some(probability),
			pathlength: None,
			kind: EdgeKind::Interaction,
			color: None,
		}
	}

	/// Edge from a homolog projection to the node it was derived from.
	pub fn homology(homolog: impl Into<String>, node: impl Into<String>) -> Self {
		Self {
			kind: EdgeKind::Homology,
			color: Some(HOMOLOG_COLOR.to_string()),
			..Self::interaction(homolog, node, 1.0)
		}
	}

	/// Direct interaction mirrored between two homolog projections.
	pub fn homology_interaction(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			kind: EdgeKind::HomologyInt,
			color: Some(HOMOLOG_COLOR.to_string()),
			..Self::interaction(source, target, 1.0)
		}
	}

	pub fn with_pathlength(mut self, pathlength: u8) -> Self {
		self.pathlength = Some(pathlength);
		self
	}

	pub fn without_probability(mut self) -> Self {
		self.probability = None;
		self
	}

	pub fn key(&self) -> EdgeKey {
		EdgeKey::new(self.source.as_str(), self.target.as_str())
	}

	/// Conventional `"<source>-<target>"` id written on export.
	pub fn id(&self) -> String {
		self.key().to_string()
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
	Number(f64),
	Text(String),
}

// Older exports wrote probabilities as strings.
fn deserialize_probability<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<NumberOrText>::deserialize(deserializer)? {
		None => Ok(None),
		Some(NumberOrText::Number(value)) => Ok(Some(value)),
		Some(NumberOrText::Text(text)) => text
			.trim()
			.parse::<f64>()
			.map(Some)
			.map_err(serde::de::Error::custom),
	}
}

/// Discriminates the two element variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
	Node,
	Edge,
}

/// A single graph element as it crosses the fetch boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
	Node(Node),
	Edge(Edge),
}

impl Element {
	pub fn kind(&self) -> ElementKind {
		match self {
			Element::Node(_) => ElementKind::Node,
			Element::Edge(_) => ElementKind::Edge,
		}
	}

	/// Check the element's contract and fill in derived defaults.
	pub fn validate(self) -> Result<Self, ExplorerError> {
		match self {
			Element::Node(mut node) => {
				if node.id.trim().is_empty() {
					return Err(ExplorerError::InvalidElement("node without an id".into()));
				}
				if node.name.is_empty() {
					node.name = node.id.clone();
				}
				if node.homolog.as_deref().is_some_and(str::is_empty) {
					node.homolog = None;
				}
				Ok(Element::Node(node))
			}
			Element::Edge(edge) => {
				if edge.source.trim().is_empty() || edge.target.trim().is_empty() {
					return Err(ExplorerError::InvalidElement(format!(
						"edge {} is missing an endpoint",
						edge.id()
					)));
				}
				if let Some(p) = edge.probability {
					if !(0.0..=1.0).contains(&p) {
						return Err(ExplorerError::InvalidElement(format!(
							"edge {} has probability {p} outside [0, 1]",
							edge.id()
						)));
					}
				}
				Ok(Element::Edge(edge))
			}
		}
	}
}

impl From<Node> for Element {
	fn from(node: Node) -> Self {
		Element::Node(node)
	}
}

impl From<Edge> for Element {
	fn from(edge: Edge) -> Self {
		Element::Edge(edge)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn database_round_trips_through_its_name() {
		for db in Database::ALL {
			assert_eq!(db.as_str().parse::<Database>().unwrap(), db);
		}
		assert!("Planaria".parse::<Database>().is_err());
	}

	#[test]
	fn smed_catalogs_are_triangles() {
		assert_eq!(Database::Smed454.shape(), Shape::Triangle);
		assert_eq!(Database::Smedgd.shape(), Shape::Triangle);
		assert_eq!(Database::Dresden.shape(), Shape::Circle);
	}

	#[test]
	fn node_fields_follow_the_wire_names() {
		let node: Node = serde_json::from_str(
			r##"{"id":"dd_Smed_v6_1_0_1","database":"Dresden","homolog":"TP53","colorNODE":"#fff","degree":4}"##,
		)
		.unwrap();
		assert_eq!(node.database, Database::Dresden);
		assert_eq!(node.homolog(), Some("TP53"));
		assert_eq!(node.color.as_deref(), Some("#fff"));
		assert_eq!(node.degree, Some(4));
		assert!(node.name.is_empty());
	}

	#[test]
	fn edge_type_and_probability_parse() {
		let edge: Edge = serde_json::from_str(
			r#"{"source":"A","target":"B","probability":"0.75","pathlength":2,"type":"homologyInt"}"#,
		)
		.unwrap();
		assert_eq!(edge.probability, Some(0.75));
		assert_eq!(edge.pathlength, Some(2));
		assert_eq!(edge.kind, EdgeKind::HomologyInt);

		let plain: Edge = serde_json::from_str(r#"{"source":"A","target":"B"}"#).unwrap();
		assert_eq!(plain.kind, EdgeKind::Interaction);
		assert_eq!(plain.probability, None);
	}

	#[test]
	fn interaction_kind_is_not_written() {
		let json = serde_json::to_string(&Edge::interaction("A", "B", 0.5)).unwrap();
		assert!(!json.contains("type"));
		let json = serde_json::to_string(&Edge::homology("H", "A")).unwrap();
		assert!(json.contains(r#""type":"homology""#));
	}

	#[test]
	fn hyphenated_ids_keep_distinct_keys() {
		let a = Edge::interaction("a-b", "c", 1.0);
		let b = Edge::interaction("a", "b-c", 1.0);
		assert_eq!(a.id(), b.id());
		assert_ne!(a.key(), b.key());
	}

	#[test]
	fn validation_fills_name_and_rejects_bad_elements() {
		let node = Element::Node(Node::new("X1", Database::Smest).with_name("")).validate();
		match node.unwrap() {
			Element::Node(n) => assert_eq!(n.name, "X1"),
			Element::Edge(_) => panic!("kind changed"),
		}

		assert!(Element::Node(Node::new(" ", Database::Smest)).validate().is_err());
		assert!(Element::Edge(Edge::interaction("A", "", 0.5)).validate().is_err());
		assert!(Element::Edge(Edge::interaction("A", "B", 1.5)).validate().is_err());
		assert_eq!(
			Element::from(Edge::interaction("A", "B", 0.5)).kind(),
			ElementKind::Edge
		);
	}
}
