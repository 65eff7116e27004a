//! Edge visibility, search highlighting and category filtering.
//!
//! Everything here is a pure function of a graph snapshot and a
//! [`FilterState`]; recomputing after any mutation always yields the same
//! assignment for the same inputs.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::config::clamp_unit;
use super::error::ExplorerError;
use super::model::{Database, Edge, EdgeKey, Node};
use super::store::GraphStore;

/// Confidence slider position on page load.
pub const DEFAULT_CONFIDENCE: f64 = 0.6;

/// Whether inferred two-hop interactions are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PathLengthMode {
	Show,
	#[default]
	Hide,
}

impl FromStr for PathLengthMode {
	type Err = ExplorerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"show" => Ok(PathLengthMode::Show),
			"hide" => Ok(PathLengthMode::Hide),
			other => Err(ExplorerError::UnknownPathLengthMode(other.to_string())),
		}
	}
}

impl fmt::Display for PathLengthMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			PathLengthMode::Show => "show",
			PathLengthMode::Hide => "hide",
		})
	}
}

/// User-controlled filter inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState {
	pub confidence_threshold: f64,
	pub path_length_mode: PathLengthMode,
	/// Upper-cased search terms; empty means no search is active.
	pub search_terms: Vec<String>,
}

impl Default for FilterState {
	fn default() -> Self {
		Self {
			confidence_threshold: DEFAULT_CONFIDENCE,
			path_length_mode: PathLengthMode::Hide,
			search_terms: Vec::new(),
		}
	}
}

impl FilterState {
	pub fn new(confidence_threshold: f64, path_length_mode: PathLengthMode) -> Self {
		Self {
			confidence_threshold: clamp_unit(confidence_threshold),
			path_length_mode,
			search_terms: Vec::new(),
		}
	}

	/// Combined confidence and path-length rule for one edge.
	pub fn edge_passes(&self, edge: &Edge) -> bool {
		let path_ok = edge.pathlength != Some(2) || self.path_length_mode == PathLengthMode::Show;
		let confidence_ok = edge
			.probability
			.is_none_or(|p| p >= self.confidence_threshold);
		path_ok && confidence_ok
	}
}

/// Split a comma-separated list into trimmed, upper-cased, non-empty terms.
pub fn parse_terms(input: &str) -> Vec<String> {
	let mut seen = HashSet::new();
	input
		.split(',')
		.map(|t| t.trim().to_uppercase())
		.filter(|t| !t.is_empty())
		.filter(|t| seen.insert(t.clone()))
		.collect()
}

/// Case-insensitive exact match of `candidate` against upper-cased `terms`.
///
/// Shared by the search highlight and the pathway panel filter.
pub fn matching_term<'t>(candidate: &str, terms: &'t [String]) -> Option<&'t str> {
	let candidate = candidate.to_uppercase();
	terms
		.iter()
		.find(|t| **t == candidate)
		.map(String::as_str)
}

/// True if the node's name or homolog equals any term.
pub fn node_matches(node: &Node, terms: &[String]) -> bool {
	matching_term(&node.name, terms).is_some()
		|| node
			.homolog()
			.is_some_and(|h| matching_term(h, terms).is_some())
}

/// Result of one visibility pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
	hidden_edges: HashSet<EdgeKey>,
	highlighted: HashSet<String>,
}

impl Visibility {
	pub fn edge_visible(&self, key: &EdgeKey) -> bool {
		!self.hidden_edges.contains(key)
	}

	pub fn is_highlighted(&self, node_id: &str) -> bool {
		self.highlighted.contains(node_id)
	}

	pub fn hidden_edge_count(&self) -> usize {
		self.hidden_edges.len()
	}

	pub fn highlighted_count(&self) -> usize {
		self.highlighted.len()
	}
}

/// Computes what should be drawn for a given [`FilterState`].
#[derive(Clone, Debug, Default)]
pub struct VisibilityFilter {
	state: FilterState,
}

impl VisibilityFilter {
	pub fn new(state: FilterState) -> Self {
		Self { state }
	}

	pub fn state(&self) -> &FilterState {
		&self.state
	}

	pub fn set_confidence_threshold(&mut self, threshold: f64) {
		self.state.confidence_threshold = clamp_unit(threshold);
	}

	pub fn set_path_length_mode(&mut self, mode: PathLengthMode) {
		self.state.path_length_mode = mode;
	}

	/// Replace the search with a comma-separated term list.
	pub fn set_search(&mut self, input: &str) {
		self.state.search_terms = parse_terms(input);
	}

	pub fn clear_search(&mut self) {
		self.state.search_terms.clear();
	}

	/// Visibility for every element of `store`, recomputed from scratch.
	pub fn apply(&self, store: &GraphStore) -> Visibility {
		let hidden_edges: HashSet<EdgeKey> = store
			.edges()
			.filter(|e| !self.state.edge_passes(e))
			.map(Edge::key)
			.collect();

		let highlighted: HashSet<String> = if self.state.search_terms.is_empty() {
			HashSet::new()
		} else {
			store
				.nodes()
				.filter(|n| node_matches(n, &self.state.search_terms))
				.map(|n| n.id.clone())
				.collect()
		};

		debug!(
			"visibility: {} of {} edges hidden, {} nodes highlighted",
			hidden_edges.len(),
			store.edge_count(),
			highlighted.len()
		);
		Visibility {
			hidden_edges,
			highlighted,
		}
	}

	/// Nodes without a single incident edge that passes the current filter.
	pub fn removal_candidates(&self, store: &GraphStore) -> Vec<String> {
		let connected: HashSet<&str> = store
			.edges()
			.filter(|e| self.state.edge_passes(e))
			.flat_map(|e| [e.source.as_str(), e.target.as_str()])
			.collect();
		store
			.nodes()
			.filter(|n| !connected.contains(n.id.as_str()))
			.map(|n| n.id.clone())
			.collect()
	}
}

/// Label of the catch-all category button.
pub const ALL_CATEGORIES: &str = "All results";

/// Anything that belongs to a single catalog.
pub trait Categorized {
	fn category(&self) -> Database;
}

impl Categorized for Node {
	fn category(&self) -> Database {
		self.database
	}
}

/// Which catalog is selected in a multi-panel view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategorySelection {
	#[default]
	All,
	Only(Database),
}

impl CategorySelection {
	pub fn shows(&self, category: Database) -> bool {
		match self {
			CategorySelection::All => true,
			CategorySelection::Only(selected) => *selected == category,
		}
	}

	/// Show/hide flag for each item, in order.
	pub fn apply<T: Categorized>(&self, items: &[T]) -> Vec<bool> {
		items.iter().map(|i| self.shows(i.category())).collect()
	}

	pub fn label(&self) -> &'static str {
		match self {
			CategorySelection::All => ALL_CATEGORIES,
			CategorySelection::Only(db) => db.as_str(),
		}
	}
}

impl FromStr for CategorySelection {
	type Err = ExplorerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			ALL_CATEGORIES | "All" => Ok(CategorySelection::All),
			other => other.parse().map(CategorySelection::Only),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::fragment::Fragment;

	#[test]
	fn path_length_mode_parses_its_own_names() {
		assert_eq!("show".parse::<PathLengthMode>().unwrap(), PathLengthMode::Show);
		assert_eq!(PathLengthMode::Hide.to_string().parse::<PathLengthMode>().unwrap(), PathLengthMode::Hide);
		assert!(matches!(
			"sometimes".parse::<PathLengthMode>(),
			Err(ExplorerError::UnknownPathLengthMode(mode)) if mode == "sometimes"
		));
	}

	fn hiding(threshold: f64) -> FilterState {
		FilterState::new(threshold, PathLengthMode::Hide)
	}

	#[test]
	fn confidence_and_path_length_rules_combine() {
		let state = hiding(0.6);
		assert!(!state.edge_passes(&Edge::interaction("A", "B", 0.5).with_pathlength(1)));
		assert!(state.edge_passes(&Edge::interaction("A", "B", 0.7).with_pathlength(1)));
		assert!(!state.edge_passes(&Edge::interaction("A", "B", 0.9).with_pathlength(2)));
		assert!(state.edge_passes(&Edge::interaction("A", "B", 0.6)));

		let showing = FilterState::new(0.6, PathLengthMode::Show);
		assert!(showing.edge_passes(&Edge::interaction("A", "B", 0.9).with_pathlength(2)));
		assert!(!showing.edge_passes(&Edge::interaction("A", "B", 0.5).with_pathlength(2)));
	}

	#[test]
	fn edges_without_probability_are_always_visible() {
		let edge = Edge::interaction("A", "B", 0.0).without_probability();
		assert!(hiding(1.0).edge_passes(&edge));
		assert!(hiding(1.0).edge_passes(&Edge::homology("H", "A")));
	}

	#[test]
	fn apply_is_deterministic() {
		let store = GraphStore::from_fragment(Fragment::new(
			vec![
				Node::new("A", Database::Smest),
				Node::new("B", Database::Smest),
				Node::new("C", Database::Smest),
			],
			vec![
				Edge::interaction("A", "B", 0.5).with_pathlength(1),
				Edge::interaction("B", "C", 0.7).with_pathlength(1),
				Edge::interaction("A", "C", 0.9).with_pathlength(2),
			],
		));
		let filter = VisibilityFilter::new(hiding(0.6));
		let first = filter.apply(&store);
		assert_eq!(first, filter.apply(&store));
		assert!(!first.edge_visible(&EdgeKey::new("A", "B")));
		assert!(first.edge_visible(&EdgeKey::new("B", "C")));
		assert!(!first.edge_visible(&EdgeKey::new("A", "C")));
		assert_eq!(first.hidden_edge_count(), 2);
	}

	#[test]
	fn unconnected_nodes_are_removal_candidates() {
		let store = GraphStore::from_fragment(Fragment::new(
			vec![
				Node::new("A", Database::Smest),
				Node::new("B", Database::Smest),
				Node::new("C", Database::Smest),
				Node::new("D", Database::Smest),
			],
			vec![
				Edge::interaction("A", "B", 0.8),
				Edge::interaction("C", "D", 0.95).with_pathlength(2),
			],
		));
		let filter = VisibilityFilter::new(hiding(0.6));
		assert_eq!(filter.removal_candidates(&store), ["C", "D"]);

		let mut showing = filter.clone();
		showing.set_path_length_mode(PathLengthMode::Show);
		assert!(showing.removal_candidates(&store).is_empty());
	}

	#[test]
	fn search_matches_name_or_homolog_case_insensitively() {
		let store = GraphStore::from_fragment(Fragment::new(
			vec![
				Node::new("X1", Database::Smest).with_homolog("HOMA"),
				Node::new("X2", Database::Smest).with_homolog("HOMB"),
			],
			vec![],
		));
		let mut filter = VisibilityFilter::default();

		filter.set_search("HOMA");
		let v = filter.apply(&store);
		assert!(v.is_highlighted("X1"));
		assert!(!v.is_highlighted("X2"));

		filter.set_search("x1, HOMB");
		let v = filter.apply(&store);
		assert!(v.is_highlighted("X1") && v.is_highlighted("X2"));

		filter.set_search("homb");
		let v = filter.apply(&store);
		assert_eq!(v.highlighted_count(), 1);
		assert!(v.is_highlighted("X2"));

		filter.clear_search();
		assert_eq!(filter.apply(&store).highlighted_count(), 0);
	}

	#[test]
	fn terms_are_trimmed_and_deduplicated() {
		assert_eq!(parse_terms(" a ,B,,a, "), ["A", "B"]);
		assert!(parse_terms("").is_empty());
	}

	#[test]
	fn category_selection_filters_items() {
		let nodes = vec![
			Node::new("A", Database::Smest),
			Node::new("B", Database::Dresden),
		];
		assert_eq!(CategorySelection::All.apply(&nodes), [true, true]);
		let only: CategorySelection = "Dresden".parse().unwrap();
		assert_eq!(only.apply(&nodes), [false, true]);
		assert_eq!("All results".parse::<CategorySelection>().unwrap(), CategorySelection::All);
		assert_eq!(only.label(), "Dresden");
	}
}
