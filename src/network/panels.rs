//! Filters for the static result lists: precomputed pathway panels and
//! gene-search result cards.

use serde::Deserialize;

use super::error::ExplorerResult;
use super::filter::{Categorized, matching_term};
use super::fragment::Fragment;
use super::model::Database;

/// Which node fields a pathway query may match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolMatch {
	#[default]
	IdOnly,
	IdOrHomolog,
}

/// A precomputed pathway and its embedded graph.
#[derive(Clone, Debug, PartialEq)]
pub struct PathwayPanel {
	pub id: String,
	pub graph: Fragment,
}

impl PathwayPanel {
	pub fn from_json(id: impl Into<String>, graph_json: &str) -> ExplorerResult<Self> {
		Ok(Self {
			id: id.into(),
			graph: Fragment::from_json(graph_json)?,
		})
	}

	/// True if every symbol names a node of this panel.
	pub fn contains_all(&self, symbols: &[String], mode: SymbolMatch) -> bool {
		symbols.iter().all(|symbol| {
			let wanted = std::slice::from_ref(symbol);
			self.graph.nodes.iter().any(|node| {
				matching_term(&node.id, wanted).is_some()
					|| (mode == SymbolMatch::IdOrHomolog
						&& node
							.homolog()
							.is_some_and(|h| matching_term(h, wanted).is_some()))
			})
		})
	}
}

/// A parsed gene-symbol filter for pathway panels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelQuery {
	symbols: Vec<String>,
	mode: SymbolMatch,
}

impl PanelQuery {
	/// Parse a comma-separated symbol list. Whitespace inside a symbol is
	/// dropped, matching is case-insensitive.
	pub fn parse(input: &str, mode: SymbolMatch) -> Self {
		let mut symbols: Vec<String> = input
			.split(',')
			.map(|s| s.split_whitespace().collect::<String>().to_uppercase())
			.filter(|s| !s.is_empty())
			.collect();
		symbols.dedup();
		Self { symbols, mode }
	}

	pub fn symbols(&self) -> &[String] {
		&self.symbols
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// An empty query shows every panel.
	pub fn shows(&self, panel: &PathwayPanel) -> bool {
		self.is_empty() || panel.contains_all(&self.symbols, self.mode)
	}

	/// Show/hide flag for each panel, in order.
	pub fn apply(&self, panels: &[PathwayPanel]) -> Vec<bool> {
		panels.iter().map(|p| self.shows(p)).collect()
	}
}

/// One card of the gene search results page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
	pub symbol: String,
	pub database: Database,
	#[serde(default)]
	pub homolog: Option<String>,
}

impl Categorized for SearchResult {
	fn category(&self) -> Database {
		self.database
	}
}

/// Embedded panel description as rendered by the server.
#[derive(Deserialize)]
struct EmbeddedPanel {
	id: String,
	graph: serde_json::Value,
}

/// Parse the JSON array of `{id, graph}` objects embedded in the page.
pub fn parse_embedded_panels(json: &str) -> ExplorerResult<Vec<PathwayPanel>> {
	let raw: Vec<EmbeddedPanel> = serde_json::from_str(json)?;
	raw.into_iter()
		.map(|p| {
			let graph = match p.graph {
				serde_json::Value::String(text) => text,
				value => value.to_string(),
			};
			PathwayPanel::from_json(p.id, &graph)
		})
		.collect()
}

/// Parse the JSON array of search results embedded in the page.
pub fn parse_search_results(json: &str) -> ExplorerResult<Vec<SearchResult>> {
	Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::filter::CategorySelection;
	use crate::network::model::Node;

	fn panel(id: &str, nodes: &[&str]) -> PathwayPanel {
		PathwayPanel {
			id: id.into(),
			graph: Fragment::new(
				nodes.iter().map(|n| Node::new(*n, Database::Smest)).collect(),
				vec![],
			),
		}
	}

	#[test]
	fn every_symbol_must_be_present() {
		let panels = [panel("P1", &["a", "b"]), panel("P2", &["a", "c"])];
		let q = |s| PanelQuery::parse(s, SymbolMatch::IdOnly).apply(&panels);
		assert_eq!(q("a,b"), [true, false]);
		assert_eq!(q("a"), [true, true]);
		assert_eq!(q("a,b,c"), [false, false]);
		assert_eq!(q(""), [true, true]);
		assert_eq!(q(" A , B "), [true, false]);
	}

	#[test]
	fn homolog_aware_variant_matches_homologs() {
		let mut p = panel("P1", &["smed-a"]);
		p.graph.nodes[0].homolog = Some("TP53".into());
		let panels = [p];
		assert_eq!(
			PanelQuery::parse("tp53", SymbolMatch::IdOrHomolog).apply(&panels),
			[true]
		);
		assert_eq!(PanelQuery::parse("tp53", SymbolMatch::IdOnly).apply(&panels), [false]);
	}

	#[test]
	fn embedded_panels_accept_string_or_object_graphs() {
		let panels = parse_embedded_panels(
			r#"[{"id":"p1","graph":"{\"nodes\":[{\"data\":{\"id\":\"A\"}}],\"edges\":[]}"},
			    {"id":"p2","graph":{"nodes":[{"data":{"id":"B"}}],"edges":[]}}]"#,
		)
		.unwrap();
		assert_eq!(panels.len(), 2);
		assert!(panels[1].graph.contains_node("B"));
	}

	#[test]
	fn search_results_filter_by_database() {
		let results = parse_search_results(
			r#"[{"symbol":"A","database":"Smest"},{"symbol":"B","database":"Dresden"}]"#,
		)
		.unwrap();
		assert_eq!(
			CategorySelection::Only(Database::Smest).apply(&results),
			[true, false]
		);
	}
}
