//! File import and export: cytoscape JSON and tab-delimited "tbl".
//!
//! A tbl line holds one column (a node), two columns (an edge with
//! probability 1) or three columns (an edge with an explicit probability).

use std::collections::HashSet;

use super::error::{ExplorerError, ExplorerResult};
use super::fragment::Fragment;
use super::model::{Database, Edge, Node};
use super::store::GraphStore;

pub const JSON_EXPORT_NAME: &str = "graph-export.json";
pub const TBL_EXPORT_NAME: &str = "graph-export.tbl";

/// Supported graph file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
	Json,
	Tbl,
}

impl GraphFormat {
	/// Guess from a file name; anything not ending in `.json` is read as tbl.
	pub fn from_file_name(name: &str) -> Self {
		if name.to_ascii_lowercase().ends_with(".json") {
			GraphFormat::Json
		} else {
			GraphFormat::Tbl
		}
	}

	pub fn parse(self, text: &str) -> ExplorerResult<Fragment> {
		match self {
			GraphFormat::Json => Fragment::from_json(text),
			GraphFormat::Tbl => parse_tbl(text),
		}
	}

	pub fn export(self, store: &GraphStore) -> ExplorerResult<String> {
		match self {
			GraphFormat::Json => store.snapshot().to_json(),
			GraphFormat::Tbl => Ok(export_tbl(store)),
		}
	}

	pub fn file_name(self) -> &'static str {
		match self {
			GraphFormat::Json => JSON_EXPORT_NAME,
			GraphFormat::Tbl => TBL_EXPORT_NAME,
		}
	}

	pub fn mime_type(self) -> &'static str {
		match self {
			GraphFormat::Json => "application/json",
			GraphFormat::Tbl => "text/tab-separated-values",
		}
	}
}

/// Parse a whole tbl document. Fails without partial output on the first
/// malformed line.
pub fn parse_tbl(text: &str) -> ExplorerResult<Fragment> {
	let mut fragment = Fragment::default();
	let mut seen = HashSet::new();
	let mut push_node = |fragment: &mut Fragment, id: &str| {
		if seen.insert(id.to_string()) {
			fragment.nodes.push(Node::new(id, Database::Custom));
		}
	};

	for (i, raw) in text.lines().enumerate() {
		let line = i + 1;
		if raw.trim().is_empty() {
			continue;
		}
		let cols: Vec<&str> = raw.split('\t').map(str::trim).collect();
		match cols.as_slice() {
			[""] | ["", _] | ["", _, _] => {
				return Err(ExplorerError::InvalidElement(format!(
					"line {line} has no node id in its first column"
				)));
			}
			[id] => push_node(&mut fragment, *id),
			[source, target] | [source, target, _] => {
				if target.is_empty() {
					return Err(ExplorerError::InvalidElement(format!(
						"edge on line {line} has no target"
					)));
				}
				let probability = match cols.get(2) {
					Some(value) => parse_probability(line, value)?,
					None => 1.0,
				};
				push_node(&mut fragment, *source);
				push_node(&mut fragment, *target);
				fragment
					.edges
					.push(Edge::interaction(*source, *target, probability));
			}
			_ => {
				return Err(ExplorerError::TooManyColumns {
					line,
					columns: cols.len(),
				});
			}
		}
	}
	Ok(fragment)
}

fn parse_probability(line: usize, value: &str) -> ExplorerResult<f64> {
	let invalid = || ExplorerError::InvalidProbability {
		line,
		value: value.to_string(),
	};
	let p: f64 = value.parse().map_err(|_| invalid())?;
	if (0.0..=1.0).contains(&p) {
		Ok(p)
	} else {
		Err(invalid())
	}
}

/// Unique node ids one per line, a newline, then unique edge lines.
///
/// Edges without a probability are written with two columns so they read
/// back with the implicit probability of 1.
pub fn export_tbl(store: &GraphStore) -> String {
	let mut seen = HashSet::new();
	let nodes: Vec<&str> = store
		.nodes()
		.map(|n| n.id.as_str())
		.filter(|id| seen.insert(*id))
		.collect();

	let mut seen = HashSet::new();
	let edges: Vec<String> = store
		.edges()
		.map(|e| match e.probability {
			Some(p) => format!("{}\t{}\t{}", e.source, e.target, p),
			None => format!("{}\t{}", e.source, e.target),
		})
		.filter(|line| seen.insert(line.clone()))
		.collect();

	format!("{}\n{}", nodes.join("\n"), edges.join("\n"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tbl_lines_become_nodes_and_edges() {
		let fragment = parse_tbl("A\nA\tB\nB\tC\t0.35\n\n").unwrap();
		let ids: Vec<_> = fragment.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["A", "B", "C"]);
		assert_eq!(fragment.edges.len(), 2);
		assert_eq!(fragment.edges[0].probability, Some(1.0));
		assert_eq!(fragment.edges[1].probability, Some(0.35));
		assert!(fragment.nodes.iter().all(|n| n.database == Database::Custom));
	}

	#[test]
	fn tbl_tolerates_crlf_line_endings() {
		let fragment = parse_tbl("A\tB\t0.5\r\nC\r\n").unwrap();
		assert_eq!(fragment.edges[0].probability, Some(0.5));
		assert!(fragment.contains_node("C"));
	}

	#[test]
	fn tbl_with_four_columns_is_rejected() {
		match parse_tbl("A\tB\n A\tB\t0.5\textra") {
			Err(ExplorerError::TooManyColumns { line, columns }) => {
				assert_eq!((line, columns), (2, 4));
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn tbl_with_empty_first_column_is_rejected() {
		assert!(matches!(
			parse_tbl("A\tB\n\tX\tY\t0.5\n"),
			Err(ExplorerError::TooManyColumns { line: 2, columns: 4 })
		));
		assert!(matches!(
			parse_tbl("A\tB\n\tX\n"),
			Err(ExplorerError::InvalidElement(_))
		));
		assert!(parse_tbl("A\n  \n\t\nB").is_ok());
	}

	#[test]
	fn tbl_with_bad_probability_is_rejected() {
		assert!(matches!(
			parse_tbl("A\tB\thigh"),
			Err(ExplorerError::InvalidProbability { line: 1, .. })
		));
		assert!(parse_tbl("A\tB\t1.5").is_err());
	}

	#[test]
	fn export_lists_nodes_then_edges() {
		let store = GraphStore::from_fragment(Fragment::new(
			vec![
				Node::new("A", Database::Smest),
				Node::new("B", Database::Smest),
				Node::new("H", Database::Human),
			],
			vec![Edge::interaction("A", "B", 0.8), Edge::homology("H", "A").without_probability()],
		));
		assert_eq!(export_tbl(&store), "A\nB\nH\nA\tB\t0.8\nH\tA");

		let reread = parse_tbl(&export_tbl(&store)).unwrap();
		assert_eq!(reread.nodes.len(), 3);
		assert_eq!(reread.edges.len(), 2);
	}

	#[test]
	fn format_is_chosen_by_extension() {
		assert_eq!(GraphFormat::from_file_name("net.JSON"), GraphFormat::Json);
		assert_eq!(GraphFormat::from_file_name("net.tbl"), GraphFormat::Tbl);
		assert_eq!(GraphFormat::Tbl.file_name(), "graph-export.tbl");
	}
}
