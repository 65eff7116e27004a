use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::*;
use crate::network::model::{EdgeKey, EdgeKind};

fn gene(id: &str) -> Node {
	Node::new(id, Database::Dresden)
}

fn stubs(n: usize) -> Fragment {
	Fragment::new((0..n).map(|i| gene(&format!("g{i}"))).collect(), vec![])
}

fn triangle() -> Fragment {
	Fragment::new(
		vec![
			gene("A").with_homolog("HA"),
			gene("B").with_homolog("HB"),
			gene("C"),
		],
		vec![
			Edge::interaction("A", "B", 0.8).with_pathlength(1),
			Edge::interaction("B", "C", 0.4).with_pathlength(1),
		],
	)
}

fn ids(explorer: &Explorer) -> (BTreeSet<String>, BTreeSet<EdgeKey>) {
	(
		explorer.store().nodes().map(|n| n.id.clone()).collect(),
		explorer.store().edges().map(Edge::key).collect(),
	)
}

#[test]
fn merge_refilters_with_active_threshold() {
	let mut explorer = Explorer::default();
	let received = explorer.admit(triangle());
	assert_eq!(
		received,
		Received::Merged(MergeReport {
			nodes_added: 3,
			edges_added: 2
		})
	);
	assert!(explorer.visibility().edge_visible(&EdgeKey::new("A", "B")));
	assert!(!explorer.visibility().edge_visible(&EdgeKey::new("B", "C")));

	explorer.set_confidence_threshold(0.3);
	assert!(explorer.visibility().edge_visible(&EdgeKey::new("B", "C")));
}

#[test]
fn merging_twice_is_idempotent() {
	let mut explorer = Explorer::default();
	explorer.admit(triangle());
	let once = explorer.store().snapshot();
	let second = explorer.admit(triangle());
	assert_eq!(second, Received::Merged(MergeReport::default()));
	assert_eq!(explorer.store().snapshot(), once);
}

#[test]
fn large_fragment_waits_for_confirmation() {
	let mut explorer = Explorer::default();
	match explorer.admit(stubs(100)) {
		Received::AwaitingConfirmation(plan) => assert_eq!(plan.node_count, 100),
		other => panic!("expected confirmation, got {other:?}"),
	}
	assert!(explorer.store().is_empty());
	assert_eq!(explorer.pending_plan().map(|p| p.node_count), Some(100));

	let report = explorer.confirm_pending().unwrap();
	assert_eq!(report.nodes_added, 100);
	assert!(explorer.pending_plan().is_none());
	assert!(matches!(explorer.confirm_pending(), Err(ExplorerError::NothingPending)));
}

#[test]
fn cancelled_merge_leaves_graph_untouched() {
	let mut explorer = Explorer::default().with_graph(triangle());
	let before = ids(&explorer);
	explorer.admit(stubs(150));
	explorer.cancel_pending().unwrap();
	assert_eq!(ids(&explorer), before);
	assert!(explorer.cancel_pending().is_err());
}

#[test]
fn stale_response_is_dropped() {
	let mut explorer = Explorer::default().with_graph(triangle());
	let first = explorer.begin_expand("A").unwrap();
	let second = explorer.begin_expand("B").unwrap();

	let late = Fragment::new(vec![gene("OLD")], vec![]);
	assert_eq!(explorer.receive(first.ticket, late), Received::Stale);
	assert!(!explorer.store().contains_node("OLD"));

	let fresh = Fragment::new(vec![gene("NEW")], vec![Edge::interaction("B", "NEW", 0.9)]);
	assert!(matches!(explorer.receive(second.ticket, fresh), Received::Merged(_)));
	assert!(explorer.store().contains_node("NEW"));
}

#[test]
fn expand_marks_node_and_refuses_homologs() {
	let mut explorer = Explorer::default().with_graph(triangle());
	let request = explorer.begin_expand("A").unwrap();
	assert_eq!(request.symbol, "A");
	assert_eq!(request.database, Database::Dresden);
	assert_eq!(
		explorer.store().node("A").unwrap().color.as_deref(),
		Some(EXPANDED_NODE_COLOR)
	);

	explorer.set_show_homologs(true);
	assert!(matches!(
		explorer.begin_expand("HA"),
		Err(ExplorerError::HomologNotExpandable(_))
	));
	assert!(matches!(explorer.begin_expand("nope"), Err(ExplorerError::UnknownNode(_))));
	assert!(explorer.begin_lookup("  ", Database::Smest).is_err());
}

#[test]
fn homolog_toggle_round_trips() {
	let mut explorer = Explorer::default().with_graph(triangle());
	let before = ids(&explorer);

	explorer.set_show_homologs(true);
	assert!(explorer.store().contains_node("HA"));
	assert!(explorer.store().contains_edge(&EdgeKey::new("HA", "HB")));
	let expanded = ids(&explorer);

	// Repeated toggles never accumulate duplicates.
	explorer.set_show_homologs(false);
	explorer.set_show_homologs(true);
	assert_eq!(ids(&explorer), expanded);

	explorer.set_show_homologs(false);
	assert_eq!(ids(&explorer), before);
	assert!(!explorer.shows_homologs());
}

#[test]
fn merge_with_homologs_on_projects_new_nodes() {
	let mut explorer = Explorer::default().with_graph(triangle());
	explorer.set_show_homologs(true);

	explorer.admit(Fragment::new(
		vec![gene("D").with_homolog("HD")],
		vec![Edge::interaction("A", "D", 0.9).with_pathlength(1)],
	));
	let store = explorer.store();
	assert_eq!(store.node("HD").unwrap().database, Database::Human);
	let mirrored = store
		.edges()
		.find(|e| e.key() == EdgeKey::new("HA", "HD"))
		.unwrap();
	assert_eq!(mirrored.kind, EdgeKind::HomologyInt);
}

#[test]
fn node_count_skips_homologs_and_notifies() {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = seen.clone();

	let config = ExplorerConfig::default().with_node_count_warning(3);
	let mut explorer = Explorer::new(config).with_graph(triangle());
	explorer.set_count_listener(move |count| sink.borrow_mut().push(count));
	explorer.set_show_homologs(true);
	explorer.remove_node("C").unwrap();

	let counts: Vec<(usize, bool)> = seen.borrow().iter().map(|c| (c.count, c.warning)).collect();
	assert_eq!(counts, [(3, true), (3, true), (2, false)]);
}

#[test]
fn remove_unconnected_respects_filter() {
	let mut explorer = Explorer::default().with_graph(Fragment::new(
		vec![gene("A"), gene("B"), gene("C"), gene("D")],
		vec![
			Edge::interaction("A", "B", 0.8),
			Edge::interaction("C", "D", 0.9).with_pathlength(2),
		],
	));
	let removed = explorer.remove_unconnected();
	assert_eq!(removed, ["C", "D"]);
	assert_eq!(explorer.store().node_count(), 2);
	assert_eq!(explorer.store().edge_count(), 1);
}

#[test]
fn search_is_recomputed_after_mutations() {
	let mut explorer = Explorer::default().with_graph(triangle());
	explorer.search("hb, c");
	assert!(explorer.visibility().is_highlighted("B"));
	assert!(explorer.visibility().is_highlighted("C"));

	explorer.remove_node("C").unwrap();
	assert_eq!(explorer.visibility().highlighted_count(), 1);

	explorer.clear_search();
	assert_eq!(explorer.visibility().highlighted_count(), 0);
}

#[test]
fn path_length_mode_toggles_two_hop_edges() {
	let mut explorer = Explorer::default().with_graph(Fragment::new(
		vec![gene("A"), gene("B")],
		vec![Edge::interaction("A", "B", 0.9).with_pathlength(2)],
	));
	let key = EdgeKey::new("A", "B");
	assert!(!explorer.visibility().edge_visible(&key));
	explorer.set_path_length_mode(PathLengthMode::Show);
	assert!(explorer.visibility().edge_visible(&key));
}

#[test]
fn bad_import_does_not_mutate() {
	let mut explorer = Explorer::default().with_graph(triangle());
	let before = ids(&explorer);

	assert!(explorer.import(GraphFormat::Tbl, "X\tY\n1\t2\t3\t4").is_err());
	assert!(explorer.import(GraphFormat::Json, "{\"nodes\": [").is_err());
	assert_eq!(ids(&explorer), before);

	let received = explorer.import(GraphFormat::Tbl, "A\tZ\t0.7\n").unwrap();
	assert!(matches!(received, Received::Merged(_)));
	assert!(explorer.store().contains_edge(&EdgeKey::new("A", "Z")));
}

#[test]
fn export_round_trips_through_import() {
	let mut explorer = Explorer::default().with_graph(triangle());
	let json = explorer.export(GraphFormat::Json).unwrap();
	let before = ids(&explorer);

	explorer.delete_all();
	assert!(explorer.store().is_empty());
	explorer.import(GraphFormat::Json, &json).unwrap();
	assert_eq!(ids(&explorer), before);
}

#[test]
fn editor_nodes_and_edges() {
	let mut explorer = Explorer::default();
	assert!(matches!(explorer.add_custom_node(" ", None), Err(ExplorerError::MissingName)));

	explorer.add_custom_node("myGene", Some("TP53")).unwrap();
	explorer.add_custom_node("other", Some("")).unwrap();
	let node = explorer.store().node("myGene").unwrap();
	assert_eq!(node.database, Database::Custom);
	assert_eq!(node.homolog(), Some("TP53"));
	assert_eq!(explorer.store().node("other").unwrap().homolog, None);

	explorer.add_custom_edge("myGene", "other", 0.9).unwrap();
	assert!(explorer.add_custom_edge("myGene", "ghost", 0.9).is_err());
	assert_eq!(explorer.store().edge_count(), 1);
}

#[test]
fn graph_elements_and_show_connections() {
	let mut explorer = Explorer::default();
	assert!(matches!(explorer.begin_show_connections(), Err(ExplorerError::EmptyGraph)));

	explorer.commit_merge(Fragment::new(
		vec![gene("A").with_homolog("HA"), Node::new("B", Database::Smest)],
		vec![],
	));
	explorer.set_show_homologs(true);
	let (_, elements) = explorer.begin_show_connections().unwrap();
	assert_eq!(elements.node_ids, "A,B");
	assert_eq!(elements.databases, "Dresden,Smest");
}

#[test]
fn expression_mapping_and_delete_all() {
	let mut explorer = Explorer::default();
	assert!(explorer.apply_expression(ExpressionMap::default()).is_err());

	explorer.commit_merge(triangle());
	let mut map = ExpressionMap::default();
	map.colormap.insert("A".into(), "#aa0000".into());
	map.legend = "<b>legend</b>".into();
	assert_eq!(explorer.apply_expression(map).unwrap(), 1);
	assert_eq!(explorer.legend(), Some("<b>legend</b>"));

	explorer.delete_all();
	assert!(explorer.legend().is_none());
	assert_eq!(explorer.node_count().count, 0);
}
