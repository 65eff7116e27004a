//! One interactive exploration session.
//!
//! [`Explorer`] owns the graph, the merge engine and the visibility filter.
//! Every mutating method ends with [`Explorer::refresh`], which recomputes
//! visibility from scratch and reports the node count, so callers never need
//! to remember to re-filter.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::config::ExplorerConfig;
use super::error::{ExplorerError, ExplorerResult};
use super::expression::{ExpressionMap, clear_expression};
use super::fetch::GraphElements;
use super::filter::{FilterState, PathLengthMode, Visibility, VisibilityFilter};
use super::formats::GraphFormat;
use super::fragment::Fragment;
use super::homologs::{collapse_homologs, expand_homologs};
use super::merge::{MergeEngine, MergePlan, MergeReport, RequestTicket};
use super::model::{Database, EXPANDED_NODE_COLOR, Edge, Node};
use super::store::GraphStore;

#[cfg(test)]
mod tests;

/// Node counter shown next to the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeCount {
	/// Primary (non-homolog) nodes.
	pub count: usize,
	/// Set once the count reaches the configured warning level.
	pub warning: bool,
}

/// Outcome of handing a fragment to the explorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Received {
	Merged(MergeReport),
	/// Parked until [`Explorer::confirm_pending`] or [`Explorer::cancel_pending`].
	AwaitingConfirmation(MergePlan),
	/// A newer request was started; the response was dropped.
	Stale,
}

/// A neighbour lookup waiting for the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
	pub ticket: RequestTicket,
	pub symbol: String,
	pub database: Database,
}

type CountListener = Box<dyn FnMut(NodeCount)>;

pub struct Explorer {
	config: ExplorerConfig,
	store: GraphStore,
	engine: MergeEngine,
	filter: VisibilityFilter,
	show_homologs: bool,
	visibility: Visibility,
	pending: Option<Fragment>,
	legend: Option<String>,
	count_listener: Option<CountListener>,
}

impl Default for Explorer {
	fn default() -> Self {
		Self::new(ExplorerConfig::default())
	}
}

impl Explorer {
	pub fn new(config: ExplorerConfig) -> Self {
		let filter = VisibilityFilter::new(FilterState::new(
			config.confidence_threshold,
			config.path_length_mode,
		));
		Self {
			engine: MergeEngine::new(config.confirmation_threshold),
			config,
			store: GraphStore::new(),
			filter,
			show_homologs: false,
			visibility: Visibility::default(),
			pending: None,
			legend: None,
			count_listener: None,
		}
	}

	/// Start from a server-rendered graph. No confirmation is asked for.
	pub fn with_graph(mut self, fragment: Fragment) -> Self {
		self.commit_merge(fragment);
		self
	}

	pub fn set_count_listener(&mut self, listener: impl FnMut(NodeCount) + 'static) {
		self.count_listener = Some(Box::new(listener));
		self.notify_count();
	}

	pub fn config(&self) -> &ExplorerConfig {
		&self.config
	}

	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	pub fn filter_state(&self) -> &FilterState {
		self.filter.state()
	}

	pub fn visibility(&self) -> &Visibility {
		&self.visibility
	}

	pub fn shows_homologs(&self) -> bool {
		self.show_homologs
	}

	pub fn legend(&self) -> Option<&str> {
		self.legend.as_deref()
	}

	pub fn pending_plan(&self) -> Option<MergePlan> {
		self.pending.as_ref().map(|f| self.engine.plan_merge(f))
	}

	pub fn node_count(&self) -> NodeCount {
		let count = self.store.nodes().filter(|n| n.is_primary()).count();
		NodeCount {
			count,
			warning: count >= self.config.node_count_warning,
		}
	}

	/// Ids and databases of every primary node, as sent to the backend.
	pub fn graph_elements(&self) -> GraphElements {
		let (ids, dbs): (Vec<&str>, Vec<&str>) = self
			.store
			.nodes()
			.filter(|n| n.is_primary())
			.map(|n| (n.id.as_str(), n.database.as_str()))
			.unzip();
		GraphElements {
			node_ids: ids.join(","),
			databases: dbs.join(","),
		}
	}

	pub fn plan_merge(&self, fragment: &Fragment) -> MergePlan {
		self.engine.plan_merge(fragment)
	}

	/// Merge without the size guard, then run the post-merge steps.
	pub fn commit_merge(&mut self, fragment: Fragment) -> MergeReport {
		let report = self.commit(fragment);
		self.refresh();
		report
	}

	/// Start a lookup of `symbol` in `database`.
	pub fn begin_lookup(&mut self, symbol: &str, database: Database) -> ExplorerResult<LookupRequest> {
		let symbol = symbol.trim();
		if symbol.is_empty() {
			return Err(ExplorerError::MissingName);
		}
		Ok(LookupRequest {
			ticket: self.engine.begin_request(),
			symbol: symbol.to_string(),
			database,
		})
	}

	/// Start expanding an existing node and mark it as expanded.
	pub fn begin_expand(&mut self, node_id: &str) -> ExplorerResult<LookupRequest> {
		let node = self
			.store
			.node_mut(node_id)
			.ok_or_else(|| ExplorerError::UnknownNode(node_id.to_string()))?;
		if !node.is_primary() {
			return Err(ExplorerError::HomologNotExpandable(node_id.to_string()));
		}
		node.color = Some(EXPANDED_NODE_COLOR.to_string());
		let (symbol, database) = (node.name.clone(), node.database);
		self.begin_lookup(&symbol, database)
	}

	/// Start a request for the interactions among the current nodes.
	pub fn begin_show_connections(&mut self) -> ExplorerResult<(RequestTicket, GraphElements)> {
		let elements = self.graph_elements();
		if elements.is_empty() {
			return Err(ExplorerError::EmptyGraph);
		}
		Ok((self.engine.begin_request(), elements))
	}

	/// Accept a fetched fragment for a request started earlier.
	pub fn receive(&mut self, ticket: RequestTicket, fragment: Fragment) -> Received {
		if !self.engine.is_current(ticket) {
			warn!(
				"dropping stale response (request {}) with {} nodes",
				ticket.generation(),
				fragment.node_count()
			);
			return Received::Stale;
		}
		self.admit(fragment)
	}

	/// Accept a locally produced fragment, e.g. an imported file.
	pub fn admit(&mut self, fragment: Fragment) -> Received {
		let plan = self.engine.plan_merge(&fragment);
		if plan.requires_confirmation {
			info!("{} nodes need confirmation before merging", plan.node_count);
			self.pending = Some(fragment);
			return Received::AwaitingConfirmation(plan);
		}
		Received::Merged(self.commit_merge(fragment))
	}

	pub fn confirm_pending(&mut self) -> ExplorerResult<MergeReport> {
		let fragment = self.pending.take().ok_or(ExplorerError::NothingPending)?;
		Ok(self.commit_merge(fragment))
	}

	pub fn cancel_pending(&mut self) -> ExplorerResult<()> {
		let fragment = self.pending.take().ok_or(ExplorerError::NothingPending)?;
		info!("discarded pending merge of {} nodes", fragment.node_count());
		Ok(())
	}

	/// Parse an imported file and hand it to [`Explorer::admit`]. A parse
	/// error leaves the graph untouched.
	pub fn import(&mut self, format: GraphFormat, text: &str) -> ExplorerResult<Received> {
		let fragment = format.parse(text).inspect_err(|e| warn!("import rejected: {e}"))?;
		Ok(self.admit(fragment))
	}

	pub fn export(&self, format: GraphFormat) -> ExplorerResult<String> {
		format.export(&self.store)
	}

	pub fn set_show_homologs(&mut self, show: bool) {
		self.show_homologs = show;
		if show {
			let layer = expand_homologs(&self.store);
			self.engine.commit_merge(&mut self.store, layer);
		} else {
			let removed = collapse_homologs(&mut self.store);
			info!("removed {} homolog nodes", removed.len());
		}
		self.refresh();
	}

	pub fn set_confidence_threshold(&mut self, threshold: f64) {
		self.filter.set_confidence_threshold(threshold);
		self.refresh();
	}

	pub fn set_path_length_mode(&mut self, mode: PathLengthMode) {
		self.filter.set_path_length_mode(mode);
		self.refresh();
	}

	pub fn search(&mut self, input: &str) {
		self.filter.set_search(input);
		self.refresh();
	}

	pub fn clear_search(&mut self) {
		self.filter.clear_search();
		self.refresh();
	}

	/// Delete nodes with no edge passing the current filter.
	pub fn remove_unconnected(&mut self) -> Vec<String> {
		let candidates: HashSet<String> = self
			.filter
			.removal_candidates(&self.store)
			.into_iter()
			.collect();
		let removed = self.store.remove_nodes(|n| candidates.contains(&n.id));
		info!("removed {} unconnected nodes", removed.len());
		self.refresh();
		removed
	}

	pub fn remove_node(&mut self, id: &str) -> ExplorerResult<()> {
		if self.store.remove_nodes(|n| n.id == id).is_empty() {
			return Err(ExplorerError::UnknownNode(id.to_string()));
		}
		self.refresh();
		Ok(())
	}

	pub fn delete_all(&mut self) {
		self.store.clear();
		self.pending = None;
		self.legend = None;
		info!("graph cleared");
		self.refresh();
	}

	/// Editor: add a user-authored node.
	pub fn add_custom_node(&mut self, name: &str, homolog: Option<&str>) -> ExplorerResult<()> {
		let name = name.trim();
		if name.is_empty() {
			return Err(ExplorerError::MissingName);
		}
		let mut node = Node::custom(name);
		if let Some(h) = homolog.map(str::trim).filter(|h| !h.is_empty()) {
			node = node.with_homolog(h);
		}
		self.commit(Fragment::new(vec![node], vec![]));
		self.refresh();
		Ok(())
	}

	/// Editor: connect two existing nodes.
	pub fn add_custom_edge(&mut self, source: &str, target: &str, probability: f64) -> ExplorerResult<()> {
		for id in [source, target] {
			if !self.store.contains_node(id) {
				return Err(ExplorerError::UnknownNode(id.to_string()));
			}
		}
		let edge = Edge::interaction(source, target, super::config::clamp_unit(probability));
		self.commit(Fragment::new(vec![], vec![edge]));
		self.refresh();
		Ok(())
	}

	/// Color primary nodes from an expression mapping.
	pub fn apply_expression(&mut self, map: ExpressionMap) -> ExplorerResult<usize> {
		if self.node_count().count == 0 {
			return Err(ExplorerError::EmptyGraph);
		}
		let mapped = map.apply(&mut self.store);
		self.legend = Some(map.legend);
		info!("expression mapped onto {mapped} nodes");
		self.refresh();
		Ok(mapped)
	}

	pub fn clear_expression(&mut self) {
		clear_expression(&mut self.store);
		self.legend = None;
		self.refresh();
	}

	/// Merge and, when homologs are on, project the new nodes too.
	fn commit(&mut self, fragment: Fragment) -> MergeReport {
		let report = self.engine.commit_merge(&mut self.store, fragment);
		if self.show_homologs {
			let layer = expand_homologs(&self.store);
			self.engine.commit_merge(&mut self.store, layer);
		}
		report
	}

	/// Recompute visibility and publish the node count.
	fn refresh(&mut self) {
		self.visibility = self.filter.apply(&self.store);
		debug!(
			"refreshed: {} nodes, {} edges",
			self.store.node_count(),
			self.store.edge_count()
		);
		self.notify_count();
	}

	fn notify_count(&mut self) {
		let count = self.node_count();
		if let Some(listener) = self.count_listener.as_mut() {
			listener(count);
		}
	}
}

impl std::fmt::Debug for Explorer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Explorer")
			.field("nodes", &self.store.node_count())
			.field("edges", &self.store.edge_count())
			.field("filter", self.filter.state())
			.field("show_homologs", &self.show_homologs)
			.field("pending", &self.pending.as_ref().map(Fragment::node_count))
			.finish()
	}
}
