//! Absorbing fetched fragments into the graph.

use log::info;

use super::fragment::Fragment;
use super::store::GraphStore;

/// Fragments with at least this many nodes need user confirmation.
pub const CONFIRMATION_THRESHOLD: usize = 100;

/// What merging a fragment would involve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergePlan {
	pub node_count: usize,
	pub requires_confirmation: bool,
}

/// Elements actually added by a commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
	pub nodes_added: usize,
	pub edges_added: usize,
}

impl MergeReport {
	pub fn is_noop(&self) -> bool {
		self.nodes_added == 0 && self.edges_added == 0
	}
}

/// Identifies one outstanding backend request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestTicket {
	generation: u64,
}

impl RequestTicket {
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

/// Two-phase merge with a size guard and stale-response detection.
#[derive(Clone, Debug)]
pub struct MergeEngine {
	confirmation_threshold: usize,
	generation: u64,
}

impl Default for MergeEngine {
	fn default() -> Self {
		Self::new(CONFIRMATION_THRESHOLD)
	}
}

impl MergeEngine {
	pub fn new(confirmation_threshold: usize) -> Self {
		Self {
			confirmation_threshold,
			generation: 0,
		}
	}

	pub fn plan_merge(&self, fragment: &Fragment) -> MergePlan {
		let node_count = fragment.node_count();
		MergePlan {
			node_count,
			requires_confirmation: node_count >= self.confirmation_threshold,
		}
	}

	/// Merge nodes, then edges. Callers must have obtained confirmation when
	/// [`MergePlan::requires_confirmation`] was set.
	pub fn commit_merge(&self, store: &mut GraphStore, fragment: Fragment) -> MergeReport {
		let report = MergeReport {
			nodes_added: store.upsert_nodes(fragment.nodes),
			edges_added: store.upsert_edges(fragment.edges),
		};
		info!(
			"merged fragment: +{} nodes, +{} edges",
			report.nodes_added, report.edges_added
		);
		report
	}

	/// Start a new request, superseding every earlier one.
	pub fn begin_request(&mut self) -> RequestTicket {
		self.generation += 1;
		RequestTicket {
			generation: self.generation,
		}
	}

	/// False once a newer request has been started.
	pub fn is_current(&self, ticket: RequestTicket) -> bool {
		ticket.generation == self.generation
	}
}
