//! Reactive handle around one [`Explorer`], shared by the explorer page and
//! its controls.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use web_sys::File;

use crate::browser;
use crate::components::force_graph::GraphData;
use crate::network::explorer::LookupRequest;
use crate::network::fetch::{self, ExpressionQuery, FetchError};
use crate::network::merge::{MergePlan, RequestTicket};
use crate::network::{
	Database, Explorer, ExplorerConfig, ExplorerError, ExplorerResult, Fragment, GraphFormat,
	NodeCount, Received,
};

/// What a click on a node does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClickBehaviour {
	#[default]
	Expand,
	Delete,
}

/// Copyable bundle of the signals behind the explorer page.
#[derive(Clone, Copy)]
pub struct ExplorerHandle {
	explorer: RwSignal<Explorer, LocalStorage>,
	count: RwSignal<NodeCount>,
	banner: RwSignal<Option<String>>,
	dialog: RwSignal<Option<String>>,
	banner_serial: StoredValue<u64>,
	api_base: StoredValue<String>,
	dismiss_ms: u64,
	/// Current node-click behaviour.
	pub behaviour: RwSignal<ClickBehaviour>,
}

impl ExplorerHandle {
	pub fn new(config: ExplorerConfig, initial: Fragment) -> Self {
		let count = RwSignal::new(NodeCount::default());
		let api_base = StoredValue::new(config.api_base.clone());
		let dismiss_ms = config.error_dismiss_ms;

		let mut explorer = Explorer::new(config).with_graph(initial);
		explorer.set_count_listener(move |c| count.set(c));
		info!("explorer ready: {explorer:?}");

		Self {
			explorer: RwSignal::new_local(explorer),
			count,
			banner: RwSignal::new(None),
			dialog: RwSignal::new(None),
			banner_serial: StoredValue::new(0),
			api_base,
			dismiss_ms,
			behaviour: RwSignal::new(ClickBehaviour::default()),
		}
	}

	pub fn graph(self) -> Signal<GraphData> {
		let explorer = self.explorer;
		Signal::derive(move || explorer.with(GraphData::from_explorer))
	}

	pub fn count(self) -> Signal<NodeCount> {
		self.count.into()
	}

	pub fn pending(self) -> Signal<Option<MergePlan>> {
		let explorer = self.explorer;
		Signal::derive(move || explorer.with(Explorer::pending_plan))
	}

	pub fn legend(self) -> Signal<Option<String>> {
		let explorer = self.explorer;
		Signal::derive(move || explorer.with(|e| e.legend().map(str::to_string)))
	}

	/// Fetch-error banner text.
	pub fn banner(self) -> Signal<Option<String>> {
		self.banner.into()
	}

	/// Import-error dialog text.
	pub fn dialog(self) -> Signal<Option<String>> {
		self.dialog.into()
	}

	pub fn dismiss_dialog(self) {
		self.dialog.set(None);
	}

	pub fn with<T>(self, f: impl FnOnce(&Explorer) -> T) -> T {
		self.explorer.with_untracked(f)
	}

	/// Run a mutation, reporting its error in the banner.
	pub fn update<T>(self, f: impl FnOnce(&mut Explorer) -> ExplorerResult<T>) -> Option<T> {
		match self.explorer.try_update(f)? {
			Ok(value) => Some(value),
			Err(err) => {
				self.fail(err.to_string());
				None
			}
		}
	}

	/// Run a mutation that cannot fail.
	pub fn apply(self, f: impl FnOnce(&mut Explorer)) {
		self.explorer.update(f);
	}

	/// Show `message` in the banner; it is cleared after the configured delay
	/// unless a newer message replaced it.
	pub fn fail(self, message: impl Into<String>) {
		let message = message.into();
		warn!("{message}");
		let serial = self.banner_serial.get_value() + 1;
		self.banner_serial.set_value(serial);
		self.banner.set(Some(message));

		let (banner, current) = (self.banner, self.banner_serial);
		set_timeout(
			move || {
				if current.get_value() == serial {
					banner.set(None);
				}
			},
			Duration::from_millis(self.dismiss_ms),
		);
	}

	fn received(self, received: Received) {
		match received {
			Received::Merged(report) if report.is_noop() => info!("response added nothing new"),
			Received::Merged(report) => info!(
				"merged {} nodes and {} edges",
				report.nodes_added, report.edges_added
			),
			Received::AwaitingConfirmation(plan) => {
				info!("waiting for confirmation of {} nodes", plan.node_count)
			}
			Received::Stale => {}
		}
	}

	fn merge_response(self, ticket: RequestTicket, response: Result<Fragment, FetchError>) {
		match response {
			Ok(fragment) => {
				if let Some(received) = self.explorer.try_update(|e| e.receive(ticket, fragment)) {
					self.received(received);
				}
			}
			Err(err) => self.fail(err.to_string()),
		}
	}

	fn fetch_neighbours(self, request: LookupRequest) {
		spawn_local(async move {
			let api_base = self.api_base.get_value();
			let response = fetch::expand_node(&api_base, &request.symbol, request.database).await;
			self.merge_response(request.ticket, response);
		});
	}

	/// Look up a gene by symbol and merge its neighbourhood.
	pub fn lookup(self, symbol: String, database: Database) {
		if let Some(request) = self.update(|e| e.begin_lookup(&symbol, database)) {
			self.fetch_neighbours(request);
		}
	}

	pub fn expand(self, node_id: String) {
		if let Some(request) = self.update(|e| e.begin_expand(&node_id)) {
			self.fetch_neighbours(request);
		}
	}

	pub fn node_clicked(self, node_id: String) {
		match self.behaviour.get_untracked() {
			ClickBehaviour::Expand => self.expand(node_id),
			ClickBehaviour::Delete => {
				self.update(|e| e.remove_node(&node_id));
			}
		}
	}

	pub fn show_connections(self) {
		let Some((ticket, elements)) = self.update(Explorer::begin_show_connections) else {
			return;
		};
		spawn_local(async move {
			let api_base = self.api_base.get_value();
			let response = fetch::show_connections(&api_base, &elements).await;
			self.merge_response(ticket, response);
		});
	}

	pub fn map_expression(self, query: ExpressionQuery) {
		let elements = self.with(Explorer::graph_elements);
		if elements.is_empty() {
			self.fail(ExplorerError::EmptyGraph.to_string());
			return;
		}
		spawn_local(async move {
			let api_base = self.api_base.get_value();
			match fetch::map_expression(&api_base, &query, &elements).await {
				Ok(map) => {
					self.update(|e| e.apply_expression(map));
				}
				Err(err) => self.fail(err.to_string()),
			}
		});
	}

	pub fn confirm(self) {
		if let Some(report) = self.update(Explorer::confirm_pending) {
			self.received(Received::Merged(report));
		}
	}

	pub fn cancel(self) {
		self.update(Explorer::cancel_pending);
	}

	/// Read an uploaded file and merge it. Errors go to the dialog, not the
	/// banner, and leave the graph untouched.
	pub fn import_file(self, file: File) {
		let format = GraphFormat::from_file_name(&file.name());
		spawn_local(async move {
			let text = match browser::read_file(&file).await {
				Ok(text) => text,
				Err(err) => {
					self.dialog.set(Some(browser::describe(&err)));
					return;
				}
			};
			match self.explorer.try_update(|e| e.import(format, &text)) {
				Some(Ok(received)) => self.received(received),
				Some(Err(err)) => self.dialog.set(Some(err.to_string())),
				None => {}
			}
		});
	}

	pub fn export(self, format: GraphFormat) {
		let text = match self.with(|e| e.export(format)) {
			Ok(text) => text,
			Err(err) => return self.fail(err.to_string()),
		};
		if let Err(err) = browser::download(format.file_name(), &text, format.mime_type()) {
			self.fail(browser::describe(&err));
		}
	}
}
