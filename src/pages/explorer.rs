use leptos::prelude::*;
use log::warn;

use crate::browser;
use crate::components::controls::ControlPanel;
use crate::components::dialogs::{ConfirmDialog, ErrorBanner, ImportErrorDialog};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::session::ExplorerHandle;
use crate::network::{ExplorerConfig, Fragment};

/// Id of the `<script>` block holding the graph the server started with.
pub const INITIAL_GRAPH_ID: &str = "initial-graph";

/// Interactive network explorer.
#[component]
pub fn NetExplorer(#[prop(optional)] config: Option<ExplorerConfig>) -> impl IntoView {
	let (initial, load_error) = match browser::embedded_text(INITIAL_GRAPH_ID) {
		Some(json) => match Fragment::from_json(&json) {
			Ok(fragment) => (fragment, None),
			Err(err) => (Fragment::default(), Some(err)),
		},
		None => (Fragment::default(), None),
	};
	let handle = ExplorerHandle::new(config.unwrap_or_default(), initial);
	if let Some(err) = load_error {
		warn!("ignoring embedded graph: {err}");
		handle.fail(err.to_string());
	}

	let graph = handle.graph();
	let count = handle.count();
	let on_node_click = Callback::new(move |id: String| handle.node_clicked(id));

	view! {
		<div class="explorer">
			<ControlPanel handle=handle />
			<div class="graph-area">
				<ForceGraphCanvas data=graph on_node_click=on_node_click />
				<div class="graph-overlay">
					<span class="node-count" class:warning=move || count.get().warning>
						{move || count.get().count}
						" nodes"
					</span>
				</div>
			</div>
			<ErrorBanner message=handle.banner() />
			<ConfirmDialog handle=handle />
			<ImportErrorDialog handle=handle />
		</div>
	}
}
