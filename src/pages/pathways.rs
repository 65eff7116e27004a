use leptos::prelude::*;
use log::{info, warn};

use crate::browser;
use crate::network::panels::{PanelQuery, PathwayPanel, SymbolMatch, parse_embedded_panels};

/// Id of the `<script>` block listing the precomputed panels.
pub const PANELS_ID: &str = "pathway-panels";

fn load_panels() -> Vec<PathwayPanel> {
	let Some(json) = browser::embedded_text(PANELS_ID) else {
		return Vec::new();
	};
	match parse_embedded_panels(&json) {
		Ok(panels) => {
			info!("loaded {} pathway panels", panels.len());
			panels
		}
		Err(err) => {
			warn!("could not read pathway panels: {err}");
			Vec::new()
		}
	}
}

/// Precomputed pathway panels filtered by the genes they contain.
#[component]
pub fn Pathways() -> impl IntoView {
	let panels = StoredValue::new(load_panels());
	let total = panels.with_value(Vec::len);
	let input = RwSignal::new(String::new());
	let homologs = RwSignal::new(false);

	let query = Memo::new(move |_| {
		let mode = if homologs.get() {
			SymbolMatch::IdOrHomolog
		} else {
			SymbolMatch::IdOnly
		};
		PanelQuery::parse(&input.get(), mode)
	});
	let shown = Memo::new(move |_| query.with(|q| panels.with_value(|p| q.apply(p))));

	view! {
		<section class="pathways">
			<div class="panel-filter">
				<input
					type="text"
					placeholder="Genes, comma separated"
					prop:value=move || input.get()
					on:input=move |ev| input.set(event_target_value(&ev))
				/>
				<label>
					<input
						type="checkbox"
						prop:checked=move || homologs.get()
						on:change=move |ev| homologs.set(event_target_checked(&ev))
					/>
					" Match human homologs"
				</label>
				<span class="panel-count">
					{move || shown.with(|s| s.iter().filter(|v| **v).count())}
					" / "
					{total}
					" pathways shown"
				</span>
			</div>
			<ul class="panel-list">
				{panels
					.with_value(|p| {
						p.iter()
							.enumerate()
							.map(|(i, panel)| {
								let visible = move || {
									shown.with(|s| s.get(i).copied().unwrap_or(false))
								};
								view! {
									<li class="pathway-panel" class:hidden=move || !visible()>
										<span class="panel-id">{panel.id.clone()}</span>
										<span class="panel-size">
											{panel.graph.node_count()}
											" genes"
										</span>
									</li>
								}
							})
							.collect_view()
					})}
			</ul>
		</section>
	}
}
