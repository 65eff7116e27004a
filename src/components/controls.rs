use leptos::prelude::*;
use web_sys::{Event, HtmlInputElement, MouseEvent};

use super::session::{ClickBehaviour, ExplorerHandle};
use crate::network::fetch::{ExpressionQuery, SampleMode};
use crate::network::{Database, Explorer, GraphFormat, PathLengthMode};

fn database_options() -> impl IntoView {
	Database::ALL
		.into_iter()
		.filter(|db| !db.is_homolog() && *db != Database::Custom)
		.map(|db| view! { <option value=db.as_str()>{db.as_str()}</option> })
		.collect_view()
}

/// Side panel with every graph control of the explorer page.
#[component]
pub fn ControlPanel(handle: ExplorerHandle) -> impl IntoView {
	view! {
		<aside class="control-panel">
			<LookupForm handle=handle />
			<FilterControls handle=handle />
			<GraphActions handle=handle />
			<EditorForm handle=handle />
			<ExpressionForm handle=handle />
			<FileControls handle=handle />
		</aside>
	}
}

#[component]
fn LookupForm(handle: ExplorerHandle) -> impl IntoView {
	let symbol = RwSignal::new(String::new());
	let database = RwSignal::new(Database::Smest);

	view! {
		<fieldset>
			<legend>"Add gene"</legend>
			<input
				type="text"
				placeholder="Gene symbol"
				prop:value=move || symbol.get()
				on:input=move |ev| symbol.set(event_target_value(&ev))
			/>
			<select on:change=move |ev| {
				if let Ok(db) = event_target_value(&ev).parse() {
					database.set(db);
				}
			}>{database_options()}</select>
			<button on:click=move |_| {
				handle.lookup(symbol.get_untracked(), database.get_untracked())
			}>"Search"</button>
		</fieldset>
	}
}

#[component]
fn FilterControls(handle: ExplorerHandle) -> impl IntoView {
	let terms = RwSignal::new(String::new());
	let threshold = RwSignal::new(handle.with(|e| e.filter_state().confidence_threshold));
	let homologs = RwSignal::new(handle.with(Explorer::shows_homologs));

	view! {
		<fieldset>
			<legend>"Filters"</legend>
			<label>
				"Search "
				<input
					type="text"
					placeholder="Comma-separated symbols"
					prop:value=move || terms.get()
					on:input=move |ev| terms.set(event_target_value(&ev))
				/>
			</label>
			<button on:click=move |_| handle.apply(|e| e.search(&terms.get_untracked()))>
				"Highlight"
			</button>
			<button on:click=move |_| {
				terms.set(String::new());
				handle.apply(Explorer::clear_search);
			}>"Clear"</button>

			<label>
				"Confidence "
				{move || format!("{:.2}", threshold.get())}
				<input
					type="range"
					min="0"
					max="1"
					step="0.05"
					prop:value=move || threshold.get().to_string()
					on:change=move |ev| {
						if let Ok(value) = event_target_value(&ev).parse::<f64>() {
							threshold.set(value);
							handle.apply(|e| e.set_confidence_threshold(value));
						}
					}
				/>
			</label>

			<label>
				"Path length 2 "
				<select on:change=move |ev| {
					if let Ok(mode) = event_target_value(&ev).parse::<PathLengthMode>() {
						handle.apply(|e| e.set_path_length_mode(mode));
					}
				}>
					<option value="hide">"hide"</option>
					<option value="show">"show"</option>
				</select>
			</label>

			<label>
				<input
					type="checkbox"
					prop:checked=move || homologs.get()
					on:change=move |ev| {
						let show = event_target_checked(&ev);
						homologs.set(show);
						handle.apply(|e| e.set_show_homologs(show));
					}
				/>
				" Show human homologs"
			</label>
		</fieldset>
	}
}

#[component]
fn GraphActions(handle: ExplorerHandle) -> impl IntoView {
	let behaviour = handle.behaviour;

	view! {
		<fieldset>
			<legend>"Graph"</legend>
			<label>
				<input
					type="radio"
					name="click-behaviour"
					prop:checked=move || behaviour.get() == ClickBehaviour::Expand
					on:change=move |_| behaviour.set(ClickBehaviour::Expand)
				/>
				" Expand on click"
			</label>
			<label>
				<input
					type="radio"
					name="click-behaviour"
					prop:checked=move || behaviour.get() == ClickBehaviour::Delete
					on:change=move |_| behaviour.set(ClickBehaviour::Delete)
				/>
				" Delete on click"
			</label>
			<button on:click=move |_| handle.show_connections()>"Show connections"</button>
			<button on:click=move |_| {
				handle.apply(|e| {
					e.remove_unconnected();
				})
			}>"Remove unconnected"</button>
			<button on:click=move |_| handle.apply(Explorer::delete_all)>"Delete all"</button>
		</fieldset>
	}
}

#[component]
fn EditorForm(handle: ExplorerHandle) -> impl IntoView {
	let name = RwSignal::new(String::new());
	let homolog = RwSignal::new(String::new());
	let source = RwSignal::new(String::new());
	let target = RwSignal::new(String::new());
	let probability = RwSignal::new(String::from("1"));

	let text_input = move |placeholder: &'static str, value: RwSignal<String>| {
		view! {
			<input
				type="text"
				placeholder=placeholder
				prop:value=move || value.get()
				on:input=move |ev| value.set(event_target_value(&ev))
			/>
		}
	};

	let add_node = move |_: MouseEvent| {
		let homolog = homolog.get_untracked();
		if handle
			.update(|e| e.add_custom_node(&name.get_untracked(), Some(homolog.as_str())))
			.is_some()
		{
			name.set(String::new());
		}
	};
	let add_edge = move |_: MouseEvent| {
		let Ok(p) = probability.get_untracked().trim().parse::<f64>() else {
			handle.fail("Probability must be a number between 0 and 1");
			return;
		};
		handle.update(|e| e.add_custom_edge(&source.get_untracked(), &target.get_untracked(), p));
	};

	view! {
		<fieldset>
			<legend>"Editor"</legend>
			{text_input("Node name", name)}
			{text_input("Human homolog (optional)", homolog)}
			<button on:click=add_node>"Add node"</button>
			{text_input("Source", source)}
			{text_input("Target", target)}
			{text_input("Probability", probability)}
			<button on:click=add_edge>"Add edge"</button>
		</fieldset>
	}
}

#[component]
fn ExpressionForm(handle: ExplorerHandle) -> impl IntoView {
	let experiment = RwSignal::new(String::new());
	let first = RwSignal::new(String::new());
	let second = RwSignal::new(String::new());
	let two_sample = RwSignal::new(false);
	let legend = handle.legend();

	let submit = move |_: MouseEvent| {
		let mode = if two_sample.get_untracked() {
			SampleMode::TwoSample
		} else {
			SampleMode::OneSample
		};
		let (first, second) = (first.get_untracked(), second.get_untracked());
		match ExpressionQuery::new(&experiment.get_untracked(), (&first, &second), mode) {
			Ok(query) => handle.map_expression(query),
			Err(err) => handle.fail(err.to_string()),
		}
	};

	view! {
		<fieldset>
			<legend>"Expression"</legend>
			<input
				type="text"
				placeholder="Experiment"
				prop:value=move || experiment.get()
				on:input=move |ev| experiment.set(event_target_value(&ev))
			/>
			<input
				type="text"
				placeholder="Sample"
				prop:value=move || first.get()
				on:input=move |ev| first.set(event_target_value(&ev))
			/>
			<label>
				<input
					type="checkbox"
					prop:checked=move || two_sample.get()
					on:change=move |ev| two_sample.set(event_target_checked(&ev))
				/>
				" Compare two samples"
			</label>
			<Show when=move || two_sample.get()>
				<input
					type="text"
					placeholder="Second sample"
					prop:value=move || second.get()
					on:input=move |ev| second.set(event_target_value(&ev))
				/>
			</Show>
			<button on:click=submit>"Map expression"</button>
			<button on:click=move |_| handle.apply(Explorer::clear_expression)>"Clear"</button>
			<div class="expression-legend" inner_html=move || legend.get().unwrap_or_default()></div>
		</fieldset>
	}
}

#[component]
fn FileControls(handle: ExplorerHandle) -> impl IntoView {
	let on_file = move |ev: Event| {
		let input: HtmlInputElement = event_target(&ev);
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			handle.import_file(file);
		}
		// Allow importing the same file twice in a row.
		input.set_value("");
	};

	view! {
		<fieldset>
			<legend>"Files"</legend>
			<input type="file" accept=".json,.tbl,.txt,.tsv" on:change=on_file />
			<button on:click=move |_| handle.export(GraphFormat::Json)>"Export JSON"</button>
			<button on:click=move |_| handle.export(GraphFormat::Tbl)>"Export tbl"</button>
		</fieldset>
	}
}
