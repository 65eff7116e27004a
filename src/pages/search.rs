use leptos::prelude::*;
use log::warn;

use crate::browser;
use crate::network::filter::CategorySelection;
use crate::network::panels::{SearchResult, parse_search_results};
use crate::network::Database;

/// Id of the `<script>` block listing the gene search results.
pub const RESULTS_ID: &str = "search-results";

fn load_results() -> Vec<SearchResult> {
	let Some(json) = browser::embedded_text(RESULTS_ID) else {
		return Vec::new();
	};
	parse_search_results(&json).unwrap_or_else(|err| {
		warn!("could not read search results: {err}");
		Vec::new()
	})
}

/// Gene search result cards with one category button per catalog present.
#[component]
pub fn SearchResults() -> impl IntoView {
	let results = StoredValue::new(load_results());
	let selection = RwSignal::new(CategorySelection::All);

	let mut categories: Vec<Database> = results.with_value(|r| r.iter().map(|x| x.database).collect());
	categories.sort();
	categories.dedup();

	let shown = Memo::new(move |_| {
		let selection = selection.get();
		results.with_value(|r| selection.apply(r))
	});

	let button = move |choice: CategorySelection| {
		view! {
			<button
				class="category-button"
				class:active=move || selection.get() == choice
				on:click=move |_| selection.set(choice)
			>
				{choice.label()}
			</button>
		}
	};

	view! {
		<section class="search-results">
			<h2>{move || selection.get().label()}</h2>
			<nav class="categories">
				{button(CategorySelection::All)}
				{categories
					.into_iter()
					.map(|db| button(CategorySelection::Only(db)))
					.collect_view()}
			</nav>
			<p class="result-count">
				{move || shown.with(|s| s.iter().filter(|v| **v).count())}
				" results"
			</p>
			<ul class="result-list">
				{results
					.with_value(|r| {
						r.iter()
							.enumerate()
							.map(|(i, result)| {
								let visible = move || shown.with(|s| s.get(i).copied().unwrap_or(false));
								view! {
									<li
										class="result-card"
										class:hidden=move || !visible()
										style:border-color=result.database.border_color()
									>
										<span class="symbol">{result.symbol.clone()}</span>
										<span class="database">{result.database.as_str()}</span>
										{result
											.homolog
											.clone()
											.map(|h| view! { <span class="homolog">{h}</span> })}
									</li>
								}
							})
							.collect_view()
					})}
			</ul>
		</section>
	}
}
