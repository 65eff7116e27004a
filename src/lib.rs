//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod browser;
mod components;
pub mod network;
mod pages;

// Top-Level pages
use crate::pages::explorer::NetExplorer;
use crate::pages::not_found::NotFound;
use crate::pages::pathways::Pathways;
use crate::pages::search::SearchResults;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router for the explorer, the pathway panels and the gene search
/// results, with a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="NetExplorer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="top-nav">
				<A href="/">"Explorer"</A>
				<A href="/pathways">"Pathways"</A>
				<A href="/search">"Gene search"</A>
			</nav>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=|| view! { <NetExplorer /> } />
				<Route path=path!("/pathways") view=Pathways />
				<Route path=path!("/search") view=SearchResults />
			</Routes>
		</Router>
	}
}
