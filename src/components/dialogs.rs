use leptos::prelude::*;

use super::session::ExplorerHandle;

/// Asks before merging a large response.
#[component]
pub fn ConfirmDialog(handle: ExplorerHandle) -> impl IntoView {
	let pending = handle.pending();

	view! {
		<Show when=move || pending.get().is_some()>
			<div class="modal-backdrop">
				<div class="modal" role="dialog">
					<p>
						"This request will add "
						{move || pending.get().map(|p| p.node_count).unwrap_or_default()}
						" nodes to the graph. Do you want to continue?"
					</p>
					<div class="modal-actions">
						<button on:click=move |_| handle.confirm()>"Continue"</button>
						<button on:click=move |_| handle.cancel()>"Cancel"</button>
					</div>
				</div>
			</div>
		</Show>
	}
}

/// Shows import errors until dismissed.
#[component]
pub fn ImportErrorDialog(handle: ExplorerHandle) -> impl IntoView {
	let message = handle.dialog();

	view! {
		<Show when=move || message.get().is_some()>
			<div class="modal-backdrop">
				<div class="modal" role="alertdialog">
					<p>{move || message.get().unwrap_or_default()}</p>
					<div class="modal-actions">
						<button on:click=move |_| handle.dismiss_dialog()>"OK"</button>
					</div>
				</div>
			</div>
		</Show>
	}
}

/// Transient error banner; the handle clears it after a delay.
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
	view! {
		<Show when=move || message.get().is_some()>
			<div class="error-banner" role="alert">
				{move || message.get().unwrap_or_default()}
			</div>
		</Show>
	}
}
