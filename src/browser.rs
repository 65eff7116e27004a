//! Thin wrappers over the browser APIs the pages need.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Document, File, HtmlAnchorElement, Url};

fn document() -> Result<Document, JsValue> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))
}

/// Text content of an element the server rendered into the page, typically a
/// `<script type="application/json">` block.
pub fn embedded_text(id: &str) -> Option<String> {
	document().ok()?.get_element_by_id(id)?.text_content()
}

pub async fn read_file(file: &File) -> Result<String, JsValue> {
	let text = JsFuture::from(file.text()).await?;
	text.as_string()
		.ok_or_else(|| JsValue::from_str("file is not text"))
}

/// Offer `contents` as a file download.
pub fn download(file_name: &str, contents: &str, mime_type: &str) -> Result<(), JsValue> {
	let options = BlobPropertyBag::new();
	options.set_type(mime_type);
	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document()?.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)
}

/// Stringify a JS exception for display.
pub fn describe(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
