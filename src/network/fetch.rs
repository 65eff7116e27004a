//! Backend requests issued through the browser's `fetch`.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::error::{ExplorerError, ExplorerResult};
use super::expression::ExpressionMap;
use super::fragment::Fragment;
use super::model::Database;

/// Why a backend request failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
	#[error("Node not found")]
	NotFound,
	#[error("Bad Request")]
	BadRequest,
	#[error("Server Error")]
	Server(u16),
	#[error("Network error: {0}")]
	Network(String),
	#[error("Unexpected response: {0}")]
	Decode(String),
}

impl FetchError {
	pub fn from_status(status: u16) -> Option<Self> {
		match status {
			200..=299 => None,
			404 => Some(FetchError::NotFound),
			400 => Some(FetchError::BadRequest),
			other => Some(FetchError::Server(other)),
		}
	}
}

/// Comma-joined ids and databases of the primary nodes on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphElements {
	pub node_ids: String,
	pub databases: String,
}

impl GraphElements {
	pub fn is_empty(&self) -> bool {
		self.node_ids.is_empty()
	}
}

/// Whether expression is mapped from one sample or as a two-sample contrast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleMode {
	#[default]
	OneSample,
	TwoSample,
}

impl SampleMode {
	pub fn as_str(self) -> &'static str {
		match self {
			SampleMode::OneSample => "one-sample",
			SampleMode::TwoSample => "two-sample",
		}
	}
}

/// A validated expression-mapping request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionQuery {
	pub experiment: String,
	pub sample: String,
	pub mode: SampleMode,
}

impl ExpressionQuery {
	/// In two-sample mode both samples are required and sent as `s1:s2`.
	pub fn new(experiment: &str, samples: (&str, &str), mode: SampleMode) -> ExplorerResult<Self> {
		let experiment = experiment.trim();
		if experiment.is_empty() {
			return Err(ExplorerError::NotSelected("Experiment"));
		}
		let (first, second) = (samples.0.trim(), samples.1.trim());
		let sample = match mode {
			SampleMode::OneSample if !first.is_empty() => first.to_string(),
			SampleMode::TwoSample if !first.is_empty() && !second.is_empty() => {
				format!("{first}:{second}")
			}
			_ => return Err(ExplorerError::NotSelected("Sample")),
		};
		Ok(Self {
			experiment: experiment.to_string(),
			sample,
			mode,
		})
	}
}

/// Neighbours of one gene.
pub async fn expand_node(api_base: &str, symbol: &str, database: Database) -> Result<Fragment, FetchError> {
	let url = format!(
		"{api_base}/net_explorer?genesymbol={}&database={}",
		encode(symbol),
		encode(database.as_str())
	);
	let body = get_text(&url).await?;
	Fragment::from_json(&body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Interactions among the nodes already on screen.
pub async fn show_connections(api_base: &str, elements: &GraphElements) -> Result<Fragment, FetchError> {
	let url = format!(
		"{api_base}/show_connections?nodes={}&databases={}",
		encode(&elements.node_ids),
		encode(&elements.databases)
	);
	let body = get_text(&url).await?;
	Fragment::from_json(&body).map_err(|e| FetchError::Decode(e.to_string()))
}

pub async fn map_expression(
	api_base: &str,
	query: &ExpressionQuery,
	elements: &GraphElements,
) -> Result<ExpressionMap, FetchError> {
	let url = format!(
		"{api_base}/PlanNET/map_expression?experiment={}&sample={}&type={}&nodes={}&databases={}",
		encode(&query.experiment),
		encode(&query.sample),
		query.mode.as_str(),
		encode(&elements.node_ids),
		encode(&elements.databases)
	);
	let body = get_text(&url).await?;
	serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
}

fn encode(value: &str) -> String {
	js_sys::encode_uri_component(value).into()
}

fn js_error(value: JsValue) -> FetchError {
	FetchError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

async fn get_text(url: &str) -> Result<String, FetchError> {
	let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;

	let init = RequestInit::new();
	init.set_method("GET");
	init.set_mode(RequestMode::SameOrigin);
	let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;

	let value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_error)?;
	let response: Response = value.dyn_into().map_err(js_error)?;
	if let Some(err) = FetchError::from_status(response.status()) {
		return Err(err);
	}

	let text = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	text.as_string()
		.ok_or_else(|| FetchError::Decode("response body is not text".into()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_codes_map_to_messages() {
		assert_eq!(FetchError::from_status(200), None);
		assert_eq!(FetchError::from_status(404).unwrap().to_string(), "Node not found");
		assert_eq!(FetchError::from_status(400).unwrap().to_string(), "Bad Request");
		assert_eq!(FetchError::from_status(502).unwrap().to_string(), "Server Error");
	}

	#[test]
	fn expression_query_requires_experiment_and_samples() {
		let q = ExpressionQuery::new("regeneration", ("t0", "t3"), SampleMode::TwoSample).unwrap();
		assert_eq!(q.sample, "t0:t3");
		let q = ExpressionQuery::new("regeneration", ("t0", ""), SampleMode::OneSample).unwrap();
		assert_eq!(q.sample, "t0");

		assert_eq!(
			ExpressionQuery::new(" ", ("t0", ""), SampleMode::OneSample)
				.unwrap_err()
				.to_string(),
			"No Experiment selected"
		);
		assert!(ExpressionQuery::new("regeneration", ("t0", ""), SampleMode::TwoSample).is_err());
	}
}
