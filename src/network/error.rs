use thiserror::Error;

use super::fetch::FetchError;

/// Errors raised by the network model. None of them leave the graph modified.
#[derive(Error, Debug)]
pub enum ExplorerError {
	#[error("Incorrect JSON file: {0}")]
	InvalidJson(#[from] serde_json::Error),

	#[error("Incorrect graph definition: {0}")]
	InvalidElement(String),

	#[error("Unknown database: {0}")]
	UnknownDatabase(String),

	#[error("Incorrect tbl graph: More than 3 columns (line {line} has {columns})")]
	TooManyColumns { line: usize, columns: usize },

	#[error("Incorrect tbl graph: invalid probability {value:?} on line {line}")]
	InvalidProbability { line: usize, value: String },

	#[error("Name must be provided.")]
	MissingName,

	#[error("Node {0} is not in the graph")]
	UnknownNode(String),

	#[error("Homolog node {0} cannot be expanded")]
	HomologNotExpandable(String),

	#[error("No Nodes in graph")]
	EmptyGraph,

	#[error("Unknown path length mode: {0}")]
	UnknownPathLengthMode(String),

	#[error("No {0} selected")]
	NotSelected(&'static str),

	#[error("No merge is waiting for confirmation")]
	NothingPending,

	#[error(transparent)]
	Fetch(#[from] FetchError),
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;
