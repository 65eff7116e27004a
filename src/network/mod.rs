//! Client-side interaction network model.
//!
//! Everything in here is plain Rust with no DOM access apart from
//! [`fetch`], so the graph logic runs and is tested natively. The Leptos
//! components only ever talk to an [`Explorer`].

pub mod config;
pub mod error;
pub mod explorer;
pub mod expression;
pub mod fetch;
pub mod filter;
pub mod formats;
pub mod fragment;
pub mod homologs;
pub mod merge;
pub mod model;
pub mod panels;
pub mod store;

pub use config::ExplorerConfig;
pub use error::{ExplorerError, ExplorerResult};
pub use explorer::{Explorer, LookupRequest, NodeCount, Received};
pub use filter::{CategorySelection, PathLengthMode, Visibility};
pub use formats::GraphFormat;
pub use fragment::Fragment;
pub use model::{Database, Edge, EdgeKey, EdgeKind, Node, Shape};
pub use store::GraphStore;
