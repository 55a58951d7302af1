//! # Nodecode
//!
//! Nodecode turns the specialized nodes of a decision graph into generic
//! function nodes whose JavaScript source reproduces their behavior.
//!
//! ## Supported nodes
//!
//! - **API request**: an HTTP call with headers, query parameters, a body and retries
//! - **Timer**: a duration, date or cycle wait attached to a start, intermediate or boundary event
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nodecode::{ConverterBuilder, DecisionGraph};
//!
//! let converter = ConverterBuilder::new().verify_syntax(true).build()?;
//!
//! let mut graph = DecisionGraph::from_json(json_str)?;
//! let converted = converter.convert_matching(&mut graph, "api*")?;
//! println!("{}", graph.to_json()?);
//! ```

mod builder;
mod config;
mod converter;
mod error;
mod model;
pub mod nodes;
mod store;
mod utils;

use std::sync::{Arc, RwLock};

pub use builder::ConverterBuilder;
pub use config::{CodegenOptions, Config};
pub use converter::{Converter, api_request_to_function, timer_to_function};
pub use error::NodecodeError;
pub use model::*;
pub use nodes::{Diagnostic, FunctionContent, NodeSpecification, RequestConfig, Severity, TimerConfig};
pub use store::{ListenerId, PanelStore, StoreListener};

/// Result type alias for Nodecode operations.
pub type Result<T> = std::result::Result<T, NodecodeError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub type ShareLock<T> = Arc<RwLock<T>>;
