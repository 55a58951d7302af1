pub mod api_request;
pub mod function;
pub mod timer;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{CodegenOptions, DecisionNode, NodeKind, Result};

pub use api_request::{RequestConfig, RequestMethod, RequestParam};
pub use function::FunctionContent;
pub use timer::{CycleConfig, CycleType, DateConfig, DurationConfig, EventConfig, EventType, TimerConfig, TimerType};

/// Describes a node kind that can be turned into a function node.
pub trait NodeSpecification: Serialize + DeserializeOwned + Default {
    /// Kind of the nodes carrying this content.
    const KIND: NodeKind;

    /// Label used in error messages, e.g. `API request`.
    const LABEL: &'static str;

    /// Returns the name shown in the node palette.
    fn display_name() -> &'static str;

    /// Returns the one-line description shown in the node palette.
    fn short_description() -> &'static str;

    /// Returns the JSON schema node content is checked against.
    fn schema() -> serde_json::Value;

    /// Creates the content from a node's JSON payload.
    ///
    /// # Arguments
    ///
    /// * `content` - The [`serde_json::Value`] stored as the node content.
    ///
    /// # Returns
    ///
    /// Returns a [`Result`] containing the content, or a schema or convert error.
    fn create(content: serde_json::Value) -> Result<Self> {
        jsonschema::validate(&Self::schema(), &content)?;
        let spec = serde_json::from_value::<Self>(content)?;
        Ok(spec)
    }

    /// Returns the name given to the `index`-th node of this kind.
    fn default_name(index: usize) -> String;

    /// Creates a fresh node with default content.
    fn generate_node(index: usize) -> Result<DecisionNode> {
        let content = serde_json::to_value(Self::default())?;
        Ok(DecisionNode::new(nanoid::nanoid!(), Self::default_name(index), Self::KIND).with_content(content))
    }

    /// Returns the badge lines rendered on the node.
    fn helpers(&self) -> Vec<String>;

    /// Returns the field problems the panel shows for this content.
    fn diagnostics(&self) -> Vec<Diagnostic>;

    /// Renders the source of the equivalent function node.
    fn generate_source(
        &self,
        options: &CodegenOptions,
    ) -> String;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found on one field of a node's content.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// content field the problem belongs to, camelCase as in the node JSON
    pub field: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn error(
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
