use serde::{Deserialize, Serialize};

/// Kind of a node in the host decision graph.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NodeKind {
    InputNode,
    OutputNode,
    FunctionNode,
    DecisionNode,
    DecisionTableNode,
    ExpressionNode,
    SwitchNode,
    CustomNode,
    ApiRequestNode,
    TimerNode,
}

/// Canvas position of a node. Passed through conversions untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node as stored in the host's decision graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionNode {
    /// node id
    pub id: String,
    /// display name
    #[serde(default)]
    pub name: String,
    /// canvas position
    #[serde(default)]
    pub position: Position,
    /// node kind
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// kind-specific payload, absent for freshly dropped nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

impl DecisionNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Position::default(),
            kind,
            content: None,
        }
    }

    pub fn with_position(
        mut self,
        x: f64,
        y: f64,
    ) -> Self {
        self.position = Position {
            x,
            y,
        };
        self
    }

    pub fn with_content(
        mut self,
        content: serde_json::Value,
    ) -> Self {
        self.content = Some(content);
        self
    }
}
