use serde::{Deserialize, Serialize};

use crate::{
    NodecodeError, Result,
    model::{DecisionEdge, DecisionNode},
};

/// The host's decision graph document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionGraph {
    #[serde(default)]
    pub nodes: Vec<DecisionNode>,
    #[serde(default)]
    pub edges: Vec<DecisionEdge>,
}

impl DecisionGraph {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str::<DecisionGraph>(s).map_err(|e| NodecodeError::Convert(format!("invalid decision graph: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node(
        &self,
        id: &str,
    ) -> Option<&DecisionNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(
        &mut self,
        id: &str,
    ) -> Option<&mut DecisionNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Apply `f` to the node with the given id.
    pub fn update_node<F>(
        &mut self,
        id: &str,
        f: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut DecisionNode),
    {
        let node = self.node_mut(id).ok_or_else(|| NodecodeError::Node(format!("node '{}' not found", id)))?;
        f(node);
        Ok(())
    }
}
