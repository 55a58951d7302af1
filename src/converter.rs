//! Conversion of specialized nodes into generic function nodes.

use globset::Glob;
use tracing::{debug, warn};

use crate::{
    Config, DecisionGraph, DecisionNode, NodeKind, NodecodeError, Result,
    nodes::{FunctionContent, NodeSpecification, RequestConfig, TimerConfig},
    utils::script,
};

/// Converts an API request node into a function node using the default options.
///
/// Fails with `API request node content is undefined` when the node has no content.
pub fn api_request_to_function(node: &DecisionNode) -> Result<DecisionNode> {
    Converter::default().convert_as::<RequestConfig>(node)
}

/// Converts a timer node into a function node using the default options.
///
/// Fails with `Timer node content is undefined` when the node has no content.
pub fn timer_to_function(node: &DecisionNode) -> Result<DecisionNode> {
    Converter::default().convert_as::<TimerConfig>(node)
}

#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the convert action should be offered for `node`.
    pub fn can_convert(
        &self,
        node: &DecisionNode,
    ) -> bool {
        node.content.is_some() && matches!(node.kind, NodeKind::ApiRequestNode | NodeKind::TimerNode)
    }

    /// Convert `node` according to its kind.
    pub fn convert(
        &self,
        node: &DecisionNode,
    ) -> Result<DecisionNode> {
        match node.kind {
            NodeKind::ApiRequestNode => self.convert_as::<RequestConfig>(node),
            NodeKind::TimerNode => self.convert_as::<TimerConfig>(node),
            kind => Err(NodecodeError::Node(format!("node kind '{}' cannot be converted to a function", kind))),
        }
    }

    /// Convert `node`, reading its content as `S`.
    ///
    /// The node kind is not checked. `id`, `name` and `position` are copied verbatim.
    pub fn convert_as<S: NodeSpecification>(
        &self,
        node: &DecisionNode,
    ) -> Result<DecisionNode> {
        let content = node.content.clone().ok_or_else(|| NodecodeError::MissingContent(S::LABEL.to_string()))?;
        let spec = S::create(content)?;
        let source = spec.generate_source(&self.config.codegen);

        if self.config.verify_syntax {
            let codegen = &self.config.codegen;
            script::check_module_syntax(&format!("{}.js", node.id), &source, &[codegen.http_module.as_str(), codegen.zen_module.as_str()])?;
        }

        debug!(node_id = %node.id, kind = %S::KIND, bytes = source.len(), "converted node to function");
        FunctionContent::new(source).into_node(node)
    }

    /// Replace the node `id` of `graph` with its function equivalent.
    ///
    /// Edges are left untouched since the node id is preserved.
    pub fn convert_in_graph(
        &self,
        graph: &mut DecisionGraph,
        id: &str,
    ) -> Result<()> {
        let node = graph.node(id).ok_or_else(|| NodecodeError::Node(format!("node '{}' not found", id)))?;
        let converted = self.convert(node)?;
        graph.update_node(id, |n| *n = converted)
    }

    /// Convert every convertible node whose name matches the glob `pattern`.
    ///
    /// Either all matching nodes are converted or, on the first failure, none.
    /// Returns the ids of the converted nodes in graph order.
    pub fn convert_matching(
        &self,
        graph: &mut DecisionGraph,
        pattern: &str,
    ) -> Result<Vec<String>> {
        let matcher = Glob::new(pattern)?.compile_matcher();

        let mut converted = Vec::new();
        for (index, node) in graph.nodes.iter().enumerate() {
            if !matcher.is_match(&node.name) {
                continue;
            }
            if !self.can_convert(node) {
                if matches!(node.kind, NodeKind::ApiRequestNode | NodeKind::TimerNode) {
                    warn!(node_id = %node.id, "skipping node without content");
                }
                continue;
            }
            converted.push((index, self.convert(node)?));
        }

        let ids = converted.iter().map(|(_, node)| node.id.clone()).collect();
        for (index, node) in converted {
            graph.nodes[index] = node;
        }
        Ok(ids)
    }
}
