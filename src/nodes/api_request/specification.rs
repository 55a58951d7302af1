use serde_json::Value as JsonValue;

use super::{
    codegen,
    models::{MAX_RETRY_COUNT, RequestConfig},
};
use crate::{
    CodegenOptions, NodeKind,
    nodes::{Diagnostic, NodeSpecification},
};

impl NodeSpecification for RequestConfig {
    const KIND: NodeKind = NodeKind::ApiRequestNode;
    const LABEL: &'static str = "API request";

    fn display_name() -> &'static str {
        "API Request"
    }

    fn short_description() -> &'static str {
        "Make HTTP API requests"
    }

    fn schema() -> JsonValue {
        let param = serde_json::json!({
            "type": "object",
            "required": ["key", "value", "enabled"],
            "properties": {
                "key": { "type": "string" },
                "value": { "type": "string" },
                "enabled": { "type": "boolean" }
            }
        });

        serde_json::json!({
            "type": "object",
            "required": ["url", "method"],
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Request URL"
                },
                "method": {
                    "type": "string",
                    "enum": ["GET", "POST", "PUT", "DELETE", "OPTIONS", "HEAD"],
                    "description": "HTTP request method"
                },
                "headers": {
                    "type": "array",
                    "items": param.clone(),
                    "description": "Header rows, only enabled rows are sent"
                },
                "queryParams": {
                    "type": "array",
                    "items": param,
                    "description": "Query parameter rows, only enabled rows are sent"
                },
                "body": {
                    "type": "string",
                    "description": "Request body, JSON is re-indented, anything else is embedded as is"
                },
                "retryCount": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Number of retries with exponential backoff"
                }
            }
        })
    }

    fn default_name(index: usize) -> String {
        format!("apiRequest{}", index)
    }

    fn helpers(&self) -> Vec<String> {
        if self.retry_count > 0 {
            vec![format!("Retry: {}", self.retry_count)]
        } else {
            Vec::new()
        }
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if self.url.trim().is_empty() {
            diagnostics.push(Diagnostic::error("url", "URL is required"));
        }

        for (field, rows) in [("headers", &self.headers), ("queryParams", &self.query_params)] {
            if rows.iter().any(|row| row.enabled && row.key.trim().is_empty()) {
                diagnostics.push(Diagnostic::error(field, "enabled rows must have a key"));
            }
        }

        if !self.body.is_empty() {
            if !self.method.allows_body() {
                diagnostics.push(Diagnostic::warning("body", format!("body is ignored for {} requests", self.method.as_ref())));
            } else if serde_json::from_str::<JsonValue>(&self.body).is_err() {
                diagnostics.push(Diagnostic::warning("body", "body is not valid JSON and is embedded as is"));
            }
        }

        if self.retry_count > MAX_RETRY_COUNT {
            diagnostics.push(Diagnostic::warning(
                "retryCount",
                format!("retry count exceeds the maximum of {}", MAX_RETRY_COUNT),
            ));
        }

        diagnostics
    }

    fn generate_source(
        &self,
        options: &CodegenOptions,
    ) -> String {
        codegen::generate(self, options)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::{
        NodeKind, NodecodeError,
        nodes::{NodeSpecification, RequestConfig, RequestMethod, RequestParam, Severity},
    };

    #[test]
    fn test_create_validates_schema() {
        let config = RequestConfig::create(json!({
            "url": "https://example.com",
            "method": "DELETE",
            "headers": [],
            "queryParams": [],
            "body": "",
            "retryCount": 0
        }))
        .unwrap();
        assert_eq!(config.method, RequestMethod::DELETE);

        let err = RequestConfig::create(json!({ "url": "https://example.com", "method": "PATCH" })).unwrap_err();
        assert!(matches!(err, NodecodeError::Schema(_)));

        let err = RequestConfig::create(json!({ "url": "https://example.com", "method": "GET", "retryCount": -1 })).unwrap_err();
        assert!(matches!(err, NodecodeError::Schema(_)));

        let err = RequestConfig::create(json!({ "method": "GET" })).unwrap_err();
        assert!(matches!(err, NodecodeError::Schema(_)));
    }

    #[test]
    fn test_generate_node() {
        let node = RequestConfig::generate_node(3).unwrap();
        assert_eq!(node.name, "apiRequest3");
        assert_eq!(node.kind, NodeKind::ApiRequestNode);
        assert!(!node.id.is_empty());
        assert_eq!(
            node.content,
            Some(json!({
                "url": "",
                "method": "GET",
                "headers": [],
                "queryParams": [],
                "body": "",
                "retryCount": 0
            }))
        );
        assert_ne!(node.id, RequestConfig::generate_node(3).unwrap().id);
    }

    #[test]
    fn test_helpers() {
        let mut config = RequestConfig::default();
        assert!(config.helpers().is_empty());

        config.retry_count = 4;
        assert_eq!(config.helpers(), vec!["Retry: 4".to_string()]);
    }

    #[test]
    fn test_diagnostics() {
        let config = RequestConfig {
            url: " ".to_string(),
            method: RequestMethod::GET,
            headers: vec![RequestParam::new("", "x")],
            query_params: vec![RequestParam::new("", "x").disabled()],
            body: "{}".to_string(),
            retry_count: 11,
        };

        let diagnostics = config.diagnostics();
        let fields = diagnostics.iter().map(|d| (d.field.as_str(), d.severity)).collect::<Vec<_>>();
        assert_eq!(
            fields,
            vec![
                ("url", Severity::Error),
                ("headers", Severity::Error),
                ("body", Severity::Warning),
                ("retryCount", Severity::Warning),
            ]
        );
        assert_eq!(diagnostics[2].message, "body is ignored for GET requests");

        let config = RequestConfig {
            url: "https://example.com".to_string(),
            method: RequestMethod::POST,
            body: "{ broken".to_string(),
            ..Default::default()
        };
        let diagnostics = config.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "body is not valid JSON and is embedded as is");
        assert!(!diagnostics[0].is_error());
    }
}
