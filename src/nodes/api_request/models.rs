use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Highest retry count the panel offers.
pub const MAX_RETRY_COUNT: u32 = 10;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
pub enum RequestMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    HEAD,
}

impl RequestMethod {
    /// Whether a request body is sent with this method.
    pub fn allows_body(self) -> bool {
        !matches!(self, RequestMethod::GET | RequestMethod::HEAD)
    }
}

/// One row of the headers or query parameters table.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParam {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl RequestParam {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Content of an API request node.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestConfig {
    pub url: String,
    pub method: RequestMethod,
    pub headers: Vec<RequestParam>,
    pub query_params: Vec<RequestParam>,
    pub body: String,
    pub retry_count: u32,
}

impl RequestConfig {
    pub fn enabled_headers(&self) -> impl Iterator<Item = &RequestParam> {
        self.headers.iter().filter(|h| h.enabled)
    }

    pub fn enabled_query_params(&self) -> impl Iterator<Item = &RequestParam> {
        self.query_params.iter().filter(|p| p.enabled)
    }

    /// Returns the body text to send, or `None` when nothing is sent.
    ///
    /// Valid JSON is re-serialized with 2-space indentation in its original key
    /// order; anything else is returned verbatim.
    pub fn formatted_body(&self) -> Option<String> {
        if self.body.is_empty() || !self.method.allows_body() {
            return None;
        }

        match serde_json::from_str::<JsonValue>(&self.body) {
            Ok(json) => Some(serde_json::to_string_pretty(&integral_floats(json)).unwrap_or_else(|_| self.body.clone())),
            Err(_) => Some(self.body.clone()),
        }
    }
}

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Print whole-number floats as integers, `1.0` and `1e2` become `1` and `100`.
fn integral_floats(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => JsonValue::from(f as i64),
            _ => JsonValue::Number(n),
        },
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(integral_floats).collect()),
        JsonValue::Object(map) => JsonValue::Object(map.into_iter().map(|(k, v)| (k, integral_floats(v))).collect()),
        other => other,
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{RequestConfig, RequestMethod, RequestParam};

    #[test]
    fn test_deserialize_content() {
        let config: RequestConfig = serde_json::from_value(json!({
            "url": "https://api.example.com/users",
            "method": "POST",
            "headers": [{ "key": "Accept", "value": "application/json", "enabled": true }],
            "queryParams": [{ "key": "page", "value": "1", "enabled": false }],
            "body": "{}",
            "retryCount": 2
        }))
        .unwrap();

        assert_eq!(config.method, RequestMethod::POST);
        assert_eq!(config.retry_count, 2);
        assert_eq!(config.enabled_headers().count(), 1);
        assert_eq!(config.enabled_query_params().count(), 0);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: RequestConfig = serde_json::from_value(json!({ "url": "https://example.com" })).unwrap();
        assert_eq!(config.method, RequestMethod::GET);
        assert!(config.headers.is_empty());
        assert_eq!(config.retry_count, 0);
    }

    #[test]
    fn test_formatted_body() {
        let mut config = RequestConfig {
            method: RequestMethod::POST,
            body: r#"{"b":1,"a":[true,null]}"#.to_string(),
            ..Default::default()
        };
        assert_eq!(config.formatted_body().unwrap(), "{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}");

        config.body = "input.payload".to_string();
        assert_eq!(config.formatted_body().unwrap(), "input.payload");

        config.body = String::new();
        assert_eq!(config.formatted_body(), None);

        config.body = r#"{"a":1}"#.to_string();
        config.method = RequestMethod::HEAD;
        assert_eq!(config.formatted_body(), None);
    }

    #[test]
    fn test_formatted_body_whole_floats() {
        let mut config = RequestConfig {
            method: RequestMethod::POST,
            body: r#"{"a":1.0}"#.to_string(),
            ..Default::default()
        };
        assert_eq!(config.formatted_body().unwrap(), "{\n  \"a\": 1\n}");

        config.body = r#"{"a":1e2,"b":[2.0,-0.0,1.5],"c":{"d":3.25}}"#.to_string();
        assert_eq!(
            config.formatted_body().unwrap(),
            "{\n  \"a\": 100,\n  \"b\": [\n    2,\n    0,\n    1.5\n  ],\n  \"c\": {\n    \"d\": 3.25\n  }\n}"
        );

        config.body = r#"{"big":1e20}"#.to_string();
        assert_eq!(config.formatted_body().unwrap(), "{\n  \"big\": 1e20\n}");
    }

    #[test]
    fn test_param_builder() {
        let param = RequestParam::new("X-Trace", "1").disabled();
        assert_eq!(param.key, "X-Trace");
        assert!(!param.enabled);
    }
}
