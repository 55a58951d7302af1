//! Renders an API request configuration into the source of a function node.

use super::models::{RequestConfig, RequestMethod, RequestParam};
use crate::{CodegenOptions, utils::js};

/// Generate the handler source for `config`.
pub(crate) fn generate(
    config: &RequestConfig,
    options: &CodegenOptions,
) -> String {
    let call = request_call(config);

    let request = if config.retry_count > 0 {
        retry_block(&call, config.retry_count, options.backoff_base_ms)
    } else {
        format!("  const response = {};", call)
    };

    let mut code = String::new();
    code.push_str(&format!("import http from {};\n", js::single_quoted(&options.http_module)));
    code.push_str(&format!("import zen from {};\n\n", js::single_quoted(&options.zen_module)));
    code.push_str("/**\n");
    code.push_str(" * Auto-generated API request function\n");
    code.push_str(" *\n");
    code.push_str(" * @param {Object} input - The input object\n");
    code.push_str(" * @returns {Promise<any>} The API response\n");
    code.push_str(" */\n");
    code.push_str("export const handler = async (input) => {\n");
    code.push_str(&format!("  const url = {};\n\n", js::string_literal(&config.url)));
    code.push_str(&request);
    code.push_str("\n\n  return response.data;\n");
    code.push_str("};");
    code
}

/// Render the `await http.<method>(...)` expression for one attempt.
fn request_call(config: &RequestConfig) -> String {
    let body = config.formatted_body();

    let mut entries = Vec::new();
    if let Some(headers) = object_entries(config.enabled_headers()) {
        entries.push(format!("headers: {{\n{}\n  }}", headers));
    }
    if let Some(params) = object_entries(config.enabled_query_params()) {
        entries.push(format!("params: {{\n{}\n  }}", params));
    }
    // these helpers take no positional body, it travels as request data
    if matches!(config.method, RequestMethod::DELETE | RequestMethod::OPTIONS) {
        if let Some(body) = &body {
            entries.push(format!("data: {}", body));
        }
    }

    let request_options = if entries.is_empty() {
        String::new()
    } else {
        format!(", {{\n  {}\n}}", entries.join(",\n  "))
    };
    let body = body.as_deref().unwrap_or("null");

    match config.method {
        RequestMethod::GET => format!("await http.get(url{})", request_options),
        RequestMethod::POST => format!("await http.post(url, {}{})", body, request_options),
        RequestMethod::PUT => format!("await http.put(url, {}{})", body, request_options),
        RequestMethod::DELETE => format!("await http.delete(url{})", request_options),
        RequestMethod::HEAD => format!("await http.head(url{})", request_options),
        RequestMethod::OPTIONS => format!("await http.request('OPTIONS', url{})", request_options),
    }
}

/// Object literal body for the enabled rows, `None` when there are none.
fn object_entries<'a>(params: impl Iterator<Item = &'a RequestParam>) -> Option<String> {
    let lines = params.map(|p| format!("    {}: {}", js::string_literal(&p.key), js::string_literal(&p.value))).collect::<Vec<_>>();

    if lines.is_empty() { None } else { Some(lines.join(",\n")) }
}

fn retry_block(
    call: &str,
    retry_count: u32,
    backoff_base_ms: u64,
) -> String {
    format!(
        "  // Retry logic
  let retries = 0;
  const maxRetries = {retry_count};
  let response;

  while (true) {{
    try {{
      response = {call};
      break; // Success, exit retry loop
    }} catch (error) {{
      if (retries >= maxRetries) {{
        throw error; // Max retries reached, rethrow the error
      }}

      retries++;
      console.log(`Request failed, retrying (${{retries}}/${{maxRetries}})...`);

      // Wait before retrying (exponential backoff)
      await new Promise(resolve => setTimeout(resolve, {backoff_base_ms} * Math.pow(2, retries - 1)));
    }}
  }}"
    )
}
