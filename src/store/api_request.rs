use super::PanelStore;
use crate::nodes::{RequestConfig, RequestMethod, RequestParam};

impl PanelStore<RequestConfig> {
    pub fn set_url(
        &self,
        url: impl Into<String>,
    ) {
        let url = url.into();
        self.update(|s| s.url = url);
    }

    pub fn set_method(
        &self,
        method: RequestMethod,
    ) {
        self.update(|s| s.method = method);
    }

    pub fn set_headers(
        &self,
        headers: Vec<RequestParam>,
    ) {
        self.update(|s| s.headers = headers);
    }

    pub fn set_query_params(
        &self,
        params: Vec<RequestParam>,
    ) {
        self.update(|s| s.query_params = params);
    }

    pub fn set_body(
        &self,
        body: impl Into<String>,
    ) {
        let body = body.into();
        self.update(|s| s.body = body);
    }

    pub fn set_retry_count(
        &self,
        count: u32,
    ) {
        self.update(|s| s.retry_count = count);
    }
}
