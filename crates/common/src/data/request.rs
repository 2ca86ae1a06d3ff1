use crate::RequestBuilder;
use faststr::FastStr;
use serde_json::Value;
use std::collections::HashMap;

/// A provider call before it is bound to an http client.
#[derive(Debug, Clone)]
pub struct RequestData {
    pub url:     FastStr,
    pub headers: HashMap<FastStr, FastStr>,
    pub body:    Value,
}

impl RequestData {
    pub fn new<T>(url: T, body: Value) -> Self
    where
        T: Into<FastStr>,
    {
        let mut headers = HashMap::new();
        headers.insert("accept".into(), "text/event-stream".into());
        Self {
            url: url.into(),
            headers,
            body,
        }
    }

    pub fn bearer_auth<T>(&mut self, auth: T)
    where
        T: Into<FastStr>,
    {
        self.headers.insert(
            "authorization".into(),
            format!("Bearer {}", auth.into()).into(),
        );
    }

    pub fn into_builder(self, client: &reqwest::Client) -> RequestBuilder {
        let RequestData { url, headers, body } = self;
        let mut builder = client.post(url.as_str());
        for (k, v) in headers {
            builder = builder.header(k.as_str(), v.as_str());
        }
        builder.json(&body)
    }
}
