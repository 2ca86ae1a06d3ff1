use crate::error::{Error, Result};
use chrono::Timelike;
use common::data::CompletionChunk;
use faststr::FastStr;
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;
use reqwest::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE, HeaderValue,
};
use serde_json::{Value, json};
use std::time::Duration;
use volo_http::{response::Response, server::IntoResponse};

#[inline]
pub fn build_http_client(connect_timeout: Duration) -> Result<ReqwestClient> {
    let builder = ReqwestClient::builder();
    let client = builder
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| Error::FailedToBuildClient(e.to_string().into()))?;
    Ok(client)
}

#[inline]
pub fn generate_request_id() -> FastStr {
    let random_id = chrono::Utc::now().nanosecond();
    format!("relay-{random_id}").into()
}

/// The projection sent to the browser for one provider chunk. Only the first
/// choice survives; a chunk without choices keeps an empty list.
#[inline]
pub fn create_chunk_frame(chunk: &CompletionChunk) -> FastStr {
    let choices: Vec<Value> = chunk
        .first_choice()
        .map(|choice| {
            json!({
                "index": choice.index,
                "delta": { "content": choice.delta.content },
                "finish_reason": choice.finish_reason,
            })
        })
        .into_iter()
        .collect();
    let value = json!({
        "id": chunk.id,
        "object": chunk.object,
        "created": chunk.created,
        "model": chunk.model,
        "system_fingerprint": chunk.system_fingerprint,
        "choices": choices,
    });
    format!("{value}").into()
}

/// Last frame of a stream that broke after it had started.
#[inline]
pub fn create_error_frame(message: &str) -> FastStr {
    let value = json!({
        "error": {
            "message": message,
            "type": "stream_aborted",
        }
    });
    format!("{value}").into()
}

pub fn detail_response(status: StatusCode, detail: &str) -> Response {
    let body = json!({ "detail": detail }).to_string();
    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Any origin, method and header is allowed.
pub fn with_cors(response: &mut Response) {
    let headers = response.headers_mut();
    let any = HeaderValue::from_static("*");
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, any.clone());
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, any);
}
