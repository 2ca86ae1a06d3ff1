use super::{ChunkStream, CompletionProvider};
use crate::error::Result;
use crate::{
    data::{ChatCompletionsData, CompletionChunk, RequestData},
    stream::sse::{data_messages, open_event_stream},
};

use faststr::FastStr;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIClientConfig {
    pub name:     FastStr,
    pub api_key:  Option<FastStr>,
    pub api_base: FastStr,
}

impl OpenAIClientConfig {
    pub fn new(name: FastStr, api_key: Option<FastStr>, api_base: FastStr) -> Self {
        Self {
            name,
            api_key,
            api_base,
        }
    }
}

/// OpenAI-compatible chat-completions provider. Built once at startup and
/// shared by every request.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    pub config: OpenAIClientConfig,
    http:       reqwest::Client,
}

impl OpenAIClient {
    pub fn new(config: OpenAIClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

impl CompletionProvider for OpenAIClient {
    async fn stream_chat(&self, data: ChatCompletionsData) -> Result<ChunkStream> {
        let request_data = prepare_chat_completions(self, data)?;
        debug!(provider = %self.config.name, url = %request_data.url, "opening completion stream");
        let builder = request_data.into_builder(&self.http);
        let es = open_event_stream(builder).await?;
        let chunks = data_messages(es).map(|message| message.and_then(|m| parse_chunk(&m.data)));
        Ok(chunks.boxed())
    }
}

fn prepare_chat_completions(
    client: &OpenAIClient,
    data: ChatCompletionsData,
) -> Result<RequestData> {
    let url = client.config.api_base.trim_end_matches('/');
    let url = format!("{url}/chat/completions");
    let body = openai_build_chat_completions_body(data)?;

    let mut request_data = RequestData::new(url, body);
    if let Some(key) = &client.config.api_key {
        request_data.bearer_auth(key.clone());
    }
    Ok(request_data)
}

fn openai_build_chat_completions_body(data: ChatCompletionsData) -> Result<Value> {
    Ok(serde_json::to_value(data)?)
}

pub fn parse_chunk(data: &str) -> Result<CompletionChunk> {
    Ok(serde_json::from_str(data)?)
}
