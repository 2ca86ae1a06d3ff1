use crate::messages::Message;
use faststr::FastStr;
use serde::{Deserialize, Serialize};

/// Outbound body of a chat-completions call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionsData {
    #[serde(rename = "model")]
    pub model_name: FastStr,
    pub messages:   Vec<Message>,
    pub stream:     bool,
}

impl ChatCompletionsData {
    pub fn streaming(model_name: FastStr, messages: Vec<Message>) -> Self {
        Self {
            model_name,
            messages,
            stream: true,
        }
    }
}

/// One `chat.completion.chunk` as sent by the provider. Fields the relay
/// does not forward (usage, logprobs, tool calls) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionChunk {
    #[serde(default)]
    pub id:                 FastStr,
    #[serde(default)]
    pub object:             FastStr,
    #[serde(default)]
    pub created:            i64,
    #[serde(default)]
    pub model:              FastStr,
    #[serde(default)]
    pub system_fingerprint: Option<FastStr>,
    #[serde(default)]
    pub choices:            Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index:         u32,
    #[serde(default)]
    pub delta:         ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<FastStr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<FastStr>,
}

impl CompletionChunk {
    /// Only the first choice is ever forwarded.
    pub fn first_choice(&self) -> Option<&ChunkChoice> {
        self.choices.first()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.first_choice()
            .and_then(|c| c.finish_reason.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_CHUNK: &str = r#"{"id":"chatcmpl-AbC","object":"chat.completion.chunk","created":1746299682,"model":"gpt-4o-mini-2024-07-18","system_fingerprint":"fp_0ba0d124f1","choices":[{"index":0,"delta":{"content":" it"},"logprobs":null,"finish_reason":null}]}"#;
    const ROLE_CHUNK: &str = r#"{"id":"chatcmpl-AbC","object":"chat.completion.chunk","created":1746299682,"model":"gpt-4o-mini-2024-07-18","choices":[{"index":0,"delta":{"role":"assistant","content":""},"finish_reason":null}]}"#;
    const STOP_CHUNK: &str = r#"{"id":"chatcmpl-AbC","object":"chat.completion.chunk","created":1746299682,"model":"gpt-4o-mini-2024-07-18","system_fingerprint":null,"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#;
    const USAGE_CHUNK: &str = r#"{"id":"chatcmpl-AbC","object":"chat.completion.chunk","created":1746299682,"model":"gpt-4o-mini-2024-07-18","choices":[],"usage":{"prompt_tokens":141,"completion_tokens":24,"total_tokens":165}}"#;

    #[test]
    fn test_content_chunk() {
        let chunk: CompletionChunk = serde_json::from_str(CONTENT_CHUNK).unwrap();
        assert_eq!(chunk.id, "chatcmpl-AbC");
        assert_eq!(chunk.created, 1746299682);
        assert_eq!(chunk.system_fingerprint.as_deref(), Some("fp_0ba0d124f1"));
        let choice = chunk.first_choice().unwrap();
        assert_eq!(choice.delta.content.as_deref(), Some(" it"));
        assert!(chunk.finish_reason().is_none());
    }

    #[test]
    fn test_role_chunk_keeps_empty_content() {
        let chunk: CompletionChunk = serde_json::from_str(ROLE_CHUNK).unwrap();
        assert!(chunk.system_fingerprint.is_none());
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some(""));
    }

    #[test]
    fn test_stop_chunk_without_content() {
        let chunk: CompletionChunk = serde_json::from_str(STOP_CHUNK).unwrap();
        assert!(chunk.choices[0].delta.content.is_none());
        assert_eq!(chunk.finish_reason(), Some("stop"));
    }

    #[test]
    fn test_usage_chunk_has_no_choice() {
        let chunk: CompletionChunk = serde_json::from_str(USAGE_CHUNK).unwrap();
        assert!(chunk.first_choice().is_none());
        assert!(chunk.finish_reason().is_none());
    }

    #[test]
    fn test_outbound_body() {
        let data = ChatCompletionsData::streaming(
            "gpt-4o-mini".into(),
            vec![Message::system("rules"), Message::user("show a button")],
        );
        let body = serde_json::to_value(&data).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "show a button");
        assert!(body.get("model_name").is_none());
    }
}
