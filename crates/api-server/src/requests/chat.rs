use common::messages::Message;
use serde::{Deserialize, Serialize};

/// Body of `POST /parse/components`.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub messages: Vec<Message>,
    pub stream:   bool,
}

#[cfg(test)]
mod tests {

    use super::*;
    #[test]
    fn test_inference_request() {
        let req: InferenceRequest = serde_json::from_str(WIDGET_REQ).unwrap();
        assert!(req.stream);
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].role, "user");
        assert_eq!(req.messages[1].role, "assistant");
        assert_eq!(req.messages[2].content, "now an outline one");
    }

    #[test]
    fn test_empty_messages_are_accepted() {
        let req: InferenceRequest =
            serde_json::from_str(r#"{"messages":[],"stream":true}"#).unwrap();
        assert!(req.messages.is_empty());
    }

    #[test]
    fn test_stream_false_is_accepted() {
        let req: InferenceRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"show a button"}],"stream":false}"#,
        )
        .unwrap();
        assert!(!req.stream);
    }

    #[test]
    fn test_malformed_bodies_are_rejected() {
        for body in [
            r#"{"stream":true}"#,
            r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            r#"{"messages":"hi","stream":true}"#,
            r#"{"messages":[{"role":"user","content":42}],"stream":true}"#,
            r#"{"messages":[],"stream":"yes"}"#,
        ] {
            let res: Result<InferenceRequest, _> = serde_json::from_str(body);
            assert!(res.is_err(), "accepted malformed body: {body}");
        }
    }

    const WIDGET_REQ: &str = r#"
    {
  "messages": [
    {
      "role": "user",
      "content": "show a primary button"
    },
    {
      "role": "assistant",
      "content": "Here it is:\n```json\n{\"type\":\"button\",\"variant\":\"primary\",\"text\":\"Click\"}\n```"
    },
    {
      "role": "user",
      "content": "now an outline one"
    }
  ],
  "stream": true
}
    "#;
}
