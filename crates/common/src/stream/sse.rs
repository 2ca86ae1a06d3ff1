use crate::error::{Error, Result};
use async_stream::stream;
use faststr::FastStr;
use futures_util::{Stream, StreamExt};
use reqwest::RequestBuilder;
use reqwest_eventsource::{
    Error as EventSourceError, Event, EventSource, RequestBuilderExt, retry::Never,
};
use serde_json::Value;
use tracing::{debug, warn};

pub const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    #[allow(unused)]
    pub event: FastStr,
    pub data:  FastStr,
}

impl SseMessage {
    pub fn is_done(&self) -> bool {
        self.data.trim() == DONE_MARKER
    }
}

/// Sends the request and waits until the provider has answered with an
/// event stream. Anything that goes wrong before that point is returned
/// here, so callers can still answer with a plain error response.
pub async fn open_event_stream(builder: RequestBuilder) -> Result<EventSource> {
    let mut es = builder.eventsource()?;
    es.set_retry_policy(Box::new(Never));
    match es.next().await {
        Some(Ok(Event::Open)) => Ok(es),
        Some(Ok(Event::Message(message))) => {
            es.close();
            Err(Error::MsgError(
                format!("unexpected event before open: {}", message.data).into(),
            ))
        }
        Some(Err(err)) => {
            es.close();
            Err(classify_error(err).await)
        }
        None => Err(Error::StreamNotOpened),
    }
}

/// Data messages of an opened event stream, up to `[DONE]` or the end of the
/// body. The first error is yielded and ends the stream.
pub fn data_messages(mut es: EventSource) -> impl Stream<Item = Result<SseMessage>> + Send {
    stream! {
        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {}
                Ok(Event::Message(message)) => {
                    let message = SseMessage {
                        event: message.event.into(),
                        data:  message.data.into(),
                    };
                    if message.is_done() {
                        debug!("Stream Done");
                        break;
                    }
                    yield Ok(message);
                }
                Err(EventSourceError::StreamEnded) => {
                    debug!("Stream End");
                    break;
                }
                Err(err) => {
                    warn!("event stream failed: {err}");
                    yield Err(classify_error(err).await);
                    break;
                }
            }
        }
        es.close();
    }
}

async fn classify_error(err: EventSourceError) -> Error {
    match err {
        EventSourceError::InvalidStatusCode(status, res) => match res.text().await {
            Ok(text) => Error::InvalidResponseData(error_message(&text), status.as_u16()),
            Err(e) => Error::ReqwestError(e),
        },
        EventSourceError::InvalidContentType(header_value, res) => {
            let text = res.text().await.unwrap_or_default();
            Error::InvalidResponseEventStream(
                header_value.to_str().unwrap_or_default().to_owned().into(),
                text.into(),
            )
        }
        EventSourceError::Transport(e) => Error::ReqwestError(e),
        EventSourceError::StreamEnded => Error::StreamNotOpened,
        _ => Error::ReqwestEventsourceError(err.to_string().into()),
    }
}

/// Pulls the human readable part out of a provider error body:
/// `{"error":{"message":..}}`, then `{"detail":..}`, then the raw text.
pub fn error_message(body: &str) -> FastStr {
    let body = body.trim();
    if let Ok(data) = body.parse::<Value>() {
        if let Some(msg) = data["error"]["message"]
            .as_str()
            .or_else(|| data["error"].as_str())
            .or_else(|| data["detail"].as_str())
        {
            return msg.to_owned().into();
        }
    }
    body.to_owned().into()
}
