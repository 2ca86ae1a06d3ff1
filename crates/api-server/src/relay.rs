use crate::error::Result;
use crate::requests::InferenceRequest;
use crate::tools::{create_chunk_frame, create_error_frame};
use common::data::ChatCompletionsData;
use common::messages::Message;
use common::proxy::{ChunkStream, CompletionProvider};
use faststr::FastStr;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc::{Sender, channel};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};

/// What the browser receives, one SSE `data:` payload each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFrame {
    Chunk(FastStr),
    Aborted(FastStr),
}

impl RelayFrame {
    pub fn into_data(self) -> FastStr {
        match self {
            Self::Chunk(data) | Self::Aborted(data) => data,
        }
    }
}

/// Puts the system prompt in front of the caller's transcript and forwards
/// the provider's chunks as frames.
pub struct Relay<P> {
    provider:      Arc<P>,
    model_name:    FastStr,
    system_prompt: FastStr,
}

impl<P> Clone for Relay<P> {
    fn clone(&self) -> Self {
        Self {
            provider:      self.provider.clone(),
            model_name:    self.model_name.clone(),
            system_prompt: self.system_prompt.clone(),
        }
    }
}

impl<P: CompletionProvider> Relay<P> {
    pub fn new(provider: P, model_name: FastStr, system_prompt: FastStr) -> Self {
        Self {
            provider: Arc::new(provider),
            model_name,
            system_prompt,
        }
    }

    pub fn model_name(&self) -> &FastStr {
        &self.model_name
    }

    /// The system prompt always comes first, even when the caller already
    /// sent a system message of its own.
    pub fn compose_messages(&self, messages: Vec<Message>) -> Vec<Message> {
        let mut outbound = Vec::with_capacity(messages.len() + 1);
        outbound.push(Message::system(self.system_prompt.clone()));
        outbound.extend(messages);
        outbound
    }

    /// Opens the provider stream and starts forwarding it. An `Err` means
    /// nothing was streamed yet.
    pub async fn relay(
        &self,
        request_id: FastStr,
        req: InferenceRequest,
    ) -> Result<ReceiverStream<RelayFrame>> {
        if !req.stream {
            warn!(request_id = %request_id, "stream=false requested, responding with a stream anyway");
        }
        let caller_system = req.messages.iter().filter(|m| m.is_system()).count();
        if caller_system > 0 {
            debug!(request_id = %request_id, caller_system, "caller system messages kept after the fixed prompt");
        }
        let messages = self.compose_messages(req.messages);
        debug!(request_id = %request_id, messages = messages.len(), model = %self.model_name, "composed outbound messages");
        let data = ChatCompletionsData::streaming(self.model_name.clone(), messages);

        let chunks = self.provider.stream_chat(data).await?;

        let (tx, rx) = channel(1);
        tokio::spawn(forward_chunks(request_id, chunks, tx));
        Ok(ReceiverStream::new(rx))
    }
}

async fn forward_chunks(request_id: FastStr, mut chunks: ChunkStream, tx: Sender<RelayFrame>) {
    let mut forwarded = 0usize;
    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                warn!(request_id = %request_id, forwarded, "client went away, cancelling upstream completion");
                return;
            }
            next = chunks.next() => next,
        };
        let frame = match next {
            Some(Ok(chunk)) => {
                debug!(request_id = %request_id, chunk = ?chunk, "Received chunk");
                if let Some(reason) = chunk.finish_reason() {
                    info!(request_id = %request_id, finish_reason = reason, "completion finish reason");
                }
                RelayFrame::Chunk(create_chunk_frame(&chunk))
            }
            Some(Err(err)) => {
                error!(request_id = %request_id, forwarded, "completion stream aborted: {err}");
                let frame = RelayFrame::Aborted(create_error_frame(&err.to_string()));
                if tx.send(frame).await.is_err() {
                    warn!(request_id = %request_id, "failed to send abort frame, tx maybe closed");
                }
                return;
            }
            None => {
                info!(request_id = %request_id, forwarded, "completion stream finished");
                return;
            }
        };
        if tx.send(frame).await.is_err() {
            warn!(request_id = %request_id, forwarded, "client went away, cancelling upstream completion");
            return;
        }
        forwarded += 1;
    }
}
