pub mod chat_openai;

use crate::data::{ChatCompletionsData, CompletionChunk};
use crate::error::Result;
use futures_util::stream::BoxStream;

pub type ChunkStream = BoxStream<'static, Result<CompletionChunk>>;

pub trait CompletionProvider: Send + Sync + 'static {
    /// Resolves once the provider has accepted the call. Setup failures
    /// come back as `Err`, later failures as an `Err` item in the stream.
    fn stream_chat(
        &self,
        data: ChatCompletionsData,
    ) -> impl Future<Output = Result<ChunkStream>> + Send;
}
