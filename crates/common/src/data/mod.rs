mod chat;
mod request;

pub use chat::{ChatCompletionsData, ChunkChoice, ChunkDelta, CompletionChunk};
pub use request::RequestData;
