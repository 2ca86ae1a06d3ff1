use faststr::FastStr;
use reqwest_eventsource::CannotCloneRequestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    MsgError(FastStr),
    #[error("invalid config {0}: {1}")]
    InvalidConfig(&'static str, FastStr),
    #[error("{0}")]
    CannotCloneRequestError(#[from] CannotCloneRequestError),
    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Invalid response data: {0} status: {1}")]
    InvalidResponseData(FastStr, u16),
    #[error("Invalid response event-stream: content-type: {0}, data: {1}")]
    InvalidResponseEventStream(FastStr, FastStr),
    #[error("Reqwest eventsource error: {0}")]
    ReqwestEventsourceError(FastStr),
    #[error("Invalid completion chunk: {0}")]
    InvalidChunk(#[from] serde_json::Error),
    #[error("event stream closed before it was opened")]
    StreamNotOpened,
}

pub type Result<T> = std::result::Result<T, Error>;
