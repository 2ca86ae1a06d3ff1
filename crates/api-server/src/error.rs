use crate::tools::detail_response;
use faststr::FastStr;
use reqwest::StatusCode;
use thiserror::Error;
use volo_http::{response::Response, server::IntoResponse};

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Provider(#[from] common::error::Error),

    #[error("failed to build client: {0}")]
    FailedToBuildClient(FastStr),

    #[error("server error: {0}")]
    Server(FastStr),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        detail_response(StatusCode::INTERNAL_SERVER_ERROR, &self.to_string())
    }
}
