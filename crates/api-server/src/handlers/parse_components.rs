use crate::relay::{Relay, RelayFrame};
use crate::requests::InferenceRequest;
use crate::tools::{generate_request_id, with_cors};
use common::proxy::CompletionProvider;
use futures_util::{Stream, StreamExt};
use reqwest::StatusCode;
use std::convert::Infallible;
use tracing::{error, info};
use volo_http::{
    response::Response,
    server::{
        IntoResponse,
        extract::Json,
        response::sse::{Event, Sse},
        route::{Router, post},
    },
    utils::Extension,
};

async fn parse_components_handler<P: CompletionProvider>(
    Extension(relay): Extension<Relay<P>>,
    Json(req): Json<InferenceRequest>,
) -> Response {
    let request_id = generate_request_id();
    info!(request_id = %request_id, messages = req.messages.len(), stream = req.stream, "recv component query");
    let mut response = match relay.relay(request_id.clone(), req).await {
        Ok(frames) => create_sse_response(frames).into_response(),
        Err(err) => {
            error!(request_id = %request_id, "Error: {err}");
            err.into_response()
        }
    };
    with_cors(&mut response);
    response
}

async fn preflight_handler() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    with_cors(&mut response);
    response
}

fn create_sse_response<S>(frames: S) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = RelayFrame> + Send + Sync + 'static,
{
    Sse::new(frames.map(|frame| Ok::<_, Infallible>(Event::new().data(frame.into_data()))))
}

pub fn parse_components_router<P: CompletionProvider>() -> Router {
    Router::new().route(
        "/parse/components",
        post(parse_components_handler::<P>).options(preflight_handler),
    )
}
