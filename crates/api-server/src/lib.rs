use crate::error::{Error, Result};
use common::RelayConfig;
use common::proxy::CompletionProvider;
use common::proxy::chat_openai::{OpenAIClient, OpenAIClientConfig};
use std::net::SocketAddr;
use tracing::info;
use volo_http::Address;
use volo_http::server::{Router, Server};
use volo_http::utils::Extension;

pub mod error;
pub mod handlers;
pub mod relay;
pub mod requests;
pub mod tools;

pub use relay::Relay;

/// Builds the process-wide relay from configuration. The provider client is
/// created here once and shared by every request.
pub fn build_relay(config: &RelayConfig) -> Result<Relay<OpenAIClient>> {
    let http_client = tools::build_http_client(config.connect_timeout)?;
    let client_config = OpenAIClientConfig::new(
        "openai".into(),
        config.api_key.clone(),
        config.api_base.clone(),
    );
    let client = OpenAIClient::new(client_config, http_client);
    Ok(Relay::new(
        client,
        config.model.clone(),
        config.profile.system_prompt(),
    ))
}

pub async fn run_api_server<P: CompletionProvider>(addr: SocketAddr, relay: Relay<P>) -> Result<()> {
    info!(addr = %addr, model = %relay.model_name(), "starting component relay");
    let app = Router::new()
        .merge(handlers::parse_components_router::<P>())
        .layer(Extension(relay));
    let addr = Address::from(addr);
    Server::new(app)
        .run(addr)
        .await
        .map_err(|e| Error::Server(e.to_string().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::tests::{Script, relay};
    use common::PromptProfile;
    use reqwest::header::CONTENT_TYPE;
    use std::time::Duration;
    use tokio::net::{TcpListener, TcpStream};

    #[test]
    fn test_build_relay_uses_profile_prompt() {
        let config = RelayConfig::from_lookup(|key| match key {
            "RELAY_PROMPT_PROFILE" => Some("multi-library".to_owned()),
            "RELAY_MODEL" => Some("gpt-4o".to_owned()),
            _ => None,
        })
        .unwrap();
        let relay = build_relay(&config).unwrap();
        assert_eq!(relay.model_name().as_str(), "gpt-4o");

        let outbound = relay.compose_messages(vec![]);
        assert_eq!(outbound.len(), 1);
        assert_eq!(outbound[0].content, PromptProfile::MultiLibrary.system_prompt());
    }

    async fn spawn_server<P: CompletionProvider>(relay: Relay<P>) -> SocketAddr {
        let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
        tokio::spawn(run_api_server(addr, relay));
        for _ in 0..100 {
            if TcpStream::connect(addr).await.is_ok() {
                return addr;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("relay server did not start on {addr}");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_before_relay() {
        let (relay, seen) = relay(Script::Chunks(vec![]));
        let addr = spawn_server(relay).await;
        let url = format!("http://{addr}/parse/components");
        let client = reqwest::Client::new();

        for body in [
            r#"{"stream":true}"#,
            r#"{"messages":"hi","stream":true}"#,
            r#"{"messages":[{"role":"user","content":42}],"stream":true}"#,
            "not json at all",
        ] {
            let response = client
                .post(&url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .unwrap();
            assert!(
                response.status().is_client_error(),
                "{body} answered with {}",
                response.status()
            );
        }
        assert!(seen.lock().unwrap().is_none());
    }
}
