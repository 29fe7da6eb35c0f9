use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// Template id that makes the testing server answer with a server error.
pub const FAILING_TEMPLATE_ID: &str = "fail";

#[derive(Debug, Clone)]
pub struct FakeEmailJsConfig {
    pub public_key: String,
    pub private_key: Option<String>,
}

/// A request accepted by the testing server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedEmail {
    pub service_id: String,
    pub template_id: String,
    pub template_params: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct AppState {
    config: Arc<FakeEmailJsConfig>,
    received: Arc<Mutex<Vec<ReceivedEmail>>>,
}

/// Handle to a testing server running in the background.
#[derive(Debug, Clone)]
pub struct FakeEmailJs {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedEmail>>>,
}

impl FakeEmailJs {
    /// Base url to configure as EmailJS endpoint.
    pub fn endpoint(&self) -> Url {
        format!("http://{}/", self.addr)
            .parse()
            .expect("socket address forms a valid url")
    }

    /// Emails accepted so far, oldest first.
    pub fn received(&self) -> Vec<ReceivedEmail> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Starts the testing server on a random local port and returns immediately.
pub async fn spawn(config: FakeEmailJsConfig) -> anyhow::Result<FakeEmailJs> {
    let listener = TcpListener::bind((IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
        .await
        .context("Failed to bind testing server")?;
    let addr = listener.local_addr()?;

    let state = AppState {
        config: config.into(),
        received: Default::default(),
    };
    let received = Arc::clone(&state.received);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router(state)).await {
            tracing::error!("EmailJS testing server failed: {err}");
        }
    });

    Ok(FakeEmailJs { addr, received })
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    config: FakeEmailJsConfig,
) -> anyhow::Result<()> {
    info!("Starting EmailJS testing server on {host}:{port}");
    info!("EmailJS endpoint: http://{host}:{port}/");
    info!("Public key: {:?}", config.public_key);
    info!("Use the template id {FAILING_TEMPLATE_ID:?} to simulate a provider outage");

    let state = AppState {
        config: config.into(),
        received: Default::default(),
    };

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(state))
        .await
        .context("Failed to start HTTP server")
}

fn router(state: AppState) -> Router {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(state)
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    #[serde(default)]
    template_params: HashMap<String, String>,
}

async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    if request.user_id != state.config.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }

    if let Some(private_key) = &state.config.private_key {
        if request.access_token.as_ref() != Some(private_key) {
            return (StatusCode::FORBIDDEN, "The access token is invalid");
        }
    }

    if request.template_id == FAILING_TEMPLATE_ID {
        return (StatusCode::SERVICE_UNAVAILABLE, "Service temporarily unavailable");
    }

    state
        .received
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(ReceivedEmail {
            service_id: request.service_id,
            template_id: request.template_id,
            template_params: request.template_params,
        });

    (StatusCode::OK, "OK")
}
