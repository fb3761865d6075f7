mod catalog;
mod crypto;
mod evaluate;
mod llm;
mod pdf;
mod response;
mod routes;
mod sql;
mod storage;

use crate::catalog::Catalog;
use crate::crypto::FileCipher;
use crate::llm::OllamaClient;
use env_logger::Env;
use log::{error, info};
use serde::Deserialize;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_redoc::Redoc;
use utoipa_redoc::Servable;

fn get_default_port() -> u16 {
    8080
}

fn get_default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn get_default_model() -> String {
    "deepseek-coder".to_string()
}

fn get_default_request_timeout() -> u64 {
    300
}

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default = "get_default_port")]
    port: u16,
    #[serde(default = "get_default_base_url")]
    base_url: String,
    #[serde(default = "get_default_model")]
    model: String,
    #[serde(default = "get_default_request_timeout")]
    request_timeout: u64,
    catalog_path: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub cipher: Arc<FileCipher>,
    pub llm: Arc<OllamaClient>,
}

#[derive(OpenApi)]
#[openapi(info(description = "API for grading PDF exercise submissions with a local LLM"))]
struct ApiDoc;

async fn run() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = envy::from_env::<Config>()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin(),
    };
    info!("Loaded {} exercise(s)", catalog.len());

    let state = AppState {
        catalog: Arc::new(catalog),
        // Process-lifetime key: a restart invalidates stored submissions,
        // which never outlive their request anyway.
        cipher: Arc::new(FileCipher::generate()),
        llm: Arc::new(OllamaClient::new(
            &config.base_url,
            &config.model,
            Duration::from_secs(config.request_timeout),
        )),
    };

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(routes::evaluate_submission))
        .split_for_parts();

    info!("Starting on port {}", config.port);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    axum::serve(
        listener,
        router
            .merge(Redoc::with_url("/redoc", api))
            .with_state(state),
    )
    .await?;

    Ok(())
}

fn main() {
    let rt = tokio::runtime::Runtime::new().unwrap();

    if let Err(err) = rt.block_on(run()) {
        error!("{}", err);
        exit(1)
    }
}
