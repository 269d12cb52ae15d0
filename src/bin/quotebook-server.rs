use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::RwLock;
use tracing::info;

use quotebook::model::Entry;
use quotebook::remote::PushResponse;

#[path = "quotebook_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "quotebook_server/persistence.rs"]
mod persistence;
#[path = "quotebook_server/routes.rs"]
mod routes;
#[path = "quotebook_server/runtime.rs"]
mod runtime;

/// The shared collection every client syncs against.
#[derive(Clone)]
struct AppState {
    quotes: Arc<RwLock<Vec<Entry>>>,
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
