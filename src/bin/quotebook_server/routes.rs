//! HTTP routes for the collection server.

use super::*;

pub(super) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/quotes", get(list_quotes).post(replace_quotes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_quotes(State(state): State<Arc<AppState>>) -> Json<Vec<Entry>> {
    Json(state.quotes.read().await.clone())
}

/// Replaces the whole collection. Every element must be a valid quote.
async fn replace_quotes(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let Some(items) = payload.as_array() else {
        return bad_request("expected a JSON array of quotes");
    };
    let mut quotes = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match Entry::from_json(item) {
            Ok(entry) => quotes.push(entry),
            Err(reason) => return bad_request(format!("element {}: {}", idx, reason)),
        }
    }

    let mut current = state.quotes.write().await;
    if let Some(path) = &state.data_file
        && let Err(err) = persistence::save(path, &quotes)
    {
        return internal_error(err);
    }
    *current = quotes;
    let stored = current.len();
    info!(stored, "collection replaced");
    Json(PushResponse { stored }).into_response()
}
