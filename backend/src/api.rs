use crate::errors::ApiError;
use crate::models::*;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use crowdfund_zk::constants::DONOR_COUNT;
use crowdfund_zk::snarkjs::SnarkjsVerifyingKey;
use crowdfund_zk::types::sample_donors;
use crowdfund_zk::ZkError;
use rand::rngs::OsRng;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

const BODY_LIMIT: usize = 1024 * 1024;

/// Build the HTTP router. When `static_dir` is given, unknown paths fall back to
/// its files and then to its `index.html`.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/config", get(get_config))
        .route("/api/proof", post(create_proof))
        .route("/api/verify", post(verify_proof))
        .route("/api/verification-key", get(get_verification_key))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

async fn get_config() -> Json<ConfigResponse> {
    Json(ConfigResponse {
        donor_count: DONOR_COUNT,
        sample_donors: sample_donors(),
    })
}

async fn create_proof(
    State(state): State<AppState>,
    payload: Result<Json<ProofRequest>, JsonRejection>,
) -> Result<Json<ProofResponse>, ApiError> {
    let Json(req) = payload.map_err(bad_json)?;
    let donors = req
        .donors
        .ok_or_else(|| ApiError::BadRequest("donors array is required in the request body".to_string()))?;

    // Hashing, proving and pairing checks are CPU-bound / blocking.
    let orchestrator = state.orchestrator.clone();
    let record = tokio::task::spawn_blocking(move || orchestrator.generate(&donors, &mut OsRng))
        .await
        .map_err(|_| ApiError::Internal)??;

    tracing::info!(total = %record.total, verified = record.outcome.verified, "proof generated");

    Ok(Json(record.into()))
}

async fn verify_proof(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let Json(req) = payload.map_err(bad_json)?;

    let signals = req
        .public_signals
        .iter()
        .enumerate()
        .map(|(index, v)| signal_text(v).ok_or(ZkError::InvalidPublicSignal { index }))
        .collect::<Result<Vec<_>, _>>()?;

    let gateway = state.gateway.clone();
    let proof = req.proof;
    let outcome = tokio::task::spawn_blocking(move || gateway.verify(&proof, &signals))
        .await
        .map_err(|_| ApiError::Internal)??;

    tracing::info!(verified = outcome.verified, "external proof checked");

    Ok(Json(outcome.into()))
}

async fn get_verification_key(State(state): State<AppState>) -> Json<SnarkjsVerifyingKey> {
    Json(state.verification_key().clone())
}
