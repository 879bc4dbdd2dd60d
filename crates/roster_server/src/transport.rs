//! Axum HTTP transport for the roster.
//!
//! # Responsibility
//! - Route participant requests onto `ParticipantService` calls.
//! - Extract the candidate: a JSON body is the structured payload, a form
//!   body is the primary discrete source and the query string is the
//!   alternate source.
//!
//! A body counts as JSON when its media type is `application/json` or any
//! `application/*+json` (e.g. `application/merge-patch+json`), and as a form
//! when it is `application/x-www-form-urlencoded`. Bodies with no or any
//! other content type are ignored; only query fields apply then.
//!
//! # Invariants
//! - One mutex guards the service, so every load/mutate/persist cycle runs
//!   alone; concurrent requests cannot lose each other's writes.
//! - Store I/O runs on the blocking pool, never on a runtime worker.

use crate::api::{self, ApiResponse};
use crate::config::ServerConfig;
use axum::extract::rejection::QueryRejection;
use axum::extract::{DefaultBodyLimit, FromRequest, Path, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use log::{error, info};
use roster_core::{
    core_version, FileParticipantStore, ParticipantFields, ParticipantInput, ParticipantService,
    ParticipantStore,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};

const MAX_HTTP_BODY_BYTES: usize = 64 * 1024;
const JSON_CONTENT_TYPE: &str = "application/json";
const JSON_SUFFIX: &str = "+json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Shared handler state: the service behind a single lock.
pub struct AppState<S: ParticipantStore> {
    service: Arc<Mutex<ParticipantService<S>>>,
}

impl<S: ParticipantStore> AppState<S> {
    pub fn new(service: ParticipantService<S>) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }

    pub fn service(&self) -> &Arc<Mutex<ParticipantService<S>>> {
        &self.service
    }
}

impl<S: ParticipantStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    id: Option<String>,
}

/// Builds the roster router over `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: ParticipantStore + Send + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route(
            "/participants",
            get(list_participants::<S>).post(create_participant::<S>),
        )
        .route(
            "/participants/:id",
            get(get_participant::<S>)
                .put(full_update_participant::<S>)
                .patch(partial_update_participant::<S>)
                .delete(delete_participant::<S>),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_HTTP_BODY_BYTES))
}

/// Serves the file-backed roster until the listener fails.
pub fn serve_http(config: &ServerConfig) -> Result<(), String> {
    let tokio_runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.http_workers.max(1))
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build tokio runtime: {e}"))?;

    let bind_addr = config.bind_addr.clone();
    let store = FileParticipantStore::new(config.store_path.clone());
    info!(
        "event=server_start module=transport status=starting bind={} store={}",
        bind_addr,
        store.path().display()
    );

    tokio_runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
        let app = router(AppState::new(ParticipantService::new(store)));

        axum::serve(listener, app)
            .await
            .map_err(|e| format!("axum server failed: {e}"))
    })
}

async fn health() -> Response {
    into_response(ApiResponse::ok(
        json!({ "status": "ok", "version": core_version() }),
    ))
}

async fn list_participants<S>(
    State(state): State<AppState<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response
where
    S: ParticipantStore + Send + 'static,
{
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return into_response(ApiResponse::bad_request(rejection.body_text())),
    };
    let id = params.id.filter(|id| !id.trim().is_empty());
    run_blocking(state, move |service| {
        api::list_response(service.list(id.as_deref().map(str::trim)))
    })
    .await
}

async fn get_participant<S>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Response
where
    S: ParticipantStore + Send + 'static,
{
    run_blocking(state, move |service| {
        api::list_response(service.list(Some(id.as_str())))
    })
    .await
}

async fn create_participant<S>(
    State(state): State<AppState<S>>,
    alternate: Result<Query<ParticipantFields>, QueryRejection>,
    request: Request,
) -> Response
where
    S: ParticipantStore + Send + 'static,
{
    let input = match read_input(request, alternate).await {
        Ok(input) => input,
        Err(response) => return into_response(response),
    };
    run_blocking(state, move |service| {
        api::create_response(service.create(&input))
    })
    .await
}

async fn full_update_participant<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    alternate: Result<Query<ParticipantFields>, QueryRejection>,
    request: Request,
) -> Response
where
    S: ParticipantStore + Send + 'static,
{
    let input = match read_input(request, alternate).await {
        Ok(input) => input,
        Err(response) => return into_response(response),
    };
    run_blocking(state, move |service| {
        api::update_response(service.full_update(&id, &input), false)
    })
    .await
}

async fn partial_update_participant<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    alternate: Result<Query<ParticipantFields>, QueryRejection>,
    request: Request,
) -> Response
where
    S: ParticipantStore + Send + 'static,
{
    let input = match read_input(request, alternate).await {
        Ok(input) => input,
        Err(response) => return into_response(response),
    };
    run_blocking(state, move |service| {
        api::update_response(service.partial_update(&id, &input), true)
    })
    .await
}

async fn delete_participant<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: ParticipantStore + Send + 'static,
{
    run_blocking(state, move |service| api::delete_response(service.delete(&id))).await
}

async fn read_input(
    request: Request,
    alternate: Result<Query<ParticipantFields>, QueryRejection>,
) -> Result<ParticipantInput, ApiResponse> {
    let Query(alternate) =
        alternate.map_err(|rejection| ApiResponse::bad_request(rejection.body_text()))?;
    let media_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    let mut input = ParticipantInput {
        alternate,
        ..ParticipantInput::default()
    };

    if is_json_media_type(&media_type) {
        let Json(payload) = Json::<ParticipantFields>::from_request(request, &())
            .await
            .map_err(|rejection| ApiResponse::bad_request(rejection.body_text()))?;
        input.payload = Some(payload);
    } else if media_type == FORM_CONTENT_TYPE {
        let Form(discrete) = Form::<ParticipantFields>::from_request(request, &())
            .await
            .map_err(|rejection| ApiResponse::bad_request(rejection.body_text()))?;
        input.discrete = discrete;
    }

    Ok(input)
}

fn is_json_media_type(media_type: &str) -> bool {
    media_type == JSON_CONTENT_TYPE
        || (media_type.starts_with("application/") && media_type.ends_with(JSON_SUFFIX))
}

async fn run_blocking<S, F>(state: AppState<S>, op: F) -> Response
where
    S: ParticipantStore + Send + 'static,
    F: FnOnce(&ParticipantService<S>) -> ApiResponse + Send + 'static,
{
    let service = state.service;
    let joined = tokio::task::spawn_blocking(move || {
        // The service holds no state between calls; the store is re-read on
        // every operation, so a poisoned guard is still usable.
        let guard = service
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        op(&guard)
    })
    .await;

    match joined {
        Ok(response) => into_response(response),
        Err(err) => {
            error!("event=request_failed module=transport status=error error={err}");
            into_response(ApiResponse::internal_error("request handler failed"))
        }
    }
}

fn into_response(response: ApiResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::is_json_media_type;

    #[test]
    fn json_media_types_include_suffixed_variants() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/merge-patch+json"));
        assert!(!is_json_media_type("text/plain"));
        assert!(!is_json_media_type("application/x-www-form-urlencoded"));
        assert!(!is_json_media_type(""));
    }
}
