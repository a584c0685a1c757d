use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt, wrappers::WatchStream};
use crate::controller::Snapshot;
use crate::error::ApiError;
use crate::models::SubmitRequest;
use crate::state::AppState;

pub async fn features_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let features: Vec<_> = state
        .generators
        .values()
        .map(|c| {
            serde_json::json!({
                "name": c.feature().name,
                "fields": c.feature().fields,
                "pending": c.snapshot().is_pending(),
            })
        })
        .collect();
    Json(serde_json::json!({ "generators": features }))
}

pub async fn snapshot_handler(
    State(state): State<Arc<AppState>>,
    Path(feature): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(state.generator(&feature)?.snapshot()))
}

// Fire-and-forget: answers as soon as the submission is accepted or rejected
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Path(feature): Path<String>,
    Json(payload): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Snapshot>), ApiError> {
    let controller = state.generator(&feature)?;

    // missing names count as empty
    let values: Vec<String> = controller
        .feature()
        .fields
        .iter()
        .map(|f| payload.fields.get(&f.name).cloned().unwrap_or_default())
        .collect();

    let status = match controller.submit(&values) {
        Ok(_) => StatusCode::ACCEPTED,
        Err(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    Ok((status, Json(controller.snapshot())))
}

pub async fn events_handler(
    State(state): State<Arc<AppState>>,
    Path(feature): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let rx = state.generator(&feature)?.subscribe();
    let stream = WatchStream::new(rx).map(|snapshot| Event::default().json_data(snapshot));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
