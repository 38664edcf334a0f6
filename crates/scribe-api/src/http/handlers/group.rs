//! Group handlers.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/groups - All groups, by title.
pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let timer = RequestTimer::start();

    let groups = state.group_service.list_groups().await?;
    let mut resp = timer
        .finish(json!({ "view": "group_index", "groups": &groups }))
        .with_link("self", "/api/v1/groups/");
    for group in &groups {
        resp = resp.with_link(
            &format!("group:{}", group.slug),
            &format!("/api/v1/group/{}/", group.slug),
        );
    }

    Ok(Json(resp))
}
