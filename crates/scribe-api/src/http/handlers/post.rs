//! Post handlers: listings, detail, and author-only create/edit.
//!
//! Each handler answers with the `view` it produced and the same context
//! keys a page template would receive (`page_obj`, `group`, `author`,
//! `post`, `form`, `is_edit`).

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use scribe_core::form::{PostForm, Submission};
use scribe_core::pagination::Page;
use scribe_types::error::PostError;
use scribe_types::post::{Post, PostId};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::extractors::query::PageQuery;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

type JsonResult = Result<Json<ApiResponse<Value>>, AppError>;

/// Ids that are not integers cannot name a post.
fn parse_post_id(raw: &str) -> Result<PostId, AppError> {
    raw.parse::<PostId>()
        .map_err(|_| AppError::Post(PostError::NotFound))
}

/// Read a create/edit body. Only a body that is not JSON at all is refused
/// here; wrong field types come back as form errors.
fn read_submission(body: Result<Json<Value>, JsonRejection>) -> Result<Submission, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
    Ok(PostForm::decode(&body))
}

/// Add `next`/`previous` page links next to `self`.
fn with_page_links<T: serde::Serialize, P>(
    resp: ApiResponse<T>,
    base: &str,
    page: &Page<P>,
) -> ApiResponse<T> {
    let mut resp = resp.with_link("self", &format!("{base}?page={}", page.number));
    if let Some(next) = page.next_page_number {
        resp = resp.with_link("next", &format!("{base}?page={next}"));
    }
    if let Some(previous) = page.previous_page_number {
        resp = resp.with_link("previous", &format!("{base}?page={previous}"));
    }
    resp
}

/// GET /api/v1/ - Site-wide feed, newest first.
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> JsonResult {
    let timer = RequestTimer::start();

    let page = state.post_service.index(query.page()).await?;
    let data = json!({ "view": "index", "page_obj": &page });

    Ok(Json(with_page_links(timer.finish(data), "/api/v1/", &page)))
}

/// GET /api/v1/group/{slug} - Posts of one group.
pub async fn group_list(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> JsonResult {
    let timer = RequestTimer::start();

    let listing = state.post_service.group_posts(&slug, query.page()).await?;
    let data = json!({
        "view": "group_list",
        "group": &listing.group,
        "page_obj": &listing.page,
    });

    let base = format!("/api/v1/group/{slug}/");
    Ok(Json(with_page_links(timer.finish(data), &base, &listing.page)))
}

/// GET /api/v1/profile/{username} - Posts of one author.
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> JsonResult {
    let timer = RequestTimer::start();

    let listing = state.post_service.profile(&username, query.page()).await?;
    let data = json!({
        "view": "profile",
        "author": &listing.author,
        "page_obj": &listing.page,
    });

    let base = format!("/api/v1/profile/{username}/");
    Ok(Json(with_page_links(timer.finish(data), &base, &listing.page)))
}

/// GET /api/v1/posts/{id} - A single post.
pub async fn post_detail(State(state): State<AppState>, Path(id): Path<String>) -> JsonResult {
    let timer = RequestTimer::start();

    let post = state.post_service.post_detail(parse_post_id(&id)?).await?;
    let resp = timer
        .finish(json!({ "view": "post_detail", "post": &post }))
        .with_link("self", &format!("/api/v1/posts/{}/", post.id))
        .with_link("profile", &profile_href(&post));

    Ok(Json(resp))
}

fn profile_href(post: &Post) -> String {
    format!("/api/v1/profile/{}/", post.author.username)
}

/// GET /api/v1/create - Empty form for a new post.
pub async fn create_form(State(state): State<AppState>, _user: CurrentUser) -> JsonResult {
    let timer = RequestTimer::start();

    let form = state.post_service.create_form().await?;
    let data = json!({ "view": "create_post", "form": form, "is_edit": false });

    Ok(Json(timer.finish(data).with_link("self", "/api/v1/create/")))
}

/// POST /api/v1/create - Publish a post as the caller.
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), AppError> {
    let timer = RequestTimer::start();
    let submission = read_submission(body)?;

    let post = match state.post_service.create_post(&user, submission.clone()).await {
        Ok(post) => post,
        Err(PostError::Invalid(errors)) => {
            let form = state
                .post_service
                .form_with_errors(&submission.input, errors.clone())
                .await?;
            return Err(AppError::InvalidForm {
                context: json!({ "view": "create_post", "form": form, "is_edit": false }),
                errors,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let resp = timer
        .finish(json!({ "post": &post }))
        .with_link("self", &format!("/api/v1/posts/{}/", post.id))
        .with_link("profile", &profile_href(&post));

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/posts/{id}/edit - Pre-filled form (author only).
pub async fn edit_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> JsonResult {
    let timer = RequestTimer::start();
    let id = parse_post_id(&id)?;

    let edit = state
        .post_service
        .edit_form(&user, id)
        .await
        .map_err(|e| AppError::for_post(e, id))?;
    let data = json!({
        "view": "create_post",
        "form": edit.form,
        "post": &edit.post,
        "is_edit": true,
    });

    let resp = timer
        .finish(data)
        .with_link("self", &format!("/api/v1/posts/{id}/edit/"))
        .with_link("post_detail", &format!("/api/v1/posts/{id}/"));

    Ok(Json(resp))
}

/// POST /api/v1/posts/{id}/edit - Replace text and group (author only).
pub async fn edit_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> JsonResult {
    let timer = RequestTimer::start();
    let id = parse_post_id(&id)?;
    let submission = read_submission(body)?;

    let post = match state.post_service.edit_post(&user, id, submission.clone()).await {
        Ok(post) => post,
        Err(PostError::Invalid(errors)) => {
            let post = state.post_service.post_detail(id).await?;
            let form = state
                .post_service
                .form_with_errors(&submission.input, errors.clone())
                .await?;
            return Err(AppError::InvalidForm {
                context: json!({
                    "view": "create_post",
                    "form": form,
                    "post": post,
                    "is_edit": true,
                }),
                errors,
            });
        }
        Err(e) => return Err(AppError::for_post(e, id)),
    };

    let resp = timer
        .finish(json!({ "post": &post }))
        .with_link("post_detail", &format!("/api/v1/posts/{}/", post.id));

    Ok(Json(resp))
}
