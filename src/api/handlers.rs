use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::auth::CurrentUser;
use super::dto::{BookListParams, CreateBookRequest, RelationRequest, UpdateBookRequest};
use super::AppState;
use crate::domain::entities::{BookView, UserBookRelation};
use crate::shared::errors::AppResult;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> AppResult<Json<Vec<BookView>>> {
    let query = params.into_query()?;
    let views = state.books.list_books(query).await?;
    Ok(Json(views))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookView>> {
    let view = state.books.get_book(id).await?;
    Ok(Json(view))
}

pub async fn create_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<BookView>)> {
    let view = state
        .books
        .create_book(
            &user,
            request.name,
            request.price,
            request.author_name,
            request.discount,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBookRequest>,
) -> AppResult<Json<BookView>> {
    let view = state
        .books
        .update_book(
            &user,
            id,
            request.name,
            request.price,
            request.author_name,
            request.discount,
        )
        .await?;
    Ok(Json(view))
}

pub async fn delete_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.books.delete_book(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_relation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
    Json(request): Json<RelationRequest>,
) -> AppResult<Json<UserBookRelation>> {
    let relation = state
        .relations
        .set_relation(&user, book_id, request.into())
        .await?;
    Ok(Json(relation))
}
