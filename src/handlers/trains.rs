//! Train handlers: usage, list, lookups, create, update, delete.

use crate::error::AppError;
use crate::extractors::{PathParam, TrainBody};
use crate::model::{TrainInput, TrainRecord};
use crate::response::{self, DeletedTrainMessage, ErrorMessage, TrainMessage, UsageMessage};
use crate::service::{RequestValidator, TrainService};
use crate::state::AppState;
use axum::{extract::State, Json};

/// Usage hint listing the available routes.
#[utoipa::path(get, path = "/", tag = "trains", responses((status = 200, body = UsageMessage)))]
pub async fn root() -> Json<UsageMessage> {
    response::usage()
}

#[utoipa::path(
    get,
    path = "/trains",
    tag = "trains",
    responses(
        (status = 200, description = "All trains", body = [TrainRecord]),
        (status = 500, description = "Storage failure", body = ErrorMessage)
    )
)]
pub async fn list_trains(State(state): State<AppState>) -> Result<Json<Vec<TrainRecord>>, AppError> {
    let rows = TrainService::list(state.store.as_ref()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/trains/id/{id}",
    tag = "trains",
    params(("id" = i32, Path, description = "Train id")),
    responses(
        (status = 200, description = "The train, as a one-element list", body = [TrainRecord]),
        (status = 404, description = "No train with this id", body = ErrorMessage),
        (status = 422, description = "Id is not an integer"),
        (status = 500, description = "Storage failure", body = ErrorMessage)
    )
)]
pub async fn get_train_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam,
) -> Result<Json<Vec<TrainRecord>>, AppError> {
    let id = RequestValidator::path_int("id", &id)?;
    let rows = TrainService::get_by_id(state.store.as_ref(), id).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/trains/platform/{platform}",
    tag = "trains",
    params(("platform" = i32, Path, description = "Platform number")),
    responses(
        (status = 200, description = "Trains on this platform, possibly none", body = [TrainRecord]),
        (status = 422, description = "Platform is not an integer"),
        (status = 500, description = "Storage failure", body = ErrorMessage)
    )
)]
pub async fn get_trains_by_platform(
    State(state): State<AppState>,
    PathParam(platform): PathParam,
) -> Result<Json<Vec<TrainRecord>>, AppError> {
    let platform = RequestValidator::path_int("platform", &platform)?;
    let rows = TrainService::get_by_platform(state.store.as_ref(), platform).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/trains/end_point/{end_point}",
    tag = "trains",
    params(("end_point" = String, Path, description = "Destination")),
    responses(
        (status = 200, description = "Trains ending here, possibly none", body = [TrainRecord]),
        (status = 500, description = "Storage failure", body = ErrorMessage)
    )
)]
pub async fn get_trains_by_end_point(
    State(state): State<AppState>,
    PathParam(end_point): PathParam,
) -> Result<Json<Vec<TrainRecord>>, AppError> {
    let rows = TrainService::get_by_end_point(state.store.as_ref(), &end_point).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/trains",
    tag = "trains",
    request_body = TrainInput,
    responses(
        (status = 200, description = "Created", body = TrainMessage),
        (status = 422, description = "Invalid body"),
        (status = 500, description = "Storage failure", body = ErrorMessage)
    )
)]
pub async fn create_train(
    State(state): State<AppState>,
    TrainBody(input): TrainBody,
) -> Result<Json<TrainMessage>, AppError> {
    let row = TrainService::create(state.store.as_ref(), &input).await?;
    Ok(response::created(row))
}

#[utoipa::path(
    put,
    path = "/trains/id/{id}",
    tag = "trains",
    params(("id" = i32, Path, description = "Train id")),
    request_body = TrainInput,
    responses(
        (status = 200, description = "Updated", body = TrainMessage),
        (status = 404, description = "No train with this id", body = ErrorMessage),
        (status = 422, description = "Invalid id or body"),
        (status = 500, description = "Storage failure", body = ErrorMessage)
    )
)]
pub async fn update_train(
    State(state): State<AppState>,
    PathParam(id): PathParam,
    body: Result<TrainBody, AppError>,
) -> Result<Json<TrainMessage>, AppError> {
    let (id, TrainBody(input)) = RequestValidator::both(RequestValidator::path_int("id", &id), body)?;
    let row = TrainService::update(state.store.as_ref(), id, &input).await?;
    Ok(response::updated(row))
}

#[utoipa::path(
    delete,
    path = "/trains/id/{id}",
    tag = "trains",
    params(("id" = i32, Path, description = "Train id")),
    responses(
        (status = 200, description = "Deleted", body = DeletedTrainMessage),
        (status = 404, description = "No train with this id", body = ErrorMessage),
        (status = 422, description = "Id is not an integer"),
        (status = 500, description = "Storage failure", body = ErrorMessage)
    )
)]
pub async fn delete_train(
    State(state): State<AppState>,
    PathParam(id): PathParam,
) -> Result<Json<DeletedTrainMessage>, AppError> {
    let id = RequestValidator::path_int("id", &id)?;
    let deleted = TrainService::delete(state.store.as_ref(), id).await?;
    Ok(response::deleted(deleted))
}
