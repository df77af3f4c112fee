//! Train CRUD routes.

use crate::handlers::trains::{
    create_train, delete_train, get_train_by_id, get_trains_by_end_point, get_trains_by_platform,
    list_trains, root, update_train,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn train_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/trains", get(list_trains).post(create_train))
        .route(
            "/trains/id/:id",
            get(get_train_by_id).put(update_train).delete(delete_train),
        )
        .route("/trains/platform/:platform", get(get_trains_by_platform))
        .route("/trains/end_point/:end_point", get(get_trains_by_end_point))
        .with_state(state)
}
