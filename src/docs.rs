//! OpenAPI document served at `/openapi.json`.

use crate::handlers::trains;
use crate::model::{TrainInput, TrainRecord};
use crate::response::{DeletedTrainMessage, ErrorMessage, TrainMessage, UsageMessage};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Train records", description = "CRUD over the trains table"),
    paths(
        trains::root,
        trains::list_trains,
        trains::get_train_by_id,
        trains::get_trains_by_platform,
        trains::get_trains_by_end_point,
        trains::create_train,
        trains::update_train,
        trains::delete_train
    ),
    components(schemas(
        TrainRecord,
        TrainInput,
        TrainMessage,
        DeletedTrainMessage,
        ErrorMessage,
        UsageMessage
    )),
    tags((name = "trains", description = "Train record CRUD"))
)]
pub struct ApiDoc;
