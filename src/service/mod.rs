//! TrainService: the train operations, plus request validation.

mod trains;
mod validation;
pub use trains::TrainService;
pub use validation::RequestValidator;
