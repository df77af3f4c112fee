//! Request extractors.

pub mod body;
pub mod path;

pub use body::TrainBody;
pub use path::PathParam;
