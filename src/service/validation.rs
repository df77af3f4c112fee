//! Request validation for train bodies and integer path segments.
//! All problems in a body are collected so the client sees every bad field at once.

use crate::error::{AppError, FieldError};
use crate::model::TrainInput;
use serde_json::{Map, Value};

const MSG_MISSING: &str = "Field required";
const MSG_STRING: &str = "Input should be a valid string";
const MSG_INT: &str = "Input should be a valid integer";
const MSG_INT_PARSING: &str = "Input should be a valid integer, unable to parse string as an integer";

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a JSON body into a full `TrainInput`. Every field is required;
    /// unknown fields are ignored.
    pub fn train_input(body: &Value) -> Result<TrainInput, AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::Validation(vec![FieldError::whole_body(
                "model_type",
                "Input should be a valid dictionary or object",
            )]));
        };

        let mut errors = Vec::new();
        let train_date = string_field(map, "train_date", &mut errors);
        let platform = int_field(map, "platform", &mut errors);
        let start_point = string_field(map, "start_point", &mut errors);
        let end_point = string_field(map, "end_point", &mut errors);
        let arrival_time = string_field(map, "arrival_time", &mut errors);
        let departure_time = string_field(map, "departure_time", &mut errors);

        match (train_date, platform, start_point, end_point, arrival_time, departure_time) {
            (
                Some(train_date),
                Some(platform),
                Some(start_point),
                Some(end_point),
                Some(arrival_time),
                Some(departure_time),
            ) if errors.is_empty() => Ok(TrainInput {
                train_date,
                platform,
                start_point,
                end_point,
                arrival_time,
                departure_time,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }

    /// Parse an integer path segment such as `{id}` or `{platform}`.
    pub fn path_int(field: &str, raw: &str) -> Result<i32, AppError> {
        raw.trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation(vec![FieldError::path(field, "int_parsing", MSG_INT_PARSING)]))
    }

    /// Combine a path check with a body check. When both fail validation the
    /// path errors come first, then the body errors.
    pub fn both<A, B>(path: Result<A, AppError>, body: Result<B, AppError>) -> Result<(A, B), AppError> {
        match (path, body) {
            (Ok(a), Ok(b)) => Ok((a, b)),
            (Err(AppError::Validation(mut errors)), Err(AppError::Validation(body_errors))) => {
                errors.extend(body_errors);
                Err(AppError::Validation(errors))
            }
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }
}

fn string_field(map: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match map.get(name) {
        None => {
            errors.push(FieldError::body(name, "missing", MSG_MISSING));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::body(name, "string_type", MSG_STRING));
            None
        }
    }
}

/// Integers pass as-is; numeric strings and whole floats are accepted the way a
/// lax JSON schema would coerce them.
fn int_field(map: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
    let parsed = match map.get(name) {
        None => {
            errors.push(FieldError::body(name, "missing", MSG_MISSING));
            return None;
        }
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(("int_type", MSG_INT)),
        Some(Value::String(s)) => s.trim().parse::<i32>().map_err(|_| ("int_parsing", MSG_INT_PARSING)),
        Some(_) => Err(("int_type", MSG_INT)),
    };
    match parsed {
        Ok(n) => Some(n),
        Err((kind, msg)) => {
            errors.push(FieldError::body(name, kind, msg));
            None
        }
    }
}
