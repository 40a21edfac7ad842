use crate::utils::error::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

const NON_FIELD_ERRORS: &str = "non_field_errors";

pub fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

pub fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Not found.")
}

fn field_errors<'a>(errors: impl IntoIterator<Item = (&'a str, String)>) -> Value {
    let mut body = Map::new();
    for (field, message) in errors {
        let messages = body.entry(field).or_insert_with(|| json!([]));
        if let Value::Array(messages) = messages {
            messages.push(Value::String(message));
        }
    }
    Value::Object(body)
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_client_error() {
            tracing::debug!("Request rejected ({}): {}", status, self);
        } else {
            tracing::error!("Request failed ({}): {}", status, self);
        }

        match self {
            ServiceError::ValidationError {
                field: Some(field),
                message,
            } => (status, Json(field_errors([(field.as_str(), message)]))).into_response(),
            ServiceError::FieldErrors { errors } => {
                let body = field_errors(
                    errors
                        .iter()
                        .map(|(field, message)| (field.as_str(), message.clone())),
                );
                (status, Json(body)).into_response()
            }
            ServiceError::ValidationError {
                field: None,
                message,
            }
            | ServiceError::UniqueConstraintError { message } => {
                (status, Json(field_errors([(NON_FIELD_ERRORS, message)]))).into_response()
            }
            ServiceError::NotFoundError { .. } => not_found(),
            ServiceError::InvalidPage => detail(status, "Invalid page."),
            ServiceError::MalformedPayload { message }
            | ServiceError::UnsupportedMediaType { message } => detail(status, &message),
            err @ (ServiceError::RegistryUnavailable { .. } | ServiceError::ApiError(_)) => {
                detail(status, &err.to_string())
            }
            _ => detail(status, "A server error occurred."),
        }
    }
}
