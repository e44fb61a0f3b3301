use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{Value, json};

use homestock_core::DomainError;
use homestock_infra::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Persistence(e) => {
            tracing::error!(error = %e, "persistence failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "persistence_error", e.to_string())
        }
        StoreError::Unavailable => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "unavailable",
            "inventory store unavailable",
        ),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation { field, .. } => json_error_with(
            StatusCode::BAD_REQUEST,
            "validation_error",
            message,
            json!({ "field": field }),
        ),
        DomainError::NotFound { entity, id } => json_error_with(
            StatusCode::NOT_FOUND,
            "not_found",
            message,
            json!({ "entity": entity, "id": id }),
        ),
        DomainError::Conflict { entity, id, .. } => json_error_with(
            StatusCode::CONFLICT,
            "conflict",
            message,
            json!({ "entity": entity, "id": id }),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    json_error_with(status, code, message, Value::Null)
}

/// Error body with extra fields merged next to `error` and `message`.
pub fn json_error_with(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    details: Value,
) -> axum::response::Response {
    let mut body = json!({
        "error": code,
        "message": message.into(),
    });
    if let (Some(body), Value::Object(extra)) = (body.as_object_mut(), details) {
        body.extend(extra);
    }
    (status, axum::Json(body)).into_response()
}

/// A body or query string that did not deserialize: 400 naming the field when serde reports one.
pub fn rejection_to_response(message: String) -> axum::response::Response {
    let details = match rejected_field(&message) {
        Some(field) => json!({ "field": field }),
        None => Value::Null,
    };
    json_error_with(StatusCode::BAD_REQUEST, "validation_error", message, details)
}

/// Field path from a deserializer message such as ``missing field `name` ``
/// or `locations[0].quantity: invalid type ...`.
fn rejected_field(message: &str) -> Option<String> {
    let detail = message
        .rsplit_once("target type: ")
        .map_or(message, |(_, detail)| detail);
    if let Some((before, rest)) = detail.split_once("missing field `") {
        let field = rest.split('`').next()?;
        return Some(match before.strip_suffix(": ") {
            Some(path) if !path.contains(' ') => format!("{path}.{field}"),
            _ => field.to_string(),
        });
    }
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(' ')).then(|| path.to_string())
}

/// Parse a path segment into a typed id.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.parse().map_err(domain_error_to_response)
}
