//! Envelope response rendering

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use skinvault_core::ApiEnvelope;

use crate::constants::JSON_CONTENT_TYPE;

/// Serialize an envelope with an explicit UTF-8 JSON content type.
///
/// serde_json never escapes non-ASCII, so names and messages reach the
/// client as written.
pub fn envelope_response<T: Serialize>(status: StatusCode, envelope: &ApiEnvelope<T>) -> Response {
    match serde_json::to_vec(envelope) {
        Ok(body) => {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = status;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            );
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response envelope");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use skinvault_core::BatchSummary;

    #[tokio::test]
    async fn test_non_ascii_is_not_escaped() {
        let envelope: ApiEnvelope<BatchSummary> = ApiEnvelope::failure("Ошибка: файл не найден");
        let response = envelope_response(StatusCode::BAD_REQUEST, &envelope);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        assert_eq!(
            text,
            r#"{"success":false,"message":"Ошибка: файл не найден","data":null}"#
        );
    }
}
