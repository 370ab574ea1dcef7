use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_infra::handlers::HandlerError;
use catalog_infra::mediator::DispatchError;
use catalog_infra::repository::RepositoryError;

use crate::app::services::ProductDispatchError;

pub fn dispatch_error_to_response(err: ProductDispatchError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DispatchError::Unsupported(_) => {
            json_error(StatusCode::NOT_IMPLEMENTED, "unsupported_operation", message)
        }
        DispatchError::EventDelivery { .. } => {
            tracing::error!(error = %message, "event delivery failed");
            json_error(StatusCode::BAD_GATEWAY, "publish_error", message)
        }
        DispatchError::Handler(e) => handler_error_to_response(e),
    }
}

pub fn handler_error_to_response(err: HandlerError) -> axum::response::Response {
    let message = err.to_string();
    let (status, code) = match &err {
        HandlerError::Domain(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        HandlerError::NotFound(_) | HandlerError::Storage(RepositoryError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        HandlerError::Storage(RepositoryError::Duplicate(_)) => (StatusCode::CONFLICT, "conflict"),
        HandlerError::Storage(RepositoryError::Unavailable(_)) => {
            (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
        }
        HandlerError::Storage(RepositoryError::Corrupt(_) | RepositoryError::Unsupported(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
        }
        HandlerError::Publish(_) => (StatusCode::BAD_GATEWAY, "publish_error"),
        HandlerError::Misrouted { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    if status.is_server_error() {
        tracing::error!(%status, error = %message, "request failed");
    }
    json_error(status, code, message)
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    handler_error_to_response(HandlerError::Domain(err))
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use catalog_core::ProductId;
    use catalog_products::ProductMessageKind;

    use super::*;

    fn status_of(err: ProductDispatchError) -> StatusCode {
        dispatch_error_to_response(err).status()
    }

    fn id() -> ProductId {
        "p-1".parse().unwrap()
    }

    #[test]
    fn dispatch_errors_map_to_documented_statuses() {
        let cases: Vec<(ProductDispatchError, StatusCode)> = vec![
            (
                DispatchError::Handler(HandlerError::Domain(DomainError::validation("bad"))),
                StatusCode::BAD_REQUEST,
            ),
            (DispatchError::Handler(HandlerError::NotFound(id())), StatusCode::NOT_FOUND),
            (
                DispatchError::Handler(HandlerError::Storage(RepositoryError::Duplicate(id()))),
                StatusCode::CONFLICT,
            ),
            (
                DispatchError::Handler(HandlerError::Storage(RepositoryError::Unavailable("down".into()))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DispatchError::Handler(HandlerError::Storage(RepositoryError::Corrupt("row".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DispatchError::Handler(HandlerError::Storage(RepositoryError::Unsupported("update"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DispatchError::EventDelivery {
                    kind: ProductMessageKind::ProductCreated,
                    error: HandlerError::Publish("refused".into()),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                DispatchError::Unsupported(ProductMessageKind::GetProducts),
                StatusCode::NOT_IMPLEMENTED,
            ),
            (
                DispatchError::Handler(HandlerError::Misrouted {
                    handler: "x",
                    kind: ProductMessageKind::CreateProduct,
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let label = format!("{err:?}");
            assert_eq!(status_of(err), expected, "{label}");
        }
    }
}
