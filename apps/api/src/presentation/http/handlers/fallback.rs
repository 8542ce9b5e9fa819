use crate::presentation::http::errors::AppError;

pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route Not Found".into())
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
