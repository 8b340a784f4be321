// src/error.rs
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorBody;
use crate::services::completion::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AppError {
    /// Every relay failure is a 500; the classification travels in `detail`.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let retry_after = match &self {
            AppError::Provider(ProviderError::RateLimited { retry_after, .. }) => *retry_after,
            _ => None,
        };

        let body = Json(ErrorBody { detail: self.to_string() });
        let mut response = (status, body).into_response();
        if let Some(secs) = retry_after.map(|d| d.as_secs()) {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
