// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::types::ErrorResponse;
use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use pws_engine::ContributionError;
use thiserror::Error as ThisError;
use tracing::warn;

/// Maps engine failures onto HTTP responses.
#[derive(Debug, ThisError)]
#[error(transparent)]
pub struct ApiError(#[from] pub ContributionError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_input_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind().to_string(),
        })
    }
}

/// Render JSON body extraction failures in the same shape as engine errors.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    warn!(error = %err, "rejected compute payload");
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: err.to_string(),
        kind: "InvalidPayload".to_string(),
    });
    error::InternalError::from_response(err, response).into()
}
