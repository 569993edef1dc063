// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::compute::{process_compute, ComputeSettings};
use crate::error::{json_error_handler, ApiError};
use crate::questions::random_question;
use crate::types::{ComputeRequest, HealthResponse, QuestionResponse};
use actix_web::{web, HttpResponse, Result as ActixResult};
use pws_engine::ContributionError;
use tracing::{error, warn};

pub fn setup_routes(config: &mut web::ServiceConfig) {
    config
        .service(
            web::resource("/compute")
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route(web::post().to(handle_compute)),
        )
        .route("/question", web::get().to(handle_question))
        .route("/health", web::get().to(handle_health_check))
        .route("/health", web::head().to(handle_health_check));
}

/// Compute `c_i^w_i mod n^2` for every element of the request.
///
/// The exponentiations are CPU bound and run on the blocking pool.
async fn handle_compute(
    settings: web::Data<ComputeSettings>,
    req: web::Json<ComputeRequest>,
) -> Result<HttpResponse, ApiError> {
    let settings = settings.into_inner();
    let request = req.into_inner();

    let outcome = web::block(move || process_compute(&settings, request))
        .await
        .map_err(|e| {
            error!(error = %e, "compute worker failed");
            ContributionError::InternalArithmeticFailure(e.to_string())
        })?;

    match outcome {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "compute request rejected");
            Err(err.into())
        }
    }
}

async fn handle_question() -> ActixResult<HttpResponse> {
    let question = random_question(&mut rand::thread_rng());
    Ok(HttpResponse::Ok().json(QuestionResponse {
        question: question.to_string(),
    }))
}

async fn handle_health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    }))
}
