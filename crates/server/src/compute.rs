// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::types::{ComputeRequest, ComputeResponse};
use pws_config::AppConfig;
use pws_engine::{
    ContributionEngine, ContributionError, ContributionRequest, PublicKeyContext, TracingSink,
};
use tracing::info;

/// Engine configuration shared by every request a server handles
#[derive(Clone, Default)]
pub struct ComputeSettings {
    engine: ContributionEngine,
}

impl ComputeSettings {
    pub fn new(engine: ContributionEngine) -> Self {
        Self { engine }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut engine = ContributionEngine::new()
            .with_trace(config.trace().include_in_response)
            .with_parallel(config.engine().parallel, Some(config.engine().batch_size));
        if config.trace().log {
            engine = engine.with_sink(TracingSink);
        }
        Self { engine }
    }

    pub fn engine(&self) -> &ContributionEngine {
        &self.engine
    }
}

/// Marshal a wire request into the engine and the result back out.
///
/// All parsing happens before any exponentiation; a bad entry anywhere
/// rejects the request without computing anything.
pub fn process_compute(
    settings: &ComputeSettings,
    request: ComputeRequest,
) -> Result<ComputeResponse, ContributionError> {
    let context = PublicKeyContext::from_decimal(&request.public_key.n, &request.public_key.g)?;
    let contribution_request = ContributionRequest::from_decimal(
        request.encrypted_features.as_slice(),
        request.weights.as_slice(),
    )?;

    let result = settings.engine.compute(&context, &contribution_request)?;
    info!(
        elements = result.contributions.len(),
        n_bits = context.n().bits(),
        "computed encrypted contributions"
    );

    Ok(result.into())
}
