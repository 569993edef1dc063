// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Wire types. Big integers travel as decimal strings to avoid precision loss
//! in JSON clients.

use pws_engine::{ContributionResult, TraceEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyPayload {
    pub n: String,
    pub g: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    pub public_key: PublicKeyPayload,
    pub encrypted_features: Vec<String>,
    pub weights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugEntry {
    pub index: usize,
    pub c_i: String,
    pub w_i: String,
    #[serde(rename = "encryptedContribution_i")]
    pub encrypted_contribution_i: String,
}

impl From<&TraceEntry> for DebugEntry {
    fn from(entry: &TraceEntry) -> Self {
        Self {
            index: entry.index,
            c_i: entry.ciphertext.to_string(),
            w_i: entry.weight.to_string(),
            encrypted_contribution_i: entry.contribution.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    pub encrypted_contributions: Vec<String>,
    /// Empty when the trace is not included in responses
    pub debug: Vec<DebugEntry>,
}

impl From<ContributionResult> for ComputeResponse {
    fn from(result: ContributionResult) -> Self {
        Self {
            encrypted_contributions: result
                .contributions
                .iter()
                .map(ToString::to_string)
                .collect(),
            debug: result
                .trace
                .unwrap_or_default()
                .iter()
                .map(DebugEntry::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
