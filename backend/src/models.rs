use crowdfund_zk::snarkjs::SnarkjsProof;
use crowdfund_zk::types::{NormalizedDonor, ProofRecord, RawDonor, VerificationOutcome, WitnessInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub donor_count: usize,
    pub sample_donors: Vec<NormalizedDonor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProofRequest {
    /// Exactly `DONOR_COUNT` entries; validated by the pipeline.
    #[serde(default)]
    pub donors: Option<Vec<Option<RawDonor>>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResponse {
    pub donors: Vec<NormalizedDonor>,
    pub total: String,
    pub commitments: Vec<String>,
    pub public_signals: Vec<String>,
    pub public_total: String,
    pub public_commitments: Vec<String>,
    pub proof: SnarkjsProof,
    pub verified: bool,
    pub input: WitnessInput,
}

impl From<ProofRecord> for ProofResponse {
    fn from(record: ProofRecord) -> Self {
        Self {
            donors: record.donors.into_inner(),
            total: record.total,
            commitments: record.commitments,
            public_signals: record.artifact.public_signals,
            public_total: record.outcome.public.total,
            public_commitments: record.outcome.public.commitments,
            proof: record.artifact.proof,
            verified: record.outcome.verified,
            input: record.input,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub proof: SnarkjsProof,
    /// Decimal numerals, as strings or JSON numbers.
    pub public_signals: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub verified: bool,
    pub public_total: String,
    pub public_commitments: Vec<String>,
}

impl From<VerificationOutcome> for VerifyResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        Self {
            verified: outcome.verified,
            public_total: outcome.public.total,
            public_commitments: outcome.public.commitments,
        }
    }
}

/// Textual form of a public signal. Non-scalar values map to `None`.
pub fn signal_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
