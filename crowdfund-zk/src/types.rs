//! Types shared between the pipeline stages and the wire layer.

use crate::constants::{DONOR_COUNT, SAMPLE_DONORS};
use crate::error::ZkError;
use crate::snarkjs::SnarkjsProof;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One donor as submitted by a caller.
///
/// Values may arrive as JSON strings or numbers; `null` and missing are equivalent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawDonor {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub randomness: Option<Value>,
}

impl RawDonor {
    pub fn new(amount: impl Into<String>, randomness: Option<String>) -> Self {
        Self {
            amount: Some(Value::String(amount.into())),
            randomness: randomness.map(Value::String),
        }
    }
}

/// A donor after normalization: both fields are canonical decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDonor {
    pub amount: String,
    pub randomness: String,
}

/// Exactly `DONOR_COUNT` normalized donors, in submission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedDonorSet(Vec<NormalizedDonor>);

impl NormalizedDonorSet {
    pub(crate) fn new(donors: Vec<NormalizedDonor>) -> Result<Self, ZkError> {
        if donors.len() != DONOR_COUNT {
            return Err(ZkError::CountMismatch { expected: DONOR_COUNT, got: donors.len() });
        }
        Ok(Self(donors))
    }

    /// The sample donor set shown in the UI and written by `compute-inputs`.
    pub fn sample() -> Self {
        Self(sample_donors())
    }

    pub fn donors(&self) -> &[NormalizedDonor] {
        &self.0
    }

    pub fn amounts(&self) -> Vec<String> {
        self.0.iter().map(|d| d.amount.clone()).collect()
    }

    pub fn randomness(&self) -> Vec<String> {
        self.0.iter().map(|d| d.randomness.clone()).collect()
    }

    pub fn into_inner(self) -> Vec<NormalizedDonor> {
        self.0
    }
}

pub fn sample_donors() -> Vec<NormalizedDonor> {
    SAMPLE_DONORS
        .iter()
        .map(|(amount, randomness)| NormalizedDonor {
            amount: amount.to_string(),
            randomness: randomness.to_string(),
        })
        .collect()
}

/// Locally derived commitments and total for one donor set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitmentSet {
    pub total: BigUint,
    pub commitments: Vec<String>,
}

/// Witness input handed to the prover.
///
/// Field names and ordering are a fixed contract with the `crowdfund_commit` circuit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessInput {
    pub total: String,
    pub commitments: Vec<String>,
    pub amounts: Vec<String>,
    pub randomness: Vec<String>,
}

/// Proof plus the public signals it discloses, exactly as the prover returned them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofArtifact {
    pub proof: SnarkjsProof,
    pub public_signals: Vec<String>,
}

/// Named view over the positional public signals: `[total, commitment_0, ..]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicOutputs {
    pub total: String,
    pub commitments: Vec<String>,
}

impl PublicOutputs {
    pub fn from_signals(signals: &[String]) -> Result<Self, ZkError> {
        let (total, commitments) = signals.split_first().ok_or(ZkError::EmptyPublicSignals)?;
        Ok(Self {
            total: total.clone(),
            commitments: commitments.to_vec(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub verified: bool,
    pub public: PublicOutputs,
}

/// Everything produced while serving one fresh-proof request.
#[derive(Clone, Debug)]
pub struct ProofRecord {
    pub donors: NormalizedDonorSet,
    pub total: String,
    pub commitments: Vec<String>,
    pub input: WitnessInput,
    pub artifact: ProofArtifact,
    pub outcome: VerificationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_outputs_split_total_from_commitments() {
        let signals: Vec<String> = ["50", "1", "2", "3", "4"].iter().map(|s| s.to_string()).collect();
        let public = PublicOutputs::from_signals(&signals).unwrap();
        assert_eq!(public.total, "50");
        assert_eq!(public.commitments, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn public_outputs_require_a_total() {
        assert!(matches!(PublicOutputs::from_signals(&[]), Err(ZkError::EmptyPublicSignals)));
    }

    #[test]
    fn donor_set_rejects_wrong_length() {
        let mut donors = sample_donors();
        donors.pop();
        assert!(matches!(
            NormalizedDonorSet::new(donors),
            Err(ZkError::CountMismatch { expected: DONOR_COUNT, got: 3 })
        ));
    }
}
