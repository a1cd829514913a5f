//! Witness input assembly.

use crate::error::ZkError;
use crate::types::{CommitmentSet, NormalizedDonorSet, WitnessInput};

/// Package the circuit inputs. All slices must be positionally aligned.
pub fn assemble_witness(
    total: String,
    commitments: Vec<String>,
    amounts: Vec<String>,
    randomness: Vec<String>,
) -> Result<WitnessInput, ZkError> {
    if commitments.len() != amounts.len() || amounts.len() != randomness.len() {
        return Err(ZkError::LengthMismatch {
            commitments: commitments.len(),
            amounts: amounts.len(),
            randomness: randomness.len(),
        });
    }

    Ok(WitnessInput { total, commitments, amounts, randomness })
}

impl WitnessInput {
    pub fn from_parts(donors: &NormalizedDonorSet, set: &CommitmentSet) -> Result<Self, ZkError> {
        assemble_witness(
            set.total.to_string(),
            set.commitments.clone(),
            donors.amounts(),
            donors.randomness(),
        )
    }

    /// Public signals the circuit is expected to disclose for this witness.
    pub fn expected_public_signals(&self) -> Vec<String> {
        std::iter::once(self.total.clone())
            .chain(self.commitments.iter().cloned())
            .collect()
    }
}
