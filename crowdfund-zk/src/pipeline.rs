//! Fresh-proof orchestration and standalone verification.
//!
//! Fresh proofs run strictly in order:
//! `Received -> Normalized -> Committed -> Assembled -> Proved -> ConsistencyChecked -> Verified`.
//! The first failing stage aborts the request. Nothing is retried: every stage is
//! deterministic apart from the one-time randomness draw.

use crate::commitment::{compute_commitments, CommitmentHasher};
use crate::consistency::check_consistency;
use crate::error::ZkError;
use crate::field::{field_to_decimal, parse_field};
use crate::normalize::normalize_donors;
use crate::snarkjs::SnarkjsProof;
use crate::types::{ProofArtifact, ProofRecord, PublicOutputs, RawDonor, VerificationOutcome, WitnessInput};
use ark_bn254::Fr;
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use tracing::debug;

/// Produces a proof for a witness under the fixed circuit and proving key.
pub trait Prover: Send + Sync {
    fn prove(&self, input: &WitnessInput) -> Result<ProofArtifact, ZkError>;
}

/// Checks a proof against public signals under the fixed verification key.
pub trait Verifier: Send + Sync {
    fn verify(&self, proof: &SnarkjsProof, public_signals: &[String]) -> Result<bool, ZkError>;
}

#[derive(Clone)]
pub struct ProofOrchestrator {
    hasher: Arc<CommitmentHasher>,
    prover: Arc<dyn Prover>,
    verifier: Arc<dyn Verifier>,
}

impl ProofOrchestrator {
    pub fn new(hasher: Arc<CommitmentHasher>, prover: Arc<dyn Prover>, verifier: Arc<dyn Verifier>) -> Self {
        Self { hasher, prover, verifier }
    }

    /// Run the full pipeline for one request.
    ///
    /// Public signals that disagree with the locally computed total/commitments are
    /// rejected before the verifier is called.
    pub fn generate<R: RngCore + CryptoRng>(&self, raw: &[Option<RawDonor>], rng: &mut R) -> Result<ProofRecord, ZkError> {
        let donors = normalize_donors(raw, rng)?;
        debug!(stage = "normalized", donors = donors.donors().len());

        let set = compute_commitments(&self.hasher, &donors)?;
        debug!(stage = "committed", total = %set.total);

        let input = WitnessInput::from_parts(&donors, &set)?;
        debug!(stage = "assembled");

        let artifact = self.prover.prove(&input)?;
        debug!(stage = "proved", public_signals = artifact.public_signals.len());

        let public = check_consistency(&input, &artifact.public_signals)?;
        debug!(stage = "consistency_checked");

        let verified = self.verifier.verify(&artifact.proof, &artifact.public_signals)?;
        debug!(stage = "verified", verified);

        Ok(ProofRecord {
            total: input.total.clone(),
            commitments: input.commitments.clone(),
            donors,
            input,
            artifact,
            outcome: VerificationOutcome { verified, public },
        })
    }
}

/// Verifies `(proof, publicSignals)` pairs supplied by anyone.
///
/// The trust boundary is only "this proof is valid for these declared public values";
/// there is no donor data to cross-check against here.
#[derive(Clone)]
pub struct VerificationGateway {
    verifier: Arc<dyn Verifier>,
}

impl VerificationGateway {
    pub fn new(verifier: Arc<dyn Verifier>) -> Self {
        Self { verifier }
    }

    pub fn verify(&self, proof: &SnarkjsProof, public_signals: &[String]) -> Result<VerificationOutcome, ZkError> {
        if public_signals.is_empty() {
            return Err(ZkError::EmptyPublicSignals);
        }

        let signals = public_signals
            .iter()
            .enumerate()
            .map(|(index, s)| {
                parse_field::<Fr>(s)
                    .map(|x| field_to_decimal(&x))
                    .ok_or(ZkError::InvalidPublicSignal { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let verified = self.verifier.verify(proof, &signals)?;
        let public = PublicOutputs::from_signals(&signals)?;
        debug!(verified, total = %public.total, "verified external proof");

        Ok(VerificationOutcome { verified, public })
    }
}
