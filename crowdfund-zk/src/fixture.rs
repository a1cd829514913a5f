//! In-process stand-in for the compiled `crowdfund_commit` circuit.
//!
//! The production circuit is compiled by circom and proved by snarkjs. This fixture
//! exposes the same public-input layout (total, then one commitment per donor) and
//! enforces `total = Σ amounts`, so tests can produce and verify real Groth16 proofs
//! without the external toolchain. It does not recompute Poseidon in-circuit.

use crate::constants::DONOR_COUNT;
use crate::error::ZkError;
use crate::field::{field_to_decimal, parse_field};
use crate::pipeline::Prover;
use crate::snarkjs::{SnarkjsProof, SnarkjsVerifyingKey};
use crate::types::{ProofArtifact, WitnessInput};
use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, ProvingKey, VerifyingKey};
use ark_r1cs_std::prelude::*;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

#[derive(Clone, Debug)]
pub struct CrowdfundFixtureCircuit {
    /// Public total.
    pub total: Fr,
    /// Public commitments, one per donor.
    pub commitments: Vec<Fr>,
    /// Private amounts.
    pub amounts: Vec<Fr>,
}

impl CrowdfundFixtureCircuit {
    fn blank() -> Self {
        Self {
            total: Fr::from(0u64),
            commitments: vec![Fr::from(0u64); DONOR_COUNT],
            amounts: vec![Fr::from(0u64); DONOR_COUNT],
        }
    }
}

impl ConstraintSynthesizer<Fr> for CrowdfundFixtureCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        if self.commitments.len() != DONOR_COUNT || self.amounts.len() != DONOR_COUNT {
            return Err(SynthesisError::Unsatisfiable);
        }

        // Public input ordering MUST match the snarkjs public signal layout.
        let total = FpVar::<Fr>::new_input(cs.clone(), || Ok(self.total))?;
        let _commitments = self
            .commitments
            .into_iter()
            .map(|c| FpVar::<Fr>::new_input(cs.clone(), || Ok(c)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sum = FpVar::<Fr>::zero();
        for a in self.amounts {
            sum += FpVar::<Fr>::new_witness(cs.clone(), || Ok(a))?;
        }
        sum.enforce_equal(&total)?;

        Ok(())
    }
}

pub struct FixtureKeys {
    pub pk: ProvingKey<Bn254>,
    pub vk: VerifyingKey<Bn254>,
}

impl FixtureKeys {
    pub fn verification_key_json(&self) -> SnarkjsVerifyingKey {
        SnarkjsVerifyingKey::from_ark(&self.vk)
    }
}

/// Circuit-specific setup for the fixture circuit.
pub fn setup<R: RngCore + CryptoRng>(rng: &mut R) -> Result<FixtureKeys, ZkError> {
    let pk = Groth16::<Bn254>::generate_random_parameters_with_reduction(CrowdfundFixtureCircuit::blank(), rng)
        .map_err(|e| ZkError::Prover(format!("{e}")))?;
    let vk = pk.vk.clone();
    Ok(FixtureKeys { pk, vk })
}

/// Proves witnesses against the fixture circuit, returning snarkjs-shaped output.
pub struct FixtureProver {
    keys: FixtureKeys,
}

impl FixtureProver {
    pub fn new(keys: FixtureKeys) -> Self {
        Self { keys }
    }

    pub fn verification_key_json(&self) -> SnarkjsVerifyingKey {
        self.keys.verification_key_json()
    }
}

fn witness_field(s: &str) -> Result<Fr, ZkError> {
    parse_field::<Fr>(s).ok_or_else(|| ZkError::Prover(format!("{s} is not a field element")))
}

impl Prover for FixtureProver {
    fn prove(&self, input: &WitnessInput) -> Result<ProofArtifact, ZkError> {
        let total = witness_field(&input.total)?;
        let commitments = input.commitments.iter().map(|c| witness_field(c)).collect::<Result<Vec<_>, _>>()?;
        let amounts = input.amounts.iter().map(|a| witness_field(a)).collect::<Result<Vec<_>, _>>()?;

        let public_signals = std::iter::once(&total)
            .chain(&commitments)
            .map(field_to_decimal)
            .collect();

        let circuit = CrowdfundFixtureCircuit { total, commitments, amounts };
        let proof = Groth16::<Bn254>::create_random_proof_with_reduction(circuit, &self.keys.pk, &mut OsRng)
            .map_err(|e| ZkError::Prover(format!("{e}")))?;

        Ok(ProofArtifact {
            proof: SnarkjsProof::from_ark(&proof),
            public_signals,
        })
    }
}
