//! Per-donor Poseidon commitments and the aggregate total.
//!
//! Commitments use the circomlib Poseidon instantiation over BN254::Fr (width 3, x^5
//! S-box), so they match what the `crowdfund_commit` circuit recomputes in-circuit:
//!
//! `commitment_i = Poseidon(amount_i, randomness_i)`

use crate::error::ZkError;
use crate::field::{field_to_decimal, modulus, parse_field};
use crate::types::{CommitmentSet, NormalizedDonorSet};
use ark_bn254::Fr;
use light_poseidon::parameters::bn254_x5::get_poseidon_parameters;
use light_poseidon::{Poseidon, PoseidonHasher, PoseidonParameters};
use num_bigint::BigUint;

/// Poseidon state width for two inputs (rate 2, capacity 1).
const POSEIDON_WIDTH: u8 = 3;

/// Immutable Poseidon handle.
///
/// Parameter loading is done once at startup; the handle is then shared read-only
/// (typically behind an `Arc`) by every request.
pub struct CommitmentHasher {
    params: PoseidonParameters<Fr>,
}

impl CommitmentHasher {
    pub fn new() -> Result<Self, ZkError> {
        let params = get_poseidon_parameters::<Fr>(POSEIDON_WIDTH).map_err(|e| ZkError::Hash(format!("{e}")))?;
        Ok(Self { params })
    }

    /// Poseidon over two field elements.
    pub fn hash_pair(&self, a: Fr, b: Fr) -> Result<Fr, ZkError> {
        // The sponge state lives in the `Poseidon` value, so each hash gets its own,
        // built from the loaded constants rather than re-deriving them.
        let p = &self.params;
        let params = PoseidonParameters::new(p.ark.clone(), p.mds.clone(), p.full_rounds, p.partial_rounds, p.width, p.alpha);
        let mut poseidon = Poseidon::<Fr>::new(params);
        poseidon.hash(&[a, b]).map_err(|e| ZkError::Hash(format!("{e}")))
    }

    /// Commitment to one `(amount, randomness)` pair given as canonical decimals.
    pub fn commit(&self, amount: &str, randomness: &str) -> Result<String, ZkError> {
        let amount = parse_field::<Fr>(amount).ok_or_else(|| ZkError::Hash(format!("amount {amount} is not a field element")))?;
        let randomness = parse_field::<Fr>(randomness)
            .ok_or_else(|| ZkError::Hash(format!("randomness {randomness} is not a field element")))?;
        let hash = self.hash_pair(amount, randomness)?;
        Ok(field_to_decimal(&hash))
    }
}

/// Compute `(total, commitments)` for a donor set.
///
/// This MUST match the circuit's logic: the sum is exact (never reduced) and must
/// itself be a field element, otherwise the circuit's public total would wrap.
pub fn compute_commitments(hasher: &CommitmentHasher, donors: &NormalizedDonorSet) -> Result<CommitmentSet, ZkError> {
    let mut total = BigUint::from(0u8);
    let mut commitments = Vec::with_capacity(donors.donors().len());

    for donor in donors.donors() {
        let amount = BigUint::parse_bytes(donor.amount.as_bytes(), 10)
            .ok_or_else(|| ZkError::Hash(format!("amount {} is not canonical", donor.amount)))?;
        total += amount;
        commitments.push(hasher.commit(&donor.amount, &donor.randomness)?);
    }

    if total >= modulus::<Fr>() {
        return Err(ZkError::TotalOutOfField);
    }

    Ok(CommitmentSet { total, commitments })
}
