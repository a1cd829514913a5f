//! Native Groth16 verification of snarkjs proofs.
//!
//! The verification key is parsed and prepared once; `verify` only does the pairing
//! check, so a single verifier can be shared across concurrent requests.

use crate::error::ZkError;
use crate::field::parse_field;
use crate::pipeline::Verifier;
use crate::snarkjs::{SnarkjsProof, SnarkjsVerifyingKey};
use ark_bn254::{Bn254, Fr};
use ark_groth16::{prepare_verifying_key, Groth16, PreparedVerifyingKey};

pub struct Groth16Verifier {
    key: SnarkjsVerifyingKey,
    pvk: PreparedVerifyingKey<Bn254>,
}

impl Groth16Verifier {
    pub fn from_snarkjs(key: SnarkjsVerifyingKey) -> Result<Self, ZkError> {
        let vk = key.to_ark().map_err(ZkError::MalformedVerifyingKey)?;
        let pvk = prepare_verifying_key(&vk);
        Ok(Self { key, pvk })
    }

    /// Parse a `verification_key.json` document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ZkError> {
        let key: SnarkjsVerifyingKey =
            serde_json::from_slice(bytes).map_err(|e| ZkError::MalformedVerifyingKey(format!("{e}")))?;
        Self::from_snarkjs(key)
    }

    pub fn key(&self) -> &SnarkjsVerifyingKey {
        &self.key
    }

    /// Number of public signals the key expects.
    pub fn n_public(&self) -> usize {
        self.key.n_public
    }
}

impl Verifier for Groth16Verifier {
    fn verify(&self, proof: &SnarkjsProof, public_signals: &[String]) -> Result<bool, ZkError> {
        let inputs = public_signals
            .iter()
            .enumerate()
            .map(|(index, s)| parse_field::<Fr>(s).ok_or(ZkError::InvalidPublicSignal { index }))
            .collect::<Result<Vec<_>, _>>()?;

        if inputs.len() != self.n_public() {
            tracing::warn!(expected = self.n_public(), got = inputs.len(), "public signal count does not match verification key");
            return Ok(false);
        }

        let proof = proof.to_ark().map_err(ZkError::MalformedProof)?;

        Groth16::<Bn254>::verify_proof(&self.pvk, &proof, &inputs).map_err(|e| ZkError::Verifier(format!("{e}")))
    }
}
