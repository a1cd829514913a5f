//! Commitment/consistency core for the confidential crowdfunding ledger.
//!
//! This crate contains:
//! - Donor input normalization and circom-compatible Poseidon commitments.
//! - Witness assembly for the external `crowdfund_commit` circuit.
//! - Cross-validation of prover public signals against locally derived values.
//! - A native Groth16 verifier for snarkjs proof/key JSON.
//! - The proof orchestrator and the standalone verification gateway.

pub mod commitment;
pub mod consistency;
pub mod constants;
pub mod error;
pub mod field;
pub mod groth16;
pub mod normalize;
pub mod pipeline;
pub mod snarkjs;
pub mod types;
pub mod witness;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixture;

pub use error::{ErrorKind, ZkError};
