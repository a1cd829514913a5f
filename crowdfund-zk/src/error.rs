use thiserror::Error;

/// Coarse classification used by callers to pick a response policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input. Reported, never retried.
    Validation,
    /// Prover output disagrees with locally derived values. Hard rejection.
    Consistency,
    /// The proving/verification backend failed or returned garbage.
    ExternalTool,
}

#[derive(Debug, Error)]
pub enum ZkError {
    #[error("circuit expects {expected} donors, received {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("donor[{index}] is missing")]
    MissingDonor { index: usize },

    #[error("donor[{index}].amount must be provided")]
    MissingAmount { index: usize },

    #[error("unable to interpret donor[{index}].{field} as a non-negative integer")]
    NotAnInteger { field: &'static str, index: usize },

    #[error("donor[{index}].{field} must be smaller than the BN254 scalar field modulus")]
    OutOfField { field: &'static str, index: usize },

    #[error("total of donor amounts does not fit in the BN254 scalar field")]
    TotalOutOfField,

    #[error("witness arrays disagree in length: {commitments} commitments, {amounts} amounts, {randomness} randomness values")]
    LengthMismatch {
        commitments: usize,
        amounts: usize,
        randomness: usize,
    },

    #[error("publicSignals must contain at least the total")]
    EmptyPublicSignals,

    #[error("publicSignals[{index}] is not a decimal field element")]
    InvalidPublicSignal { index: usize },

    #[error("malformed proof: {0}")]
    MalformedProof(String),

    #[error("unexpected public signals length returned by prover: expected {expected} commitments, got {got}")]
    PublicSignalLengthMismatch { expected: usize, got: usize },

    #[error("public signals do not match computed values ({position})")]
    PublicSignalMismatch { position: String },

    #[error("malformed verification key: {0}")]
    MalformedVerifyingKey(String),

    #[error("poseidon error: {0}")]
    Hash(String),

    #[error("prover error: {0}")]
    Prover(String),

    #[error("verifier error: {0}")]
    Verifier(String),
}

impl ZkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZkError::CountMismatch { .. }
            | ZkError::MissingDonor { .. }
            | ZkError::MissingAmount { .. }
            | ZkError::NotAnInteger { .. }
            | ZkError::OutOfField { .. }
            | ZkError::TotalOutOfField
            | ZkError::LengthMismatch { .. }
            | ZkError::EmptyPublicSignals
            | ZkError::InvalidPublicSignal { .. }
            | ZkError::MalformedProof(_) => ErrorKind::Validation,

            ZkError::PublicSignalLengthMismatch { .. } | ZkError::PublicSignalMismatch { .. } => {
                ErrorKind::Consistency
            }

            ZkError::MalformedVerifyingKey(_)
            | ZkError::Hash(_)
            | ZkError::Prover(_)
            | ZkError::Verifier(_) => ErrorKind::ExternalTool,
        }
    }
}
