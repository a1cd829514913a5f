//! Cross-check of prover output against locally derived values.
//!
//! A syntactically valid proof can still disclose a total or commitments that belong
//! to some other donor set (caller mix-up, prover defect). Such a proof is rejected
//! here, before verification is spent on it and before it can be reported as
//! verified.

use crate::error::ZkError;
use crate::types::{PublicOutputs, WitnessInput};

/// Compare `public_signals` with what `expected` commits to.
///
/// Returns the named public outputs on success.
pub fn check_consistency(expected: &WitnessInput, public_signals: &[String]) -> Result<PublicOutputs, ZkError> {
    let public = PublicOutputs::from_signals(public_signals)?;

    if public.commitments.len() != expected.commitments.len() {
        return Err(ZkError::PublicSignalLengthMismatch {
            expected: expected.commitments.len(),
            got: public.commitments.len(),
        });
    }

    if public.total != expected.total {
        return Err(ZkError::PublicSignalMismatch { position: "total".to_string() });
    }

    if let Some(i) = public
        .commitments
        .iter()
        .zip(&expected.commitments)
        .position(|(got, want)| got != want)
    {
        return Err(ZkError::PublicSignalMismatch { position: format!("commitment[{i}]") });
    }

    Ok(public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::{compute_commitments, CommitmentHasher};
    use crate::types::NormalizedDonorSet;
    use num_bigint::BigUint;

    fn sample_input() -> WitnessInput {
        let hasher = CommitmentHasher::new().unwrap();
        let donors = NormalizedDonorSet::sample();
        let set = compute_commitments(&hasher, &donors).unwrap();
        WitnessInput::from_parts(&donors, &set).unwrap()
    }

    fn bump(decimal: &str) -> String {
        (BigUint::parse_bytes(decimal.as_bytes(), 10).unwrap() + 1u32).to_string()
    }

    #[test]
    fn accepts_matching_signals() {
        let input = sample_input();
        let public = check_consistency(&input, &input.expected_public_signals()).unwrap();
        assert_eq!(public.total, "50");
        assert_eq!(public.commitments, input.commitments);
    }

    #[test]
    fn rejects_total_off_by_one() {
        let input = sample_input();
        let mut signals = input.expected_public_signals();
        signals[0] = bump(&signals[0]);

        let err = check_consistency(&input, &signals).unwrap_err();
        assert!(matches!(err, ZkError::PublicSignalMismatch { ref position } if position == "total"));
    }

    #[test]
    fn rejects_any_commitment_off_by_one() {
        let input = sample_input();
        for i in 0..input.commitments.len() {
            let mut signals = input.expected_public_signals();
            signals[1 + i] = bump(&signals[1 + i]);

            let err = check_consistency(&input, &signals).unwrap_err();
            let want = format!("commitment[{i}]");
            assert!(matches!(err, ZkError::PublicSignalMismatch { ref position } if *position == want));
        }
    }

    #[test]
    fn rejects_reordered_commitments() {
        let input = sample_input();
        let mut signals = input.expected_public_signals();
        signals.swap(1, 2);
        assert!(matches!(
            check_consistency(&input, &signals),
            Err(ZkError::PublicSignalMismatch { .. })
        ));
    }

    #[test]
    fn rejects_wrong_signal_count() {
        let input = sample_input();
        let mut signals = input.expected_public_signals();
        signals.pop();
        assert!(matches!(
            check_consistency(&input, &signals),
            Err(ZkError::PublicSignalLengthMismatch { expected: 4, got: 3 })
        ));

        assert!(matches!(check_consistency(&input, &[]), Err(ZkError::EmptyPublicSignals)));
    }
}
