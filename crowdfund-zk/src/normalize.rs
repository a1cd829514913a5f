//! Donor input validation and canonicalization.

use crate::constants::{DONOR_COUNT, RANDOMNESS_BYTES};
use crate::error::ZkError;
use crate::field::{modulus, parse_decimal};
use crate::types::{NormalizedDonor, NormalizedDonorSet, RawDonor};
use ark_bn254::Fr;
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use serde_json::Value;

/// Validate raw donors and fill in missing randomness.
///
/// The donor count is checked before anything else so a malformed request never
/// reaches the hasher.
pub fn normalize_donors<R: RngCore + CryptoRng>(
    raw: &[Option<RawDonor>],
    rng: &mut R,
) -> Result<NormalizedDonorSet, ZkError> {
    if raw.len() != DONOR_COUNT {
        return Err(ZkError::CountMismatch { expected: DONOR_COUNT, got: raw.len() });
    }

    let p = modulus::<Fr>();
    let mut donors = Vec::with_capacity(DONOR_COUNT);

    for (index, donor) in raw.iter().enumerate() {
        let donor = donor.as_ref().ok_or(ZkError::MissingDonor { index })?;

        let amount = value_text(donor.amount.as_ref(), "amount", index)?
            .ok_or(ZkError::MissingAmount { index })?;
        let amount = canonical_integer(&amount, &p, "amount", index)?;

        let randomness = match value_text(donor.randomness.as_ref(), "randomness", index)? {
            Some(text) => canonical_integer(&text, &p, "randomness", index)?,
            None => generate_randomness(rng),
        };

        donors.push(NormalizedDonor { amount, randomness });
    }

    NormalizedDonorSet::new(donors)
}

/// Fresh blinding value: `RANDOMNESS_BYTES` big-endian bytes as a decimal integer.
pub fn generate_randomness<R: RngCore + CryptoRng>(rng: &mut R) -> String {
    let mut bytes = [0u8; RANDOMNESS_BYTES];
    rng.fill_bytes(&mut bytes);
    BigUint::from_bytes_be(&bytes).to_string()
}

/// Trimmed textual form of a JSON scalar. `None` when absent, null or blank.
///
/// JSON numbers keep their serde_json rendering, so `20.0` and `1e2` are not integers.
fn value_text(value: Option<&Value>, field: &'static str, index: usize) -> Result<Option<String>, ZkError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(ZkError::NotAnInteger { field, index }),
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}

fn canonical_integer(text: &str, p: &BigUint, field: &'static str, index: usize) -> Result<String, ZkError> {
    let value = parse_decimal(text).ok_or(ZkError::NotAnInteger { field, index })?;
    if &value >= p {
        return Err(ZkError::OutOfField { field, index });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use serde_json::json;

    fn donors(values: Value) -> Vec<Option<RawDonor>> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn canonicalizes_strings_and_numbers() {
        let raw = donors(json!([
            { "amount": " 010 ", "randomness": "0099123" },
            { "amount": 20, "randomness": 88412 },
            { "amount": "5", "randomness": "17171" },
            { "amount": "15", "randomness": "55555" },
        ]));

        let set = normalize_donors(&raw, &mut OsRng).unwrap();
        assert_eq!(set.amounts(), vec!["10", "20", "5", "15"]);
        assert_eq!(set.randomness(), vec!["99123", "88412", "17171", "55555"]);
    }

    #[test]
    fn rejects_wrong_count() {
        let raw = donors(json!([{ "amount": "1" }, { "amount": "2" }]));
        let err = normalize_donors(&raw, &mut OsRng).unwrap_err();
        assert!(matches!(err, ZkError::CountMismatch { expected: 4, got: 2 }));
    }

    #[test]
    fn rejects_fractional_or_exponent_json_numbers_even_when_integral() {
        for value in [json!(20.0), json!(1e2)] {
            let raw = donors(json!([
                { "amount": value },
                { "amount": "2" },
                { "amount": "3" },
                { "amount": "4" },
            ]));
            assert!(matches!(
                normalize_donors(&raw, &mut OsRng),
                Err(ZkError::NotAnInteger { field: "amount", index: 0 })
            ));
        }
    }

    #[test]
    fn rejects_missing_or_blank_amount() {
        for amount in [json!(null), json!("   ")] {
            let raw = donors(json!([
                { "amount": "1" },
                { "amount": amount },
                { "amount": "3" },
                { "amount": "4" },
            ]));
            let err = normalize_donors(&raw, &mut OsRng).unwrap_err();
            assert!(matches!(err, ZkError::MissingAmount { index: 1 }));
        }

        let raw = donors(json!([{ "amount": "1" }, {}, { "amount": "3" }, { "amount": "4" }]));
        assert!(matches!(
            normalize_donors(&raw, &mut OsRng),
            Err(ZkError::MissingAmount { index: 1 })
        ));
    }

    #[test]
    fn rejects_null_donor() {
        let raw = donors(json!([{ "amount": "1" }, { "amount": "2" }, null, { "amount": "4" }]));
        assert!(matches!(
            normalize_donors(&raw, &mut OsRng),
            Err(ZkError::MissingDonor { index: 2 })
        ));
    }

    #[test]
    fn rejects_signed_fractional_and_non_scalar_values() {
        let bad = [json!("-5"), json!("+5"), json!("1.5"), json!(2.5), json!(-3), json!(true), json!([1])];
        for value in bad {
            let raw = donors(json!([
                { "amount": value },
                { "amount": "2" },
                { "amount": "3" },
                { "amount": "4" },
            ]));
            let err = normalize_donors(&raw, &mut OsRng).unwrap_err();
            assert!(
                matches!(err, ZkError::NotAnInteger { field: "amount", index: 0 }),
                "unexpected error for {value}: {err}"
            );
        }

        let raw = donors(json!([
            { "amount": "1" },
            { "amount": "2" },
            { "amount": "3", "randomness": "abc" },
            { "amount": "4" },
        ]));
        assert!(matches!(
            normalize_donors(&raw, &mut OsRng),
            Err(ZkError::NotAnInteger { field: "randomness", index: 2 })
        ));
    }

    #[test]
    fn rejects_values_outside_the_field() {
        let p = modulus::<Fr>().to_string();
        let raw = donors(json!([
            { "amount": "1" },
            { "amount": "2", "randomness": p },
            { "amount": "3" },
            { "amount": "4" },
        ]));
        assert!(matches!(
            normalize_donors(&raw, &mut OsRng),
            Err(ZkError::OutOfField { field: "randomness", index: 1 })
        ));
    }

    #[test]
    fn fills_empty_randomness() {
        let raw = donors(json!([
            { "amount": "10", "randomness": "" },
            { "amount": "20", "randomness": null },
            { "amount": "5" },
            { "amount": "15", "randomness": "55555" },
        ]));

        let first = normalize_donors(&raw, &mut OsRng).unwrap();
        let second = normalize_donors(&raw, &mut OsRng).unwrap();

        for donor in &first.donors()[..3] {
            assert!(!donor.randomness.is_empty());
            assert!(parse_decimal(&donor.randomness).is_some());
        }
        assert_eq!(first.donors()[3].randomness, "55555");
        assert_ne!(first.donors()[0].randomness, second.donors()[0].randomness);
    }

    #[test]
    fn generated_randomness_stays_below_128_bits() {
        let limit = BigUint::from(1u8) << (RANDOMNESS_BYTES * 8);
        for _ in 0..32 {
            let r = parse_decimal(&generate_randomness(&mut OsRng)).unwrap();
            assert!(r < limit);
        }
    }
}
