//! Decimal <-> field element conversions.
//!
//! snarkjs and circom exchange every field element as a base-10 string. These helpers
//! are strict: only ASCII digits are accepted and values must already be reduced, so
//! two different strings never decode to the same element.

use ark_ff::PrimeField;
use num_bigint::BigUint;

/// Parse an unsigned base-10 integer (digits only, no sign or whitespace).
pub fn parse_decimal(s: &str) -> Option<BigUint> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(s.as_bytes(), 10)
}

/// The field modulus as an arbitrary-precision integer.
pub fn modulus<F: PrimeField>() -> BigUint {
    F::MODULUS.into()
}

/// Parse a canonical decimal field element. Values `>= p` are rejected, not reduced.
pub fn parse_field<F: PrimeField>(s: &str) -> Option<F> {
    let value = parse_decimal(s)?;
    if value >= modulus::<F>() {
        return None;
    }
    Some(F::from(value))
}

/// Render a field element as its canonical decimal string.
pub fn field_to_decimal<F: PrimeField>(x: &F) -> String {
    let value: BigUint = x.into_bigint().into();
    value.to_string()
}
