//! Crate-wide constants shared by the host-side pipeline and the circuit contract.

/// Number of donors the compiled circuit is fixed to.
///
/// Changing this requires recompiling the circuit and regenerating both keys.
pub const DONOR_COUNT: usize = 4;

/// Bytes drawn from the OS RNG when a donor leaves randomness empty (128 bits).
pub const RANDOMNESS_BYTES: usize = 16;

/// Public signals per proof: the total followed by one commitment per donor.
pub const PUBLIC_SIGNAL_COUNT: usize = 1 + DONOR_COUNT;

/// Sample donor set served to the UI, as `(amount, randomness)`.
pub const SAMPLE_DONORS: [(u64, u64); DONOR_COUNT] = [
    (10, 99123),
    (20, 88412),
    (5, 17171),
    (15, 55555),
];
