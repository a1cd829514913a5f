//! snarkjs JSON encodings of Groth16 proofs and verification keys over BN254.
//!
//! snarkjs writes curve points in (normalized) projective form with decimal
//! coordinates: G1 as `[x, y, z]` and G2 as `[[x.c0, x.c1], [y.c0, y.c1], [z.c0, z.c1]]`,
//! with `z = 1` for finite points and `z = 0` for the point at infinity.

use crate::field::{field_to_decimal, parse_field};
use ark_bn254::{Bn254, Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_groth16::{Proof, VerifyingKey};
use serde::{Deserialize, Serialize};

pub const PROTOCOL: &str = "groth16";
/// snarkjs' name for BN254.
pub const CURVE: &str = "bn128";

fn default_protocol() -> String {
    PROTOCOL.to_string()
}

fn default_curve() -> String {
    CURVE.to_string()
}

/// Groth16 proof as emitted by `snarkjs groth16 prove|fullprove`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsProof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default = "default_curve")]
    pub curve: String,
}

/// `verification_key.json` as exported by `snarkjs zkey export verificationkey`.
///
/// `vk_alphabeta_12` is ignored; it is a precomputed pairing arkworks derives itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsVerifyingKey {
    pub protocol: String,
    pub curve: String,
    #[serde(rename = "nPublic")]
    pub n_public: usize,
    pub vk_alpha_1: Vec<String>,
    pub vk_beta_2: Vec<Vec<String>>,
    pub vk_gamma_2: Vec<Vec<String>>,
    pub vk_delta_2: Vec<Vec<String>>,
    #[serde(rename = "IC")]
    pub ic: Vec<Vec<String>>,
}

impl SnarkjsProof {
    pub fn to_ark(&self) -> Result<Proof<Bn254>, String> {
        check_tags(&self.protocol, &self.curve)?;
        Ok(Proof {
            a: parse_g1(&self.pi_a).map_err(|e| format!("pi_a: {e}"))?,
            b: parse_g2(&self.pi_b).map_err(|e| format!("pi_b: {e}"))?,
            c: parse_g1(&self.pi_c).map_err(|e| format!("pi_c: {e}"))?,
        })
    }

    pub fn from_ark(proof: &Proof<Bn254>) -> Self {
        Self {
            pi_a: g1_to_json(&proof.a),
            pi_b: g2_to_json(&proof.b),
            pi_c: g1_to_json(&proof.c),
            protocol: default_protocol(),
            curve: default_curve(),
        }
    }
}

impl SnarkjsVerifyingKey {
    pub fn to_ark(&self) -> Result<VerifyingKey<Bn254>, String> {
        check_tags(&self.protocol, &self.curve)?;
        if self.ic.len() != self.n_public + 1 {
            return Err(format!("IC has {} points but nPublic is {}", self.ic.len(), self.n_public));
        }

        let gamma_abc_g1 = self
            .ic
            .iter()
            .enumerate()
            .map(|(i, p)| parse_g1(p).map_err(|e| format!("IC[{i}]: {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VerifyingKey {
            alpha_g1: parse_g1(&self.vk_alpha_1).map_err(|e| format!("vk_alpha_1: {e}"))?,
            beta_g2: parse_g2(&self.vk_beta_2).map_err(|e| format!("vk_beta_2: {e}"))?,
            gamma_g2: parse_g2(&self.vk_gamma_2).map_err(|e| format!("vk_gamma_2: {e}"))?,
            delta_g2: parse_g2(&self.vk_delta_2).map_err(|e| format!("vk_delta_2: {e}"))?,
            gamma_abc_g1,
        })
    }

    pub fn from_ark(vk: &VerifyingKey<Bn254>) -> Self {
        Self {
            protocol: default_protocol(),
            curve: default_curve(),
            n_public: vk.gamma_abc_g1.len().saturating_sub(1),
            vk_alpha_1: g1_to_json(&vk.alpha_g1),
            vk_beta_2: g2_to_json(&vk.beta_g2),
            vk_gamma_2: g2_to_json(&vk.gamma_g2),
            vk_delta_2: g2_to_json(&vk.delta_g2),
            ic: vk.gamma_abc_g1.iter().map(g1_to_json).collect(),
        }
    }
}

fn check_tags(protocol: &str, curve: &str) -> Result<(), String> {
    if protocol != PROTOCOL {
        return Err(format!("unsupported protocol {protocol:?}"));
    }
    if curve != CURVE && curve != "bn254" {
        return Err(format!("unsupported curve {curve:?}"));
    }
    Ok(())
}

fn fq(s: &str) -> Result<Fq, String> {
    parse_field::<Fq>(s).ok_or_else(|| format!("{s:?} is not a base field element"))
}

fn fq2(pair: &[String]) -> Result<Fq2, String> {
    match pair {
        [c0, c1] => Ok(Fq2::new(fq(c0)?, fq(c1)?)),
        _ => Err(format!("expected 2 coefficients, got {}", pair.len())),
    }
}

fn parse_g1(coords: &[String]) -> Result<G1Affine, String> {
    let [x, y, z] = coords else {
        return Err(format!("expected 3 coordinates, got {}", coords.len()));
    };

    match z.as_str() {
        "0" => return Ok(G1Affine::zero()),
        "1" => {}
        _ => return Err("point is not normalized (z must be 0 or 1)".to_string()),
    }

    let p = G1Affine::new_unchecked(fq(x)?, fq(y)?);
    if !p.is_on_curve() || !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err("point is not on the curve".to_string());
    }
    Ok(p)
}

fn parse_g2(coords: &[Vec<String>]) -> Result<G2Affine, String> {
    let [x, y, z] = coords else {
        return Err(format!("expected 3 coordinates, got {}", coords.len()));
    };

    let z = fq2(z)?;
    if z == Fq2::from(0u64) {
        return Ok(G2Affine::zero());
    }
    if z != Fq2::from(1u64) {
        return Err("point is not normalized (z must be 0 or 1)".to_string());
    }

    let p = G2Affine::new_unchecked(fq2(x)?, fq2(y)?);
    if !p.is_on_curve() || !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err("point is not on the curve or outside the prime-order subgroup".to_string());
    }
    Ok(p)
}

fn g1_to_json(p: &G1Affine) -> Vec<String> {
    if p.infinity {
        return vec!["0".into(), "1".into(), "0".into()];
    }
    vec![field_to_decimal(&p.x), field_to_decimal(&p.y), "1".into()]
}

fn fq2_to_json(x: &Fq2) -> Vec<String> {
    vec![field_to_decimal(&x.c0), field_to_decimal(&x.c1)]
}

fn g2_to_json(p: &G2Affine) -> Vec<Vec<String>> {
    if p.infinity {
        return vec![
            vec!["0".into(), "0".into()],
            vec!["1".into(), "0".into()],
            vec!["0".into(), "0".into()],
        ];
    }
    vec![fq2_to_json(&p.x), fq2_to_json(&p.y), vec!["1".into(), "0".into()]]
}
