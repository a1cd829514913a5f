//! Process configuration, read once from the environment at startup.

use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CIRCUIT_WASM: &str = "build/crowdfund_commit_js/crowdfund_commit.wasm";
pub const DEFAULT_PROVING_KEY: &str = "keys/crowdfund_commit_final.zkey";
pub const DEFAULT_VERIFICATION_KEY: &str = "keys/verification_key.json";
pub const DEFAULT_SNARKJS_BIN: &str = "snarkjs";
pub const DEFAULT_WORK_DIR: &str = "data/proofs";
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Listen address (`BACKEND_ADDR`).
    pub addr: String,
    /// Compiled circuit (`CIRCUIT_WASM`).
    pub circuit_wasm: PathBuf,
    /// Final zkey from the setup ceremony (`PROVING_KEY`).
    pub proving_key: PathBuf,
    /// snarkjs `verification_key.json` (`VERIFICATION_KEY`).
    pub verification_key: PathBuf,
    /// snarkjs executable (`SNARKJS_BIN`).
    pub snarkjs_bin: String,
    /// Scratch space for per-request prover files (`WORK_DIR`).
    pub work_dir: PathBuf,
    /// Optional UI assets (`STATIC_DIR`); only served if the directory exists.
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            addr: get("BACKEND_ADDR", DEFAULT_ADDR),
            circuit_wasm: get("CIRCUIT_WASM", DEFAULT_CIRCUIT_WASM).into(),
            proving_key: get("PROVING_KEY", DEFAULT_PROVING_KEY).into(),
            verification_key: get("VERIFICATION_KEY", DEFAULT_VERIFICATION_KEY).into(),
            snarkjs_bin: get("SNARKJS_BIN", DEFAULT_SNARKJS_BIN),
            work_dir: get("WORK_DIR", DEFAULT_WORK_DIR).into(),
            static_dir: get("STATIC_DIR", DEFAULT_STATIC_DIR).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let env = HashMap::from([("PROVING_KEY", "  "), ("BACKEND_ADDR", "0.0.0.0:9000")]);
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.proving_key, PathBuf::from(DEFAULT_PROVING_KEY));
        assert_eq!(config.verification_key, PathBuf::from(DEFAULT_VERIFICATION_KEY));
        assert_eq!(config.snarkjs_bin, "snarkjs");
    }
}
