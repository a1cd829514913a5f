//! snarkjs subprocess prover.
//!
//! Witness generation needs the circom-compiled wasm, so proving is delegated to
//! `snarkjs groth16 fullprove`. Each request gets its own scratch directory which is
//! removed afterwards whether or not proving succeeded.

use crate::config::AppConfig;
use crowdfund_zk::pipeline::Prover;
use crowdfund_zk::snarkjs::SnarkjsProof;
use crowdfund_zk::types::{ProofArtifact, WitnessInput};
use crowdfund_zk::ZkError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct SnarkjsProver {
    snarkjs_bin: String,
    circuit_wasm: PathBuf,
    proving_key: PathBuf,
    work_dir: PathBuf,
}

impl SnarkjsProver {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            snarkjs_bin: config.snarkjs_bin.clone(),
            circuit_wasm: config.circuit_wasm.clone(),
            proving_key: config.proving_key.clone(),
            work_dir: config.work_dir.clone(),
        }
    }

    fn prove_in(&self, dir: &Path, input: &WitnessInput) -> Result<ProofArtifact, ZkError> {
        let input_path = dir.join("input.json");
        let proof_path = dir.join("proof.json");
        let public_path = dir.join("public.json");

        let input_json = serde_json::to_vec_pretty(input).map_err(|e| ZkError::Prover(format!("encode input: {e}")))?;
        std::fs::write(&input_path, input_json).map_err(|e| ZkError::Prover(format!("write input: {e}")))?;

        let output = Command::new(&self.snarkjs_bin)
            .args(["groth16", "fullprove"])
            .arg(&input_path)
            .arg(&self.circuit_wasm)
            .arg(&self.proving_key)
            .arg(&proof_path)
            .arg(&public_path)
            .output()
            .map_err(|e| ZkError::Prover(format!("failed to run {}: {e}", self.snarkjs_bin)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ZkError::Prover(format!("snarkjs exited with {}: {}", output.status, stderr.trim())));
        }

        let proof: SnarkjsProof = read_json(&proof_path)?;
        let public_signals: Vec<String> = read_json(&public_path)?;

        Ok(ProofArtifact { proof, public_signals })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ZkError> {
    let bytes = std::fs::read(path).map_err(|e| ZkError::Prover(format!("read {}: {e}", path.display())))?;
    serde_json::from_slice(&bytes).map_err(|e| ZkError::Prover(format!("parse {}: {e}", path.display())))
}

impl Prover for SnarkjsProver {
    fn prove(&self, input: &WitnessInput) -> Result<ProofArtifact, ZkError> {
        let dir = self.work_dir.join(Uuid::new_v4().to_string());
        std::fs::create_dir_all(&dir).map_err(|e| ZkError::Prover(format!("create {}: {e}", dir.display())))?;

        debug!(dir = %dir.display(), "running snarkjs fullprove");
        let result = self.prove_in(&dir, input);

        if let Err(e) = std::fs::remove_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "failed to clean prover scratch directory");
        }

        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crowdfund_zk::commitment::{compute_commitments, CommitmentHasher};
    use crowdfund_zk::types::NormalizedDonorSet;
    use std::os::unix::fs::PermissionsExt;

    const FAKE_PROOF: &str = r#"{"pi_a":["1","2","1"],"pi_b":[["1","0"],["1","0"],["1","0"]],"pi_c":["1","2","1"],"protocol":"groth16","curve":"bn128"}"#;

    struct Sandbox {
        root: PathBuf,
    }

    impl Sandbox {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("crowdfund-prover-{}", Uuid::new_v4()));
            std::fs::create_dir_all(&root).unwrap();
            Self { root }
        }

        /// Install a stand-in `snarkjs` that runs `body` with the real CLI's arguments.
        fn script(&self, body: &str) -> String {
            let path = self.root.join("snarkjs");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        fn prover(&self, snarkjs_bin: String) -> SnarkjsProver {
            SnarkjsProver {
                snarkjs_bin,
                circuit_wasm: self.root.join("circuit.wasm"),
                proving_key: self.root.join("final.zkey"),
                work_dir: self.root.join("work"),
            }
        }

        fn work_dir_is_empty(&self) -> bool {
            std::fs::read_dir(self.root.join("work")).unwrap().next().is_none()
        }
    }

    impl Drop for Sandbox {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    fn sample_input() -> WitnessInput {
        let hasher = CommitmentHasher::new().unwrap();
        let donors = NormalizedDonorSet::sample();
        WitnessInput::from_parts(&donors, &compute_commitments(&hasher, &donors).unwrap()).unwrap()
    }

    #[test]
    fn reads_snarkjs_outputs_and_cleans_up() {
        let sandbox = Sandbox::new();
        // $3 = input.json, $6 = proof.json, $7 = public.json
        let bin = sandbox.script(&format!(
            "[ \"$1 $2\" = \"groth16 fullprove\" ] || exit 2\n\
             grep -q '\"total\": \"50\"' \"$3\" || exit 3\n\
             printf '%s' '{FAKE_PROOF}' > \"$6\"\n\
             printf '%s' '[\"50\",\"1\",\"2\",\"3\",\"4\"]' > \"$7\""
        ));

        let artifact = sandbox.prover(bin).prove(&sample_input()).unwrap();
        assert_eq!(artifact.public_signals, vec!["50", "1", "2", "3", "4"]);
        assert_eq!(artifact.proof.pi_a, vec!["1", "2", "1"]);
        assert!(sandbox.work_dir_is_empty());
    }

    #[test]
    fn reports_non_zero_exit() {
        let sandbox = Sandbox::new();
        let bin = sandbox.script("echo 'witness generation failed' >&2\nexit 1");

        let err = sandbox.prover(bin).prove(&sample_input()).unwrap_err();
        assert!(matches!(err, ZkError::Prover(ref msg) if msg.contains("witness generation failed")));
        assert!(sandbox.work_dir_is_empty());
    }

    #[test]
    fn reports_missing_binary() {
        let sandbox = Sandbox::new();
        let prover = sandbox.prover(sandbox.root.join("does-not-exist").to_string_lossy().into_owned());
        assert!(matches!(prover.prove(&sample_input()), Err(ZkError::Prover(_))));
    }
}
