use crate::config::AppConfig;
use crate::errors::StartupError;
use crate::prover::SnarkjsProver;
use crowdfund_zk::commitment::CommitmentHasher;
use crowdfund_zk::groth16::Groth16Verifier;
use crowdfund_zk::pipeline::{ProofOrchestrator, Prover, VerificationGateway};
use crowdfund_zk::snarkjs::SnarkjsVerifyingKey;
use std::path::Path;
use std::sync::Arc;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: ProofOrchestrator,
    pub gateway: VerificationGateway,
    verifier: Arc<Groth16Verifier>,
}

impl AppState {
    pub fn new(hasher: Arc<CommitmentHasher>, prover: Arc<dyn Prover>, verifier: Arc<Groth16Verifier>) -> Self {
        Self {
            orchestrator: ProofOrchestrator::new(hasher, prover, verifier.clone()),
            gateway: VerificationGateway::new(verifier.clone()),
            verifier,
        }
    }

    /// Check the proving artifacts and build every process-wide resource.
    ///
    /// Runs before the listener is bound; any failure is fatal.
    pub async fn load(config: &AppConfig) -> Result<Self, StartupError> {
        ensure_artifact(&config.circuit_wasm, "circuit wasm")?;
        ensure_artifact(&config.proving_key, "final zkey")?;
        ensure_artifact(&config.verification_key, "verification key")?;

        let vk_path = config.verification_key.clone();
        let (hasher, verifier) = tokio::task::spawn_blocking(move || {
            let vk_bytes = std::fs::read(&vk_path).map_err(|source| StartupError::Io { path: vk_path.clone(), source })?;
            let verifier =
                Groth16Verifier::from_json(&vk_bytes).map_err(|e| StartupError::InvalidVerificationKey(e.to_string()))?;
            let hasher = CommitmentHasher::new().map_err(|e| StartupError::Hasher(e.to_string()))?;
            Ok::<_, StartupError>((hasher, verifier))
        })
        .await
        .map_err(|_| StartupError::Join)??;

        tracing::info!(n_public = verifier.n_public(), "verification key loaded");

        let prover = SnarkjsProver::new(config);
        Ok(Self::new(Arc::new(hasher), Arc::new(prover), Arc::new(verifier)))
    }

    pub fn verification_key(&self) -> &SnarkjsVerifyingKey {
        self.verifier.key()
    }
}

fn ensure_artifact(path: &Path, label: &'static str) -> Result<(), StartupError> {
    if !path.exists() {
        return Err(StartupError::MissingArtifact { label, path: path.to_path_buf() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_in(root: &Path) -> AppConfig {
        AppConfig {
            addr: "127.0.0.1:0".to_string(),
            circuit_wasm: root.join("crowdfund_commit.wasm"),
            proving_key: root.join("crowdfund_commit_final.zkey"),
            verification_key: root.join("verification_key.json"),
            snarkjs_bin: "snarkjs".to_string(),
            work_dir: root.join("work"),
            static_dir: root.join("public"),
        }
    }

    fn temp_root() -> PathBuf {
        let root = std::env::temp_dir().join(format!("crowdfund-state-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    #[tokio::test]
    async fn missing_artifacts_are_fatal() {
        let root = temp_root();
        let config = config_in(&root);

        let err = AppState::load(&config).await.err().unwrap();
        assert!(matches!(err, StartupError::MissingArtifact { label: "circuit wasm", .. }));

        std::fs::write(&config.circuit_wasm, b"wasm").unwrap();
        std::fs::write(&config.proving_key, b"zkey").unwrap();
        let err = AppState::load(&config).await.err().unwrap();
        assert!(matches!(err, StartupError::MissingArtifact { label: "verification key", .. }));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn malformed_verification_key_is_fatal() {
        let root = temp_root();
        let config = config_in(&root);
        std::fs::write(&config.circuit_wasm, b"wasm").unwrap();
        std::fs::write(&config.proving_key, b"zkey").unwrap();
        std::fs::write(&config.verification_key, b"{\"protocol\":\"groth16\"}").unwrap();

        let err = AppState::load(&config).await.err().unwrap();
        assert!(matches!(err, StartupError::InvalidVerificationKey(_)));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
