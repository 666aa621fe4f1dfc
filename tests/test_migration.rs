use async_trait::async_trait;
use ethers::abi::Abi;
use ethers::types::{Address, Bytes};
use proxy_deployer::*;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Deploy { contract: String, options: DeployOptions },
    Upgrade { proxy: Address, contract: String, options: DeployOptions },
}

/// Resolver backed by an in-memory map
struct MockArtifacts {
    artifacts: HashMap<String, ContractArtifact>,
}

impl MockArtifacts {
    fn with(names: &[&str]) -> Self {
        let artifacts = names
            .iter()
            .map(|name| {
                let artifact = ContractArtifact::new(*name, Abi::default(), Bytes::from(vec![0x60, 0x80]));
                (name.to_string(), artifact)
            })
            .collect();
        Self { artifacts }
    }
}

impl ArtifactResolver for MockArtifacts {
    fn resolve(&self, name: &str) -> Result<ContractArtifact> {
        self.artifacts
            .get(name)
            .cloned()
            .ok_or_else(|| DeployError::ArtifactNotFound(name.to_string()))
    }
}

/// Deployer that records calls and optionally fails
#[derive(Default)]
struct MockDeployer {
    calls: Mutex<Vec<Call>>,
    fail_with: Option<String>,
}

impl MockDeployer {
    fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(&self, contract: &str, address: Address, kind: ProxyKind) -> Result<DeployedProxy> {
        if let Some(message) = &self.fail_with {
            return Err(DeployError::ContractError(message.clone()));
        }
        Ok(DeployedProxy {
            contract: contract.to_string(),
            address,
            implementation: Address::repeat_byte(0xee),
            kind,
            admin: None,
            tx_hash: None,
        })
    }
}

#[async_trait]
impl ProxyDeployer for MockDeployer {
    async fn deploy_proxy(&self, artifact: &ContractArtifact, options: DeployOptions) -> Result<DeployedProxy> {
        let kind = options.kind;
        self.calls.lock().unwrap().push(Call::Deploy {
            contract: artifact.contract_name.clone(),
            options,
        });
        self.outcome(&artifact.contract_name, Address::repeat_byte(0xaa), kind)
    }

    async fn upgrade_proxy(
        &self,
        proxy: Address,
        artifact: &ContractArtifact,
        options: DeployOptions,
    ) -> Result<DeployedProxy> {
        let kind = options.kind;
        self.calls.lock().unwrap().push(Call::Upgrade {
            proxy,
            contract: artifact.contract_name.clone(),
            options,
        });
        self.outcome(&artifact.contract_name, proxy, kind)
    }
}

fn stub_context() -> DeployerContext {
    DeployerContext::new(Address::repeat_byte(0x11), 1337, "development")
}

#[tokio::test]
async fn test_initial_migration_deploys_uups_proxy_once() {
    let artifacts = MockArtifacts::with(&["ODON"]);
    let deployer = MockDeployer::default();

    run_migration(stub_context(), &artifacts, &deployer)
        .await
        .expect("migration should succeed");

    let expected = Call::Deploy {
        contract: "ODON".to_string(),
        options: DeployOptions {
            deployer: stub_context(),
            kind: ProxyKind::Uups,
            initializer: Initializer::Default,
        },
    };
    assert_eq!(deployer.calls(), vec![expected]);
}

#[tokio::test]
async fn test_missing_artifact_skips_deployment() {
    let artifacts = MockArtifacts::with(&[]);
    let deployer = MockDeployer::default();

    let err = run_migration(stub_context(), &artifacts, &deployer)
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::ArtifactNotFound(ref name) if name == "ODON"));
    assert!(deployer.calls().is_empty());
}

#[tokio::test]
async fn test_deployer_error_propagates_unchanged() {
    let artifacts = MockArtifacts::with(&["ODON"]);
    let deployer = MockDeployer::failing("insufficient funds for gas * price + value");

    let err = run_migration(stub_context(), &artifacts, &deployer)
        .await
        .unwrap_err();

    match err {
        DeployError::ContractError(message) => {
            assert_eq!(message, "insufficient funds for gas * price + value")
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(deployer.calls().len(), 1);
}

#[tokio::test]
async fn test_initial_migration_never_upgrades() {
    let artifacts = MockArtifacts::with(&["ODON", "ODON_V2"]);
    let deployer = MockDeployer::default();

    run_migration(stub_context(), &artifacts, &deployer).await.unwrap();
    let _ = run_migration(stub_context(), &MockArtifacts::with(&[]), &deployer).await;

    assert!(deployer
        .calls()
        .iter()
        .all(|call| matches!(call, Call::Deploy { .. })));
}

#[tokio::test]
async fn test_upgrade_migration_targets_existing_proxy() {
    let artifacts = MockArtifacts::with(&["ODON", "ODON_V2"]);
    let deployer = MockDeployer::default();
    let proxy = Address::repeat_byte(0xaa);
    let options = DeployOptions::new(stub_context(), ProxyKind::Uups);

    let upgraded = Migration::upgrade(proxy, "ODON_V2", options.clone())
        .execute(&artifacts, &deployer)
        .await
        .unwrap();

    assert_eq!(upgraded.address, proxy);
    assert_eq!(upgraded.contract, "ODON_V2");
    assert_eq!(
        deployer.calls(),
        vec![Call::Upgrade {
            proxy,
            contract: "ODON_V2".to_string(),
            options,
        }]
    );
}

#[tokio::test]
async fn test_deploy_migration_returns_handle() {
    let artifacts = MockArtifacts::with(&["ODON"]);
    let deployer = MockDeployer::default();
    let options = DeployOptions::new(stub_context(), ProxyKind::Transparent).with_initializer(Initializer::Skip);

    let deployed = Migration::deploy("ODON", options)
        .execute(&artifacts, &deployer)
        .await
        .unwrap();

    assert_eq!(deployed.kind, ProxyKind::Transparent);
    assert_eq!(deployed.address, Address::repeat_byte(0xaa));
}
