use proxy_deployer::artifacts::ArtifactStore;
use proxy_deployer::blockchain::BlockchainClient;
use proxy_deployer::core::INITIAL_CONTRACT;
use proxy_deployer::deployer::OnchainProxyDeployer;
use proxy_deployer::manifest::Manifest;
use proxy_deployer::*;
use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;

/// Deploy (or upgrade) a contract behind an ERC-1967 upgradeable proxy
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-RPC endpoint
    #[arg(short, long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    rpc: String,

    /// Deployer private key (hex)
    #[arg(long, env = "DEPLOYER_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Directory of compiled artifacts (<Name>.json)
    #[arg(long, env = "ARTIFACTS_DIR", default_value = "build/contracts")]
    artifacts: PathBuf,

    /// Directory for per-network deployment manifests
    #[arg(long, env = "MANIFEST_DIR", default_value = ".openzeppelin")]
    manifest_dir: PathBuf,

    /// Contract to deploy
    #[arg(short, long, default_value = INITIAL_CONTRACT)]
    contract: String,

    /// Proxy kind: uups or transparent
    #[arg(short, long, default_value = "uups")]
    kind: String,

    /// Initializer function called through the proxy
    #[arg(long)]
    initializer: Option<String>,

    /// Initializer arguments as a JSON array, e.g. '["ODON", 1000]'
    #[arg(long, requires = "initializer")]
    args: Option<String>,

    /// Deploy without calling an initializer
    #[arg(long, conflicts_with = "initializer")]
    no_initialize: bool,

    /// Upgrade an existing proxy instead of deploying a new one
    #[arg(long)]
    upgrade: bool,

    /// Proxy address to upgrade (defaults to the manifest entry for --upgrade-from)
    #[arg(long, requires = "upgrade")]
    proxy: Option<String>,

    /// Contract whose recorded proxy is upgraded; without it the proxy recorded
    /// for --contract is used, or the network's only proxy
    #[arg(long, requires = "upgrade")]
    upgrade_from: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn initializer(args: &Args) -> Result<Initializer> {
    if args.no_initialize {
        return Ok(Initializer::Skip);
    }
    match &args.initializer {
        None => Ok(Initializer::Default),
        Some(name) => {
            let values = match &args.args {
                Some(raw) => serde_json::from_str::<Vec<serde_json::Value>>(raw)?,
                None => Vec::new(),
            };
            Ok(Initializer::Call {
                name: name.clone(),
                args: values,
            })
        }
    }
}

async fn run(args: Args) -> Result<DeployedProxy> {
    let kind: ProxyKind = args.kind.parse()?;
    let initializer = initializer(&args)?;

    println!("📡 RPC: {}", args.rpc);
    let client = Arc::new(BlockchainClient::new(&args.rpc, &args.private_key).await?);
    println!("✅ Connected to {} (chain {})", client.chain_name(), client.chain_id());

    let context = client.context();
    println!("👤 Deployer: {:?}\n", context.account);

    let artifacts = Arc::new(ArtifactStore::new(&args.artifacts));
    let deployer = OnchainProxyDeployer::new(client.clone(), artifacts.clone())
        .with_manifest_dir(&args.manifest_dir);

    let options = DeployOptions::new(context.clone(), kind).with_initializer(initializer);

    let migration = if args.upgrade {
        let proxy = match &args.proxy {
            Some(raw) => raw
                .parse()
                .map_err(|_| DeployError::InvalidAddress(raw.clone()))?,
            None => {
                let from = args.upgrade_from.as_deref().unwrap_or(&args.contract);
                let manifest = Manifest::load(&Manifest::path_for(&args.manifest_dir, &context))?;
                let proxy = manifest
                    .find_proxy(&[from])
                    .map(|p| p.address)
                    .ok_or_else(|| DeployError::ProxyNotFound(from.to_string()))?;
                tracing::info!("Upgrading recorded proxy {:?}", proxy);
                proxy
            }
        };
        Migration::upgrade(proxy, &args.contract, options)
    } else {
        Migration::deploy(&args.contract, options)
    };

    migration.execute(artifacts.as_ref(), &deployer).await
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Setup logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("proxy_deployer=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("proxy_deployer=info")
            .init();
    }

    println!("\n🛠  Upgradeable Proxy Migration");
    println!("==============================\n");

    match run(args).await {
        Ok(deployed) => {
            println!("\n{}", deployed);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Migration failed: {}\n", e);
            std::process::exit(1);
        }
    }
}
