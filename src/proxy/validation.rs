//! Implementation checks and initializer encoding

use ethers::abi::token::{LenientTokenizer, Tokenizer};
use ethers::abi::{Function, ParamType, Token};
use ethers::types::Bytes;
use serde_json::Value;

use crate::models::{ContractArtifact, Initializer, ProxyKind};
use crate::utils::{DeployError, Result};

const DEFAULT_INITIALIZER: &str = "initialize";

/// Make sure the implementation can live behind a proxy of this kind
///
/// UUPS: the implementation carries the upgrade entry point.
/// Transparent: the implementation must not, upgrades go through the admin.
pub fn validate_kind(artifact: &ContractArtifact, kind: ProxyKind) -> Result<()> {
    let upgradeable = artifact.has_function("upgradeTo") || artifact.has_function("upgradeToAndCall");

    let reason = match kind {
        ProxyKind::Uups if !upgradeable => {
            "missing upgradeTo/upgradeToAndCall (inherit UUPSUpgradeable)"
        }
        ProxyKind::Transparent if artifact.has_function("upgradeTo") => {
            "declares upgradeTo, which clashes with the transparent proxy's admin interface"
        }
        _ => return Ok(()),
    };

    Err(DeployError::IncompatibleKind {
        contract: artifact.contract_name.clone(),
        kind: kind.to_string(),
        reason: reason.to_string(),
    })
}

/// Build the calldata the proxy constructor forwards to the implementation
pub fn encode_initializer(artifact: &ContractArtifact, initializer: &Initializer) -> Result<Bytes> {
    match initializer {
        Initializer::Skip => Ok(Bytes::default()),
        Initializer::Default => {
            let function = artifact
                .abi
                .functions_by_name(DEFAULT_INITIALIZER)
                .ok()
                .and_then(|overloads| overloads.iter().find(|f| f.inputs.is_empty()));

            match function {
                Some(f) => encode_call(f, Vec::new()),
                None => {
                    tracing::debug!("{} has no initialize(), deploying without initializer", artifact.contract_name);
                    Ok(Bytes::default())
                }
            }
        }
        Initializer::Call { name, args } => {
            let overloads = artifact.abi.functions_by_name(name).map_err(|_| {
                DeployError::Initializer(format!("{} has no function {}", artifact.contract_name, name))
            })?;

            let function = overloads
                .iter()
                .find(|f| f.inputs.len() == args.len())
                .ok_or_else(|| {
                    DeployError::Initializer(format!(
                        "{} takes no overload with {} argument(s)",
                        name,
                        args.len()
                    ))
                })?;

            let tokens = function
                .inputs
                .iter()
                .zip(args)
                .map(|(param, value)| tokenize(&param.kind, value))
                .collect::<Result<Vec<_>>>()?;

            encode_call(function, tokens)
        }
    }
}

fn encode_call(function: &Function, tokens: Vec<Token>) -> Result<Bytes> {
    let data = function
        .encode_input(&tokens)
        .map_err(|e| DeployError::Initializer(format!("{}: {}", function.name, e)))?;
    tracing::debug!("Initializer {} calldata: 0x{}", function.name, hex::encode(&data));
    Ok(Bytes::from(data))
}

/// Convert a JSON argument into a token of the parameter's type.
///
/// Arrays and tuples are walked element by element; scalars go through the
/// lenient tokenizer using the raw string, never the JSON-quoted form.
fn tokenize(kind: &ParamType, value: &Value) -> Result<Token> {
    match kind {
        ParamType::Array(inner) => {
            let items = json_array(kind, value)?;
            let tokens = items.iter().map(|item| tokenize(inner, item)).collect::<Result<Vec<_>>>()?;
            Ok(Token::Array(tokens))
        }
        ParamType::FixedArray(inner, len) => {
            let items = json_array(kind, value)?;
            if items.len() != *len {
                return Err(DeployError::Initializer(format!(
                    "{} expects {} element(s), got {}",
                    kind,
                    len,
                    items.len()
                )));
            }
            let tokens = items.iter().map(|item| tokenize(inner, item)).collect::<Result<Vec<_>>>()?;
            Ok(Token::FixedArray(tokens))
        }
        ParamType::Tuple(kinds) => {
            let items = json_array(kind, value)?;
            if items.len() != kinds.len() {
                return Err(DeployError::Initializer(format!(
                    "{} expects {} field(s), got {}",
                    kind,
                    kinds.len(),
                    items.len()
                )));
            }
            let tokens = kinds
                .iter()
                .zip(items)
                .map(|(k, item)| tokenize(k, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(Token::Tuple(tokens))
        }
        scalar => {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(DeployError::Initializer(format!("cannot encode {} as {}", other, scalar)));
                }
            };
            LenientTokenizer::tokenize(scalar, &text)
                .map_err(|e| DeployError::Initializer(format!("cannot encode {} as {}: {}", text, scalar, e)))
        }
    }
}

fn json_array<'a>(kind: &ParamType, value: &'a Value) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| DeployError::Initializer(format!("{} expects a JSON array, got {}", kind, value)))
}
