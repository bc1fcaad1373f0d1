//! CLI runner - executes commands

use crate::cli::commands::{instance_type_for, Cli, Commands};
use crate::client::DmsClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::filters::Filter;
use crate::instances::{InstanceRef, InstanceType, ListRequest};
use crate::types::{JsonValue, Method, Params};
use serde::Serialize;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = DmsClient::from_config(&self.load_config()?)?;

        match &self.cli.command {
            Commands::Fetch {
                method,
                path,
                params,
            } => {
                let method: Method = method.parse()?;
                let params = parse_params(params.as_deref())?;
                let body = client.fetch(method, path, &params).await?;
                print_json(&body)
            }
            Commands::List {
                space,
                instance_type,
                limit,
            } => {
                let instance_type: InstanceType = (*instance_type).into();
                let request = list_request(instance_type, space.as_deref(), *limit);
                let instances = client.instances().list(&request).await?;
                info!("Listed {} {}s", instances.len(), instance_type);
                print_json(&instances)
            }
            Commands::Retrieve { space, ids, edge } => {
                let refs = instance_refs(space, ids, *edge);
                let instances = client.instances().retrieve(&refs, &[]).await?;
                info!("Retrieved {} of {} instances", instances.len(), refs.len());
                print_json(&instances)
            }
            Commands::Delete { space, ids, edge } => {
                let refs = instance_refs(space, ids, *edge);
                let deleted = client.instances().delete(&refs).await?;
                info!("Deleted {} instances", deleted.len());
                print_json(&deleted)
            }
        }
    }

    /// Load the config file if given, then apply environment overrides
    fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        config.apply_env()
    }
}

/// Parse `--params` into a JSON object
fn parse_params(raw: Option<&str>) -> Result<Params> {
    let Some(raw) = raw else {
        return Ok(Params::new());
    };
    match serde_json::from_str::<JsonValue>(raw)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::config("--params must be a JSON object")),
    }
}

fn list_request(instance_type: InstanceType, space: Option<&str>, limit: Option<u32>) -> ListRequest {
    let mut request = ListRequest {
        instance_type,
        ..ListRequest::default()
    };
    if let Some(space) = space {
        let scope = instance_type.to_string();
        request = request.filter(Filter::equals(Filter::builtin(&scope, "space"), space));
    }
    if let Some(limit) = limit {
        request = request.limit(limit);
    }
    request
}

fn instance_refs(space: &str, ids: &[String], edge: bool) -> Vec<InstanceRef> {
    let instance_type = instance_type_for(edge);
    ids.iter()
        .map(|id| InstanceRef {
            instance_type,
            space: space.to_string(),
            external_id: id.clone(),
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
