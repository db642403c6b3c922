//! Deployment commands

use crate::output::{print_json, DeploymentView};
use clap::{Args, Subcommand};
use procrepo_engine::Engine;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DeploymentArgs {
    #[command(subcommand)]
    pub command: DeploymentCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeploymentCommand {
    /// Create a deployment, optionally packaging resource files
    Create(CreateArgs),
    List,
    Get { id: String },
    /// List resource names of a deployment
    Resources { id: String },
    /// Write one resource's raw content to stdout
    Resource { id: String, name: String },
    /// Delete a deployment
    Delete {
        id: String,
        /// Also delete the deployment's process definitions
        #[arg(long)]
        cascade: bool,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    /// Resource as NAME=FILE; repeatable
    #[arg(long = "resource", value_parser = parse_resource)]
    pub resources: Vec<(String, PathBuf)>,
}

fn parse_resource(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=FILE, got {:?}", value)),
    }
}

pub fn execute(
    args: DeploymentArgs,
    engine: &Engine,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = engine.repository();
    match args.command {
        DeploymentCommand::Create(create) => {
            let mut builder = repo.create_deployment_builder().name(create.name);
            for (name, path) in create.resources {
                builder = builder.add_resource(name, std::fs::read(&path)?);
            }
            let deployment = builder.deploy();
            print_json(&DeploymentView::from(&deployment))?;
        }
        DeploymentCommand::List => {
            let mut deployments = repo.list_deployments();
            deployments.sort_by(|a, b| a.id.cmp(&b.id));
            let views: Vec<DeploymentView> =
                deployments.iter().map(DeploymentView::from).collect();
            print_json(&views)?;
        }
        DeploymentCommand::Get { id } => {
            let deployment = repo.get_deployment(&id).map_err(|e| engine.stamp_error(e))?;
            print_json(&DeploymentView::from(&deployment))?;
        }
        DeploymentCommand::Resources { id } => {
            let names = repo
                .get_deployment_resource_names(&id)
                .map_err(|e| engine.stamp_error(e))?;
            print_json(&names)?;
        }
        DeploymentCommand::Resource { id, name } => {
            let content = repo
                .get_resource_as_bytes(&id, &name)
                .map_err(|e| engine.stamp_error(e))?;
            std::io::stdout().write_all(&content)?;
        }
        DeploymentCommand::Delete { id, cascade } => {
            repo.delete_deployment(&id, cascade).map_err(|e| engine.stamp_error(e))?;
            print_json(&serde_json::json!({ "deleted": id, "cascade": cascade }))?;
        }
    }
    Ok(())
}
