//! Process definition commands

use crate::output::print_json;
use clap::{Args, Subcommand};
use procrepo_core::RepositoryService;
use procrepo_engine::Engine;

#[derive(Debug, Args)]
pub struct DefinitionArgs {
    #[command(subcommand)]
    pub command: DefinitionCommand,
}

#[derive(Debug, Subcommand)]
pub enum DefinitionCommand {
    /// Save a new version of a process definition
    Save {
        #[arg(long)]
        key: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        deployment: String,
    },
    Get { id: String },
    /// All versions of a key, oldest first
    ByKey { key: String },
    /// Highest version of a key
    Latest { key: String },
    Suspend(TargetArgs),
    Activate(TargetArgs),
    /// Set a definition's category
    Category { id: String, category: String },
    List,
}

/// One definition by id, or every version of a key
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub key: Option<String>,
}

pub fn execute(
    args: DefinitionArgs,
    engine: &Engine,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = engine.repository();
    match args.command {
        DefinitionCommand::Save {
            key,
            name,
            deployment,
        } => {
            let definition = repo.save_process_definition(key, name, deployment);
            print_json(&definition)?;
        }
        DefinitionCommand::Get { id } => {
            let definition = repo.get_process_definition(&id).map_err(|e| engine.stamp_error(e))?;
            print_json(&definition)?;
        }
        DefinitionCommand::ByKey { key } => {
            print_json(&repo.get_process_definitions_by_key(&key))?;
        }
        DefinitionCommand::Latest { key } => {
            let definition = repo
                .get_latest_process_definition_by_key(&key)
                .map_err(|e| engine.stamp_error(e))?;
            print_json(&definition)?;
        }
        DefinitionCommand::Suspend(target) => set_suspended(engine, &repo, target, true)?,
        DefinitionCommand::Activate(target) => set_suspended(engine, &repo, target, false)?,
        DefinitionCommand::Category { id, category } => {
            repo.set_process_definition_category(&id, category)
                .map_err(|e| engine.stamp_error(e))?;
            print_json(&repo.get_process_definition(&id).map_err(|e| engine.stamp_error(e))?)?;
        }
        DefinitionCommand::List => {
            let mut definitions = repo.list_process_definitions();
            definitions.sort_by(|a, b| a.key.cmp(&b.key).then(a.version.cmp(&b.version)));
            print_json(&definitions)?;
        }
    }
    Ok(())
}

fn set_suspended(
    engine: &Engine,
    repo: &RepositoryService,
    target: TargetArgs,
    suspended: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let updated = match (target.id, target.key) {
        (Some(id), _) => {
            let result = if suspended {
                repo.suspend_process_definition_by_id(&id)
            } else {
                repo.activate_process_definition_by_id(&id)
            };
            result.map_err(|e| engine.stamp_error(e))?;
            vec![repo.get_process_definition(&id).map_err(|e| engine.stamp_error(e))?]
        }
        (None, Some(key)) => {
            let result = if suspended {
                repo.suspend_process_definition_by_key(&key)
            } else {
                repo.activate_process_definition_by_key(&key)
            };
            result.map_err(|e| engine.stamp_error(e))?;
            repo.get_process_definitions_by_key(&key)
        }
        (None, None) => return Err("Must specify either --id or --key".into()),
    };
    print_json(&updated)?;
    Ok(())
}
