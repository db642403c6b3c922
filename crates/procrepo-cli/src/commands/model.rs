//! Model draft commands

use crate::output::{print_json, ModelView};
use base64::Engine as _;
use clap::{Args, Subcommand};
use procrepo_engine::Engine;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ModelArgs {
    #[command(subcommand)]
    pub command: ModelCommand,
}

#[derive(Debug, Subcommand)]
pub enum ModelCommand {
    /// Create an empty model draft
    New {
        #[arg(long)]
        name: String,
        #[arg(long)]
        key: String,
    },
    Get { id: String },
    List,
    Delete { id: String },
    /// Replace a model's editor source with a file's content
    SetSource {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Print a model's editor source as base64
    GetSource { id: String },
}

pub fn execute(args: ModelArgs, engine: &Engine) -> Result<(), Box<dyn std::error::Error>> {
    let repo = engine.repository();
    match args.command {
        ModelCommand::New { name, key } => {
            let model = repo.new_model(name, key);
            print_json(&ModelView::from(&model))?;
        }
        ModelCommand::Get { id } => {
            let model = repo.get_model(&id).map_err(|e| engine.stamp_error(e))?;
            print_json(&ModelView::from(&model))?;
        }
        ModelCommand::List => {
            let mut models = repo.list_models();
            models.sort_by(|a, b| a.id.cmp(&b.id));
            let views: Vec<ModelView> = models.iter().map(ModelView::from).collect();
            print_json(&views)?;
        }
        ModelCommand::Delete { id } => {
            repo.delete_model(&id).map_err(|e| engine.stamp_error(e))?;
            print_json(&serde_json::json!({ "deleted": id }))?;
        }
        ModelCommand::SetSource { id, file } => {
            let source = std::fs::read(&file)?;
            repo.add_model_editor_source(&id, source)
                .map_err(|e| engine.stamp_error(e))?;
            print_json(&ModelView::from(&repo.get_model(&id).map_err(|e| engine.stamp_error(e))?))?;
        }
        ModelCommand::GetSource { id } => {
            let source = repo.get_model_editor_source(&id).map_err(|e| engine.stamp_error(e))?;
            println!("{}", base64::engine::general_purpose::STANDARD.encode(source));
        }
    }
    Ok(())
}
