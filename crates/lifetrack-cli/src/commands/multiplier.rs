use clap::{Subcommand, ValueEnum};
use lifetrack_core::Workspace;

use super::print_json;

#[derive(Clone, Copy, ValueEnum)]
pub enum Target {
    Goal,
    Project,
}

#[derive(Subcommand)]
pub enum MultiplierAction {
    /// Set a multiplier
    Set {
        #[arg(value_enum)]
        target: Target,
        /// Goal or project name
        name: String,
        /// Positive scalar (e.g. 1.5)
        value: f64,
    },
    /// Remove a multiplier
    Remove {
        #[arg(value_enum)]
        target: Target,
        name: String,
    },
    /// List all multipliers
    List,
}

pub fn run(action: MultiplierAction) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::open()?;
    let mut state = workspace.multipliers()?;

    match action {
        MultiplierAction::Set {
            target,
            name,
            value,
        } => {
            match target {
                Target::Goal => state.upsert_goal(&name, value)?,
                Target::Project => state.upsert_project(&name, value)?,
            }
            workspace.save_multipliers(&state)?;
            println!("ok");
        }
        MultiplierAction::Remove { target, name } => {
            let removed = match target {
                Target::Goal => state.remove_goal(&name),
                Target::Project => state.remove_project(&name),
            };
            if removed.is_none() {
                return Err(format!("no multiplier for '{name}'").into());
            }
            workspace.save_multipliers(&state)?;
            println!("removed");
        }
        MultiplierAction::List => print_json(&state)?,
    }
    Ok(())
}
