//! Team setup commands

use anyhow::{Context, Result};
use clap::Subcommand;
use qmaze_core::flow::View;
use qmaze_core::storage::{self, KeyValueStore, TEAM_INFO_KEY};
use qmaze_core::{TeamInfo, TeamRole};
use tracing::info;

use crate::config::Config;

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Save the team name and the four members
    Set {
        /// Team name
        #[arg(short, long)]
        name: String,
        /// First decision maker
        #[arg(long)]
        agent1: String,
        /// Second decision maker
        #[arg(long)]
        agent2: String,
        /// Explorer
        #[arg(long)]
        explorer: String,
        /// Recorder
        #[arg(long)]
        recorder: String,
    },
    /// Show the saved team and the role descriptions
    Show,
    /// Forget the saved team
    Clear,
}

pub fn run(cmd: TeamCommands, cfg: &Config) -> Result<()> {
    let mut store = cfg.open_store()?;
    match cmd {
        TeamCommands::Set {
            name,
            agent1,
            agent2,
            explorer,
            recorder,
        } => {
            let team = TeamInfo::new(name, agent1, agent2, explorer, recorder);
            set(&mut store, &team)?;
            println!("Team saved.\n");
            print!("{}", describe(&team));
            super::print_next(View::Team);
            Ok(())
        }
        TeamCommands::Show => {
            match load(&store)? {
                Some(team) => print!("{}", describe(&team)),
                None => {
                    println!("No team saved yet.\n");
                    print!("{}", roles());
                    println!("\nSave one with: qmaze team set --name <TEAM> --agent1 <NAME> --agent2 <NAME> --explorer <NAME> --recorder <NAME>");
                }
            }
            Ok(())
        }
        TeamCommands::Clear => {
            store.remove(TEAM_INFO_KEY)?;
            println!("Team cleared.");
            Ok(())
        }
    }
}

/// Validate and persist `team`
pub fn set(store: &mut dyn KeyValueStore, team: &TeamInfo) -> Result<()> {
    team.validate().context("Team not saved")?;
    storage::save(store, TEAM_INFO_KEY, team)?;
    info!(team = %team.team_name, "Team saved");
    Ok(())
}

pub fn load(store: &dyn KeyValueStore) -> Result<Option<TeamInfo>> {
    Ok(storage::load(store, TEAM_INFO_KEY)?)
}

fn roles() -> String {
    let mut out = String::from("Roles (4 per team)\n");
    for role in TeamRole::ALL {
        let count = if role == TeamRole::DecisionMaker { 2 } else { 1 };
        out.push_str(&format!("  {role} (x{count}): {}\n", role.duty()));
    }
    out
}

fn describe(team: &TeamInfo) -> String {
    let mut out = format!("Team {}\n", team.team_name);
    for (role, name) in team.members() {
        out.push_str(&format!("  {:<15} {name}\n", role.to_string()));
    }
    out.push('\n');
    out.push_str(&roles());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmaze_core::storage::MemoryStore;

    #[test]
    fn test_set_and_load() {
        let mut store = MemoryStore::new();
        let team = TeamInfo::new("Owls", "Ada", "Ben", "Cho", "Dia");

        set(&mut store, &team).unwrap();
        assert_eq!(load(&store).unwrap(), Some(team));
    }

    #[test]
    fn test_incomplete_team_not_saved() {
        let mut store = MemoryStore::new();
        let team = TeamInfo::new("Owls", "Ada", "", "Cho", "Dia");

        let err = set(&mut store, &team).unwrap_err();
        assert!(format!("{err:#}").contains("agent 2 is required"));
        assert!(load(&store).unwrap().is_none());
    }

    #[test]
    fn test_describe_lists_members() {
        let team = TeamInfo::new("Owls", "Ada", "Ben", "Cho", "Dia");
        let text = describe(&team);
        assert!(text.starts_with("Team Owls"));
        assert!(text.contains("explorer"));
        assert!(text.contains("Dia"));
        assert!(text.contains("decision maker (x2)"));
    }
}
