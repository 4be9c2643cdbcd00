use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::ids::TaskId;
use crate::model::selection::Filter;

#[derive(Parser)]
#[command(name = "tl", about = concat!("tasklists v", env!("CARGO_PKG_VERSION"), " - named task lists with due dates"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $XDG_CONFIG_HOME/tasklists/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides storage.dir)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all task lists
    Lists,
    /// Create a task list
    New(NewArgs),
    /// Delete a task list and its tasks
    Drop(DropArgs),
    /// Show the tasks of a list
    Show(ShowArgs),
    /// Add a task to a list
    Add(AddArgs),
    /// Edit a task's text or due date
    Edit(EditArgs),
    /// Flip a task between pending and completed
    Toggle(TaskRef),
    /// Delete a task
    Rm(TaskRef),
}

#[derive(Args)]
pub struct NewArgs {
    /// List name
    pub name: String,
}

#[derive(Args)]
pub struct DropArgs {
    /// List id or exact name
    pub list: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// List id or exact name
    pub list: String,
    /// Which tasks to show: all, completed, pending (default: from config)
    #[arg(long)]
    pub filter: Option<Filter>,
}

#[derive(Args)]
pub struct AddArgs {
    /// List id or exact name
    pub list: String,
    /// Task text
    pub text: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

#[derive(Args)]
pub struct EditArgs {
    /// List id or exact name
    pub list: String,
    /// Task id
    pub task: TaskId,
    /// New task text
    #[arg(long)]
    pub text: Option<String>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
}

#[derive(Args)]
pub struct TaskRef {
    /// List id or exact name
    pub list: String,
    /// Task id
    pub task: TaskId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_due_date() {
        let cli = Cli::try_parse_from(["tl", "add", "Groceries", "Milk", "--due", "2024-01-05"])
            .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.list, "Groceries");
                assert_eq!(args.text, "Milk");
                assert_eq!(args.due, NaiveDate::from_ymd_opt(2024, 1, 5));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn parses_show_filter_and_globals() {
        let cli = Cli::try_parse_from(["tl", "show", "7", "--filter", "pending", "--json", "-vv"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Show(args) => assert_eq!(args.filter, Some(Filter::Pending)),
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn due_and_clear_due_conflict() {
        let res = Cli::try_parse_from([
            "tl", "edit", "L", "1", "--due", "2024-01-01", "--clear-due",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_bad_date_and_task_id() {
        assert!(Cli::try_parse_from(["tl", "add", "L", "x", "--due", "soon"]).is_err());
        assert!(Cli::try_parse_from(["tl", "toggle", "L", "abc"]).is_err());
    }
}
