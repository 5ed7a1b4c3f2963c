use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `plan` binary.
#[derive(Debug, Parser)]
#[command(name = "plan", version, about = "Plan - task lists with field-level change history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path, overriding configuration (":memory:" for a scratch store)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{HistoryCommands, TaskCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "plan", "--format", "table", "--limit", "10", "--verbose", "task", "trash",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Task {
                action: TaskCommands::Trash { list: None }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["plan", "history", "summary", "tsk-1", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::History {
                action: HistoryCommands::Summary { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["plan", "--format", "xml", "list", "all"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn update_clear_flags_conflict_with_values() {
        let parsed = Cli::try_parse_from([
            "plan",
            "task",
            "update",
            "tsk-1",
            "--description",
            "x",
            "--clear-description",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn task_list_filters_parse() {
        let cli = Cli::try_parse_from([
            "plan", "task", "list", "--search", "50%_off", "--overdue", "--page", "2",
        ])
        .expect("cli should parse");

        let Commands::Task {
            action: TaskCommands::List(args),
        } = cli.command
        else {
            panic!("expected task list");
        };
        assert_eq!(args.search.as_deref(), Some("50%_off"));
        assert!(args.overdue);
        assert_eq!(args.page, Some(2));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["plan", "--db", "/tmp/demo.db", "list", "all"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
    }
}
