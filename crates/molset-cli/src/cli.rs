use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "molset CLI - Inspect hierarchical molecule-set trees described in TOML tree files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the molecule, atom and bond totals of a whole tree.
    Count(TreeArgs),
    /// Print every set in the tree with its subtree totals and molecule identifiers.
    Tree(TreeArgs),
}

/// Arguments shared by the `count` and `tree` subcommands.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Path to the TOML tree file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// First identifier handed out when stamping molecules.
    #[arg(long, value_name = "INT", default_value_t = 0)]
    pub first_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn author_comes_from_package_metadata() {
        let command = Cli::command();
        assert_eq!(command.get_author(), Some(env!("CARGO_PKG_AUTHORS")));
        assert_eq!(env!("CARGO_PKG_AUTHORS"), "The molset developers");
    }

    #[test]
    fn parses_count_with_defaults() {
        let cli = Cli::try_parse_from(["molset", "count", "tree.toml"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        match cli.command {
            Commands::Count(args) => {
                assert_eq!(args.input, PathBuf::from("tree.toml"));
                assert_eq!(args.first_id, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "molset",
            "tree",
            "tree.toml",
            "--first-id",
            "42",
            "-vv",
            "--log-file",
            "run.log",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert!(matches!(cli.command, Commands::Tree(TreeArgs { first_id: 42, .. })));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["molset", "count", "tree.toml", "-q", "-v"]);
        assert!(result.is_err());
    }
}
