//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fcov: drive functional coverage plans to closure
#[derive(Parser, Debug)]
#[command(name = "fcov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a coverage plan until every bin reaches its goal
    Run(RunArgs),

    /// Validate a coverage plan and print its empty bin table
    Check(CheckArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Coverage plan (YAML)
    pub plan: PathBuf,

    /// Seed for the stimulus generator (overrides the plan)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Stop after this many generated values
    #[arg(short = 'n', long, default_value = "10000")]
    pub max_iterations: u64,

    /// Write the final coverage snapshot as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Exit with failure when the budget runs out before closure
    #[arg(long)]
    pub fail_on_incomplete: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Coverage plan (YAML)
    pub plan: PathBuf,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorArg {
    /// Resolve against the terminal status of stderr
    #[must_use]
    pub fn should_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "fcov",
            "run",
            "plan.yaml",
            "--seed",
            "7",
            "--max-iterations",
            "500",
            "--json",
            "out.json",
            "--fail-on-incomplete",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.plan, PathBuf::from("plan.yaml"));
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.max_iterations, 500);
                assert_eq!(args.json, Some(PathBuf::from("out.json")));
                assert!(args.fail_on_incomplete);
            }
            Commands::Check(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["fcov", "run", "plan.yaml"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.seed, None);
                assert_eq!(args.max_iterations, 10_000);
                assert!(!args.fail_on_incomplete);
            }
            Commands::Check(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["fcov", "check", "plan.yaml", "-vv", "--color", "never"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert_eq!(cli.color, ColorArg::Never);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_color_resolution() {
        assert!(ColorArg::Always.should_color());
        assert!(!ColorArg::Never.should_color());
    }

    #[test]
    fn test_plan_required() {
        assert!(Cli::try_parse_from(["fcov", "run"]).is_err());
    }
}
