//! fcov: functional coverage campaigns from the command line
//!
//! ## Usage
//!
//! ```bash
//! fcov check plans/alu.yaml              # Validate a plan
//! fcov run plans/alu.yaml --seed 7       # Drive it to closure
//! fcov run plans/alu.yaml --json cov.json --fail-on-incomplete
//! ```

use clap::Parser;
use fcov_cli::{
    init_logging, CampaignRunner, CheckArgs, Cli, CliConfig, CliError, CliResult, Commands,
    CoveragePlan, ProgressReporter, RunArgs, Verbosity,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_logging(config.verbosity);

    match cli.command {
        Commands::Run(args) => run_campaign(&config, &args),
        Commands::Check(args) => run_check(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(cli.color.should_color())
}

fn reporter(config: &CliConfig) -> ProgressReporter {
    ProgressReporter::new(config.color, config.verbosity.is_quiet())
}

fn run_campaign(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let plan = CoveragePlan::load(&args.plan)?;
    let mut point = plan.build_point(args.seed)?;
    let status = reporter(config);

    if config.verbosity.is_verbose() {
        status.info(&format!(
            "Loaded {} bins from {}",
            point.num_bins(),
            args.plan.display()
        ));
    }

    let mut runner = CampaignRunner::new(args.max_iterations, reporter(config));
    let outcome = runner.run(&mut point)?;

    if !config.verbosity.is_quiet() {
        point.print_summary()?;
        println!("Iterations: {}", outcome.iterations);
    }

    if let Some(path) = &args.json {
        let mut out = BufWriter::new(File::create(path)?);
        point.write_summary_json(&mut out)?;
        out.flush()?;
        status.info(&format!("Coverage snapshot written to {}", path.display()));
    }

    if outcome.completed {
        status.success(&format!(
            "Coverage closed in {} iterations ({:.2?})",
            outcome.iterations, outcome.duration
        ));
        Ok(())
    } else {
        if args.fail_on_incomplete {
            return Err(CliError::Incomplete {
                iterations: outcome.iterations,
                coverage: outcome.bins_coverage,
            });
        }
        status.failure(&format!(
            "Coverage incomplete after {} iterations ({:.2}% of bins covered)",
            outcome.iterations, outcome.bins_coverage
        ));
        Ok(())
    }
}

fn run_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let plan = CoveragePlan::load(&args.plan)?;
    let point = plan.build_point(None)?;

    if !config.verbosity.is_quiet() {
        point.print_summary()?;
    }
    reporter(config).success(&format!(
        "{}: {} bins registered in scope {}",
        args.plan.display(),
        point.num_bins(),
        point.scope()
    ));
    Ok(())
}
