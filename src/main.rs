// STAMPEDE v1.2.0 -- POD STARTUP TIMING HARNESS
// MEASURES HOW FAR APART A HERD OF PODS/PROCESSES ACTUALLY STARTS ACROSS
// REPEATED RESTARTS: ORCHESTRATOR-SCHEDULED PODS VS DIRECTLY-LAUNCHED
// PROCESSES PINNED TO A CPU-AFFINITY GROUP.
//
// RECORDERS WRITE ONE TIMESTAMP EACH, THE DRIVER RESTARTS AND COLLECTS,
// THE ANALYZER ROLLS UP SPREAD AND DEVIATION.

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stampede")]
#[command(about = "STAMPEDE -- POD STARTUP TIMING HARNESS")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    // SAMPLE A CLOCK ONCE AND PUBLISH ONE TIMING RECORD
    Record {
        // DESTINATION DIRECTORY FOR THE RECORD FILE
        #[arg(long, default_value = "/shared")]
        shared_dir: PathBuf,

        // SELF-REPORTED NAME. DEFAULT: HOST NAME (THE POD NAME UNDER K8S)
        #[arg(long)]
        identity: Option<String>,

        // STAY ALIVE AFTER WRITING (MONOTONIC CLOCK, `pod` KEY). DEFAULT IS
        // BASELINE: WALL CLOCK, `process` KEY, EXIT AFTER THE WRITE.
        #[arg(long)]
        keep_alive: bool,
    },

    // COPY RECORDS OUT OF THE SHARED DIRECTORY (ONE ITERATION)
    Collect {
        #[arg(long, default_value = "/shared")]
        shared_dir: PathBuf,

        // PER-ITERATION DESTINATION DIRECTORY
        #[arg(long)]
        output: PathBuf,

        // ADVISORY RECORD COUNT -- SHORTFALL WARNS, NEVER FAILS
        #[arg(long)]
        expected: Option<usize>,

        // ALSO CLEAR THE SHARED DIRECTORY AFTER COPYING
        #[arg(long)]
        clear: bool,
    },

    // RUN N RESTART ITERATIONS AND COLLECT AFTER EACH
    Drive {
        // RESTART TRIGGER, RUN VIA `sh -c` EACH ITERATION
        #[arg(long)]
        restart_cmd: String,

        #[arg(long, default_value_t = 10)]
        iterations: usize,

        // FIXED DELAY BETWEEN RESTART AND COLLECTION
        #[arg(long, default_value_t = 30)]
        wait_secs: u64,

        #[arg(long, default_value = "/shared")]
        shared_dir: PathBuf,

        #[arg(long, default_value = "experiment-results")]
        results_dir: PathBuf,

        // GROUP LABEL: RESULTS LAND IN <results-dir>/<config>/exp<N>/
        #[arg(long)]
        config: String,

        #[arg(long)]
        expected: Option<usize>,
    },

    // ROLL UP COLLECTED RESULTS INTO TEXT REPORTS
    Analyze {
        #[arg(long, default_value = "experiment-results")]
        results_dir: PathBuf,

        #[arg(long, default_value = "analysis-results")]
        output: PathBuf,
    },

    // VERIFY EXTERNAL TOOLS, KERNEL CONFIG, AND THE SHARED DIRECTORY
    Check {
        #[arg(long, default_value = "/shared")]
        shared_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Record {
            shared_dir,
            identity,
            keep_alive,
        } => cli::record::run_record(&shared_dir, identity, keep_alive),
        Command::Collect {
            shared_dir,
            output,
            expected,
            clear,
        } => cli::collect::run_collect(&shared_dir, &output, expected, clear),
        Command::Drive {
            restart_cmd,
            iterations,
            wait_secs,
            shared_dir,
            results_dir,
            config,
            expected,
        } => cli::drive::run_drive(
            &restart_cmd,
            iterations,
            wait_secs,
            &shared_dir,
            &results_dir,
            &config,
            expected,
        ),
        Command::Analyze {
            results_dir,
            output,
        } => cli::analyze::run_analyze(&results_dir, &output),
        Command::Check { shared_dir } => cli::check::run_check(&shared_dir),
    }
}
