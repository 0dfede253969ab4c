// RUN DRIVER -- SEQUENTIAL ITERATIONS, FIXED SLEEPS, NO RECOVERY
// CLEAR -> RESTART -> WAIT -> COLLECT, N TIMES. A FAILED RESTART COMMAND IS
// FATAL; A RECORD SHORTFALL IS A WARNING AND THE RUN PROCEEDS WITHOUT IT.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use stampede::collect;

pub fn run_drive(
    restart_cmd: &str,
    iterations: usize,
    wait_secs: u64,
    shared_dir: &Path,
    results_dir: &Path,
    config: &str,
    expected: Option<usize>,
) -> Result<()> {
    println!("STAMPEDE DRIVER");
    println!("CONFIG:      {}", config);
    println!("ITERATIONS:  {}", iterations);
    println!("WAIT:        {}s", wait_secs);
    println!("RESTART CMD: {}", restart_cmd);
    println!("SHARED DIR:  {}", shared_dir.display());
    println!("RESULTS DIR: {}", results_dir.display());
    println!();

    let group_dir = results_dir.join(config);

    for i in 0..iterations {
        println!("=== ITERATION {} / {} ===", i + 1, iterations);

        let stale = collect::clear_records(shared_dir)?;
        if stale > 0 {
            println!("CLEARED {} STALE RECORD(S)", stale);
        }

        let status = Command::new("sh")
            .arg("-c")
            .arg(restart_cmd)
            .status()
            .with_context(|| format!("could not run restart command: {}", restart_cmd))?;
        if !status.success() {
            bail!("restart command failed with {}", status);
        }

        // FIXED DELAY, NOT AN ACKNOWLEDGMENT. A RECORDER THAT STARTS LATER
        // THAN THIS PRODUCES A SILENTLY MISSING DATA POINT.
        println!("WAITING {}s FOR RECORDERS...", wait_secs);
        std::thread::sleep(Duration::from_secs(wait_secs));

        let exp_dir = group_dir.join(format!("exp{}", i));
        let copied = collect::collect_records(shared_dir, &exp_dir)?;
        println!("COLLECTED {} RECORD(S) INTO {}", copied, exp_dir.display());

        if let Some(expected) = expected {
            if copied < expected {
                println!("WARNING: EXPECTED {} RECORD(S), FOUND {}", expected, copied);
            }
        }

        collect::clear_records(shared_dir)?;
        println!();
    }

    println!("DRIVER DONE. RESULTS IN {}", group_dir.display());
    Ok(())
}
