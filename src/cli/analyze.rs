// ANALYZE SUBCOMMAND
// WALKS <results>/<group>/exp<N>/, ROLLS UP SPREAD AND DEVIATION, WRITES
// TEXT REPORTS INTO THE ANALYSIS OUTPUT DIRECTORY.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use stampede::stats;

pub fn run_analyze(results_dir: &Path, output_dir: &Path) -> Result<()> {
    let groups = stats::analyze_tree(results_dir)?;
    if groups.is_empty() {
        println!("NO EXPERIMENT DATA UNDER {}", results_dir.display());
        return Ok(());
    }

    for group in &groups {
        println!("GROUP: {}", group.name);
        for exp in &group.experiments {
            let s = &exp.stats;
            println!(
                "  {}: {} record(s), max_spread={:.3}ms, std={:.3}ms",
                exp.name, s.count, s.spread_ms, s.std_ms
            );
        }
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("could not create {}", output_dir.display()))?;

    let individual = output_dir.join("individual_experiment_stats.txt");
    fs::write(&individual, stats::render_individual(&groups))
        .with_context(|| format!("could not write {}", individual.display()))?;
    println!("WROTE {}", individual.display());

    let summary = output_dir.join("summary_stats.txt");
    fs::write(&summary, stats::render_summary(&groups))
        .with_context(|| format!("could not write {}", summary.display()))?;
    println!("WROTE {}", summary.display());

    Ok(())
}
