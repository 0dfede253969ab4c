// EXPERIMENT STATISTICS
// PER-EXPERIMENT SPREAD AND DEVIATION OF RECORDER START TIMES, PER-GROUP
// ROLLUPS ACROSS EXPERIMENTS. EVERYTHING IN MILLISECONDS.
//
// THE TREE SHAPE IS FIXED BY THE DRIVER: <results>/<group>/exp<N>/*.txt.
// AN UNPARSABLE RECORD IS A WARNING AND A SKIPPED DATA POINT, NEVER A
// FAILED ANALYSIS -- THE COLLECTION PROTOCOL ALREADY TOLERATES SHORTFALLS.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::record;

#[derive(Clone, Copy, Debug)]
pub struct ExperimentStats {
    pub count: usize,
    pub min_ms: f64,
    pub max_ms: f64,
    pub spread_ms: f64,
    pub std_ms: f64,
}

#[derive(Clone, Debug)]
pub struct Experiment {
    pub name: String,
    pub stats: ExperimentStats,
}

#[derive(Clone, Debug)]
pub struct Group {
    pub name: String,
    pub experiments: Vec<Experiment>,
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

pub fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// SAMPLE STANDARD DEVIATION (N-1 DENOMINATOR). 0.0 BELOW TWO SAMPLES.
pub fn sample_std(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (xs.len() - 1) as f64;
    var.sqrt()
}

pub fn stats_of(times_ms: &[f64]) -> Option<ExperimentStats> {
    if times_ms.is_empty() {
        return None;
    }
    let min_ms = times_ms.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_ms = times_ms.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some(ExperimentStats {
        count: times_ms.len(),
        min_ms,
        max_ms,
        spread_ms: max_ms - min_ms,
        std_ms: sample_std(times_ms),
    })
}

// READ EVERY *.txt RECORD UNDER exp_dir. NONE PARSABLE -> None.
pub fn analyze_experiment(exp_dir: &Path) -> Result<Option<ExperimentStats>> {
    let mut times = Vec::new();
    for entry in fs::read_dir(exp_dir)
        .with_context(|| format!("could not read {}", exp_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() || !path.extension().map(|e| e == "txt").unwrap_or(false) {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("could not read {}", path.display()))?;
        match record::parse(&content) {
            Ok(rec) => times.push(rec.start_ms()),
            Err(err) => eprintln!("WARNING: SKIPPING {}: {}", path.display(), err),
        }
    }
    Ok(stats_of(&times))
}

// WALK <results>/<group>/exp<N>/. GROUPS AND EXPERIMENTS SORTED BY NAME;
// ONLY exp* SUBDIRECTORIES COUNT. GROUPS WITH NO DATA ARE DROPPED.
pub fn analyze_tree(results_dir: &Path) -> Result<Vec<Group>> {
    let mut groups = Vec::new();

    for group_dir in sorted_dirs(results_dir, "")? {
        let mut experiments = Vec::new();
        for exp_dir in sorted_dirs(&group_dir, "exp")? {
            if let Some(stats) = analyze_experiment(&exp_dir)? {
                experiments.push(Experiment {
                    name: dir_name(&exp_dir),
                    stats,
                });
            }
        }
        if !experiments.is_empty() {
            groups.push(Group {
                name: dir_name(&group_dir),
                experiments,
            });
        }
    }

    Ok(groups)
}

fn sorted_dirs(parent: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(parent)
        .with_context(|| format!("could not read {}", parent.display()))?
    {
        let path = entry?.path();
        if path.is_dir() && dir_name(&path).starts_with(prefix) {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Clone, Copy, Debug)]
pub struct Rollup {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

pub fn rollup(xs: &[f64]) -> Rollup {
    Rollup {
        mean: mean(xs),
        median: median(xs),
        min: xs.iter().cloned().fold(f64::INFINITY, f64::min),
        max: xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    }
}

pub fn render_individual(groups: &[Group]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str("INDIVIDUAL EXPERIMENT STATISTICS\n");
    out.push_str(&format!("{}\n\n", "=".repeat(80)));

    for group in groups {
        out.push_str(&format!("{}\n", "=".repeat(80)));
        out.push_str(&format!("GROUP: {}\n", group.name));
        out.push_str(&format!("{}\n\n", "=".repeat(80)));

        for exp in &group.experiments {
            let s = &exp.stats;
            out.push_str(&format!("  [{}]\n", exp.name));
            out.push_str(&format!("    RECORDS:     {}\n", s.count));
            out.push_str(&format!("    MIN START:   {:.6} ms\n", s.min_ms));
            out.push_str(&format!("    MAX START:   {:.6} ms\n", s.max_ms));
            out.push_str(&format!("    MAX SPREAD:  {:.6} ms\n", s.spread_ms));
            out.push_str(&format!("    STD DEV:     {:.6} ms\n\n", s.std_ms));
        }
    }

    out
}

pub fn render_summary(groups: &[Group]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str("EXPERIMENT GROUP SUMMARY\n");
    out.push_str(&format!("{}\n", "=".repeat(80)));

    let mut mean_spreads = Vec::new();
    for group in groups {
        let spreads: Vec<f64> = group.experiments.iter().map(|e| e.stats.spread_ms).collect();
        let stds: Vec<f64> = group.experiments.iter().map(|e| e.stats.std_ms).collect();
        let spread = rollup(&spreads);
        let std = rollup(&stds);
        mean_spreads.push((group.name.clone(), spread.mean));

        out.push_str(&format!("\n[{}]\n", group.name));
        out.push_str(&format!("  EXPERIMENTS: {}\n", group.experiments.len()));
        out.push_str("  MAX SPREAD (MS):\n");
        out.push_str(&format!("    MEAN:    {:.6}\n", spread.mean));
        out.push_str(&format!("    MEDIAN:  {:.6}\n", spread.median));
        out.push_str(&format!("    MIN:     {:.6}\n", spread.min));
        out.push_str(&format!("    MAX:     {:.6}\n", spread.max));
        out.push_str("  STD DEV (MS):\n");
        out.push_str(&format!("    MEAN:    {:.6}\n", std.mean));
        out.push_str(&format!("    MEDIAN:  {:.6}\n", std.median));
        out.push_str(&format!("    MIN:     {:.6}\n", std.min));
        out.push_str(&format!("    MAX:     {:.6}\n", std.max));
    }

    // ONE BAR PER GROUP, SCALED TO THE WORST GROUP
    let bar_width = 40usize;
    let worst = mean_spreads.iter().map(|(_, m)| *m).fold(0.0f64, f64::max);
    out.push_str("\nMEAN SPREAD COMPARISON:\n");
    for (name, m) in &mean_spreads {
        let bar_len = if worst > 0.0 {
            (m / worst * bar_width as f64) as usize
        } else {
            0
        };
        out.push_str(&format!("  {:<20} {:>14.3} ms |{}\n", name, m, "#".repeat(bar_len)));
    }

    out
}
