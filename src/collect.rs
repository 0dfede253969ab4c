// COLLECTION CONTRACT
// ALL RECORDS FOR ONE ITERATION LIVE FLAT IN ONE SHARED DIRECTORY, ONE
// <identity>.txt PER RECORDER. ONLY *.txt FILES ARE EVER COPIED OR CLEARED --
// ANYTHING ELSE IN THE DIRECTORY IS LEFT ALONE. DELETION ONLY HAPPENS
// BETWEEN ITERATIONS, WHEN NO RECORDER IS EXPECTED TO BE WRITING.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

fn record_files(shared_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(shared_dir)
        .with_context(|| format!("could not read {}", shared_dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|e| e == "txt").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// COPY EVERY RECORD INTO dest, CREATING IT AS NEEDED. RETURNS THE COPIED
// COUNT -- CHECKING IT AGAINST AN EXPECTED COUNT IS THE CALLER'S (ADVISORY)
// BUSINESS, NEVER A FAILURE HERE.
pub fn collect_records(shared_dir: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest).with_context(|| format!("could not create {}", dest.display()))?;
    let files = record_files(shared_dir)?;
    for src in &files {
        let name = src.file_name().unwrap(); // record_files YIELDS REAL FILES ONLY
        fs::copy(src, dest.join(name))
            .with_context(|| format!("could not copy {}", src.display()))?;
    }
    Ok(files.len())
}

// REMOVE RECORDS FROM THE SHARED DIRECTORY. RETURNS THE REMOVED COUNT.
pub fn clear_records(shared_dir: &Path) -> Result<usize> {
    let files = record_files(shared_dir)?;
    for path in &files {
        fs::remove_file(path).with_context(|| format!("could not remove {}", path.display()))?;
    }
    Ok(files.len())
}
