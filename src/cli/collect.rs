// COLLECT SUBCOMMAND -- ONE ITERATION OF THE COLLECTION CONTRACT

use std::path::Path;

use anyhow::Result;

use stampede::collect;

pub fn run_collect(
    shared_dir: &Path,
    output: &Path,
    expected: Option<usize>,
    clear: bool,
) -> Result<()> {
    let copied = collect::collect_records(shared_dir, output)?;
    println!("COLLECTED {} RECORD(S) INTO {}", copied, output.display());

    if let Some(expected) = expected {
        if copied < expected {
            // ADVISORY ONLY -- THE RUN PROCEEDS WITH MISSING DATA POINTS
            println!("WARNING: EXPECTED {} RECORD(S), FOUND {}", expected, copied);
        }
    }

    if clear {
        let removed = collect::clear_records(shared_dir)?;
        println!("CLEARED {} RECORD(S) FROM {}", removed, shared_dir.display());
    }

    Ok(())
}
