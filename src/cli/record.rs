// RECORDER SUBCOMMAND
// START -> RESOLVE IDENTITY -> SAMPLE CLOCK -> WRITE RECORD -> EXIT OR IDLE.
// NO TRANSITIONS BACK, NO RETRIES. A FAILED WRITE IS A DIAGNOSTIC AND EXIT 1.

use std::path::Path;
use std::sync::mpsc;

use anyhow::Result;

use stampede::identity;
use stampede::record::{Mode, TimingRecord};

pub fn run_record(shared_dir: &Path, identity: Option<String>, keep_alive: bool) -> Result<()> {
    let mode = if keep_alive {
        Mode::KeepAlive
    } else {
        Mode::Baseline
    };

    println!("STAMPEDE RECORDER ({})", mode.label());

    let identity = identity::resolve(identity)?;
    println!("IDENTITY:    {}", identity);
    println!("SHARED DIR:  {}", shared_dir.display());

    let reading = mode.clock().sample();
    println!("START TIME:  {} ({})", reading.formatted(), mode.clock().label());

    let record = TimingRecord {
        mode,
        identity,
        reading,
    };
    match record.write_to(shared_dir) {
        Ok(path) => println!("WROTE {}", path.display()),
        Err(err) => {
            eprintln!("ERROR: {:#}", err);
            std::process::exit(1);
        }
    }

    if mode == Mode::KeepAlive {
        idle_forever()?;
    }

    Ok(())
}

// BLOCK UNTIL AN EXTERNAL SIGNAL. NO TIMEOUT, NO PERIODIC WAKE -- THE ONLY
// REASON TO KEEP RUNNING IS SO THE ORCHESTRATOR DOES NOT MARK THE UNIT DEAD.
fn idle_forever() -> Result<()> {
    let (tx, rx) = mpsc::channel::<()>();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })?;

    println!("RECORD WRITTEN. KEEPING UNIT ALIVE (SIGNAL TO EXIT)");
    rx.recv().ok();
    Ok(())
}
