// ENVIRONMENT PREFLIGHT
// THE HARNESS DRIVES kubectl AND systemctl THROUGH FIXED SHELL COMMANDS.
// VERIFY THE TOOLS EXIST, THE KERNEL HAS CGROUPS, AND THE SHARED DIRECTORY
// TAKES WRITES BEFORE BURNING AN HOUR OF RESTART ITERATIONS.

use std::io::Read;
use std::path::Path;
use std::process::Command;

use anyhow::Result;

fn check_tool(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn check_kernel_config() -> bool {
    let file = match std::fs::File::open("/proc/config.gz") {
        Ok(f) => f,
        Err(_) => {
            println!("  /proc/config.gz       NOT FOUND (SKIPPED)");
            return true;
        }
    };
    let mut decoder = flate2::read::GzDecoder::new(file);
    let mut config = String::new();
    if decoder.read_to_string(&mut config).is_err() {
        println!("  /proc/config.gz       UNREADABLE (SKIPPED)");
        return true;
    }
    let found = config.contains("CONFIG_CGROUPS=y");
    if found {
        println!("  CONFIG_CGROUPS        OK");
    } else {
        println!("  CONFIG_CGROUPS        NOT FOUND -- cgroup process pool unavailable");
    }
    found
}

fn check_shared_dir(shared_dir: &Path) -> bool {
    let probe = shared_dir.join(".stampede-probe");
    match std::fs::write(&probe, b"probe\n") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            println!("  {:<24}WRITABLE", shared_dir.display().to_string());
            true
        }
        Err(err) => {
            println!("  {:<24}NOT WRITABLE ({})", shared_dir.display().to_string(), err);
            false
        }
    }
}

pub fn run_check(shared_dir: &Path) -> Result<()> {
    println!("STAMPEDE ENVIRONMENT CHECK");
    println!();

    let mut ok = true;
    let tools = ["sh", "kubectl", "systemctl"];
    for tool in &tools {
        if check_tool(tool) {
            println!("  {:<24}OK", tool);
        } else {
            println!("  {:<24}MISSING", tool);
            ok = false;
        }
    }
    println!();

    println!("KERNEL CONFIG:");
    if !check_kernel_config() {
        ok = false;
    }
    println!();

    println!("SHARED DIRECTORY:");
    if !check_shared_dir(shared_dir) {
        ok = false;
    }
    println!();

    if ok {
        println!("ALL CHECKS PASSED");
    } else {
        println!("SOME CHECKS FAILED");
        if !check_tool("kubectl") {
            println!("  Install kubectl, or point --restart-cmd at a different orchestrator");
        }
        std::process::exit(1);
    }

    Ok(())
}
