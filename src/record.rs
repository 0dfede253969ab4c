// TIMING RECORD -- THE ONE ENTITY IN THE SYSTEM
// A RECORDER WRITES EXACTLY ONE, KEYED BY ITS OWN IDENTITY. LAST WRITE WINS.
// THE COLLECTOR IS THE ONLY DELETER. key=value LINES, ONE FILE PER IDENTITY,
// SO CONCURRENT SIBLINGS NEVER NEED A LOCK -- THE NAMESPACE IS THE LOCK.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::clock::{ClockKind, ClockReading};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Baseline,
    KeepAlive,
}

impl Mode {
    // BASELINE RECORDS ARE KEYED `process`, KEPT-ALIVE RECORDS `pod`
    pub fn id_key(self) -> &'static str {
        match self {
            Mode::Baseline => "process",
            Mode::KeepAlive => "pod",
        }
    }

    pub fn clock(self) -> ClockKind {
        match self {
            Mode::Baseline => ClockKind::Realtime,
            Mode::KeepAlive => ClockKind::Monotonic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Baseline => "BASELINE",
            Mode::KeepAlive => "KEEP-ALIVE",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TimingRecord {
    pub mode: Mode,
    pub identity: String,
    pub reading: ClockReading,
}

impl TimingRecord {
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.identity)
    }

    pub fn render(&self) -> String {
        format!(
            "{}={}\nstart_time_sec={}\nstart_time_nsec={}\nstart_time_formatted={}\n",
            self.mode.id_key(),
            self.identity,
            self.reading.sec,
            self.reading.nsec,
            self.reading.formatted(),
        )
    }

    // OVERWRITES ANY EXISTING RECORD FOR THIS IDENTITY. AN UNOPENABLE
    // DESTINATION IS FATAL TO THE RECORDER -- NO RETRY, NO PARTIAL FILE.
    pub fn write_to(&self, shared_dir: &Path) -> Result<PathBuf> {
        let path = shared_dir.join(self.file_name());
        let mut file = File::create(&path)
            .with_context(|| format!("could not write to {}", path.display()))?;
        file.write_all(self.render().as_bytes())
            .with_context(|| format!("could not write to {}", path.display()))?;
        Ok(path)
    }
}

// ANALYZER-SIDE VIEW OF A RECORD FILE. THE IDENTITY LINE IS OPTIONAL (THE
// FILE NAME CARRIES IT TOO); THE TWO TIME FIELDS ARE NOT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRecord {
    pub identity: Option<String>,
    pub sec: u64,
    pub nsec: u64,
}

impl ParsedRecord {
    // MILLISECONDS, THE ANALYSIS UNIT
    pub fn start_ms(&self) -> f64 {
        self.sec as f64 * 1000.0 + self.nsec as f64 / 1_000_000.0
    }
}

pub fn parse(content: &str) -> Result<ParsedRecord> {
    let identity = Regex::new(r"(?m)^(?:pod|process)=(.+)$")
        .unwrap()
        .captures(content)
        .map(|c| c[1].trim().to_string());

    Ok(ParsedRecord {
        identity,
        sec: int_field(content, "start_time_sec")?,
        nsec: int_field(content, "start_time_nsec")?,
    })
}

fn int_field(content: &str, key: &str) -> Result<u64> {
    let re = Regex::new(&format!(r"{}=(\d+)", key)).unwrap();
    let caps = re
        .captures(content)
        .with_context(|| format!("missing {} field", key))?;
    caps[1]
        .parse::<u64>()
        .with_context(|| format!("bad {} value", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(mode: Mode, identity: &str, sec: i64, nsec: i64) -> TimingRecord {
        TimingRecord {
            mode,
            identity: identity.to_string(),
            reading: ClockReading { sec, nsec },
        }
    }

    #[test]
    fn render_exact() {
        let r = rec(Mode::KeepAlive, "host-7", 12, 34);
        assert_eq!(
            r.render(),
            "pod=host-7\nstart_time_sec=12\nstart_time_nsec=34\nstart_time_formatted=12.34\n"
        );
    }

    #[test]
    fn baseline_key_and_clock() {
        assert_eq!(Mode::Baseline.id_key(), "process");
        assert_eq!(Mode::Baseline.clock(), ClockKind::Realtime);
        assert_eq!(Mode::KeepAlive.id_key(), "pod");
        assert_eq!(Mode::KeepAlive.clock(), ClockKind::Monotonic);
    }

    #[test]
    fn file_name_is_identity_dot_txt() {
        assert_eq!(rec(Mode::Baseline, "host-7", 0, 0).file_name(), "host-7.txt");
    }

    #[test]
    fn parse_recovers_rendered_fields() {
        let r = rec(Mode::KeepAlive, "host-7", 12, 500_000_000);
        let parsed = parse(&r.render()).unwrap();
        assert_eq!(parsed.identity.as_deref(), Some("host-7"));
        assert_eq!(parsed.sec, 12);
        assert_eq!(parsed.nsec, 500_000_000);
    }

    #[test]
    fn start_ms_conversion() {
        let parsed = ParsedRecord {
            identity: None,
            sec: 12,
            nsec: 500_000_000,
        };
        assert!((parsed.start_ms() - 12_500.0).abs() < 1e-9);
    }

    #[test]
    fn parse_accepts_missing_identity_line() {
        let parsed = parse("start_time_sec=3\nstart_time_nsec=9\n").unwrap();
        assert_eq!(parsed.identity, None);
        assert_eq!(parsed.sec, 3);
        assert_eq!(parsed.nsec, 9);
    }

    #[test]
    fn parse_rejects_truncated_record() {
        assert!(parse("pod=host-7\n").is_err());
        assert!(parse("pod=host-7\nstart_time_sec=3\n").is_err());
    }
}
