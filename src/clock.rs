// CLOCK SAMPLING
// ONE READING PER RECORDER LIFETIME. RAW clock_gettime -- THE RECORD CARRIES
// THE KERNEL'S SEC/NSEC FIELDS VERBATIM, NO Instant/SystemTime INDIRECTION.
//
// BASELINE RUNS SAMPLE CLOCK_REALTIME (COMPARABLE ACROSS MACHINES, MOVES ON
// CLOCK SYNC). KEPT-ALIVE RUNS SAMPLE CLOCK_MONOTONIC SO A RESTART
// MEASUREMENT ISOLATES SCHEDULING LATENCY FROM WALL-CLOCK ADJUSTMENTS.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockKind {
    Realtime,
    Monotonic,
}

impl ClockKind {
    fn id(self) -> libc::clockid_t {
        match self {
            ClockKind::Realtime => libc::CLOCK_REALTIME,
            ClockKind::Monotonic => libc::CLOCK_MONOTONIC,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClockKind::Realtime => "CLOCK_REALTIME",
            ClockKind::Monotonic => "CLOCK_MONOTONIC",
        }
    }

    pub fn sample(self) -> ClockReading {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        unsafe {
            libc::clock_gettime(self.id(), &mut ts);
        }
        ClockReading {
            sec: ts.tv_sec as i64,
            nsec: ts.tv_nsec as i64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockReading {
    pub sec: i64,
    pub nsec: i64,
}

impl ClockReading {
    // <SEC>.<NSEC> WITH NO ZERO PADDING -- "0.0" FOR A ZERO READING.
    // DOWNSTREAM TOOLING SPLITS ON THE RAW FIELDS, NOT ON THIS STRING.
    pub fn formatted(&self) -> String {
        format!("{}.{}", self.sec, self.nsec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_zero_reading() {
        let r = ClockReading { sec: 0, nsec: 0 };
        assert_eq!(r.formatted(), "0.0");
    }

    #[test]
    fn formatted_no_padding() {
        let r = ClockReading { sec: 17, nsec: 5 };
        assert_eq!(r.formatted(), "17.5");
    }

    #[test]
    fn monotonic_sample_nonzero() {
        let r = ClockKind::Monotonic.sample();
        assert!(r.sec > 0 || r.nsec > 0);
    }

    #[test]
    fn monotonic_samples_ordered() {
        let a = ClockKind::Monotonic.sample();
        let b = ClockKind::Monotonic.sample();
        assert!((b.sec, b.nsec) >= (a.sec, a.nsec));
    }

    #[test]
    fn realtime_sample_past_epoch() {
        // SANITY FLOOR: 2020-09-13
        let r = ClockKind::Realtime.sample();
        assert!(r.sec > 1_600_000_000);
    }

    #[test]
    fn labels() {
        assert_eq!(ClockKind::Realtime.label(), "CLOCK_REALTIME");
        assert_eq!(ClockKind::Monotonic.label(), "CLOCK_MONOTONIC");
    }
}
