//! Process CPU-time measurement.
//!
//! # Semantics
//!
//! **CPU time vs wall time**: the benchmark reports processor time consumed by the
//! whole process (`CLOCK_PROCESS_CPUTIME_ID`), which excludes time spent blocked on
//! I/O. Wall-clock time is captured alongside it for comparison.
//!
//! **Syscall cost**: reading the clock is a syscall. It is read exactly twice per
//! run, around the repetition loop.
//!
//! # Platform Support
//!
//! Unix platforms read the process CPU clock. Elsewhere the CPU readings are zero
//! and only the wall-clock duration is meaningful.

use std::time::{Duration, Instant};

/// Processor time consumed by this process so far.
///
/// Best-effort: if the clock cannot be read, returns zero.
#[cfg(unix)]
pub fn process_cpu_time() -> Duration {
    // SAFETY: timespec is plain old data; all-zero is a valid value.
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        return Duration::ZERO;
    }
    timespec_to_duration(ts)
}

#[cfg(not(unix))]
pub fn process_cpu_time() -> Duration {
    Duration::ZERO
}

/// Converts a `libc::timespec` to `Duration`.
///
/// Negative seconds become 0; nanoseconds are clamped to [0, 999_999_999].
#[cfg(unix)]
#[inline]
fn timespec_to_duration(ts: libc::timespec) -> Duration {
    let secs = if ts.tv_sec < 0 { 0 } else { ts.tv_sec as u64 };
    let nanos = (ts.tv_nsec as i64).clamp(0, 999_999_999) as u32;
    Duration::new(secs, nanos)
}

/// Brackets a timed region.
#[derive(Debug)]
pub struct Stopwatch {
    cpu_start: Duration,
    wall_start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            cpu_start: process_cpu_time(),
            wall_start: Instant::now(),
        }
    }

    pub fn stop(self) -> TimingSample {
        let wall = self.wall_start.elapsed();
        TimingSample {
            cpu_start: self.cpu_start,
            cpu_end: process_cpu_time(),
            wall,
        }
    }
}

/// CPU readings taken around the timed region, plus its wall-clock duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimingSample {
    pub cpu_start: Duration,
    pub cpu_end: Duration,
    pub wall: Duration,
}

impl TimingSample {
    /// CPU time spent inside the timed region. Never negative.
    #[inline]
    pub fn cpu_elapsed(&self) -> Duration {
        self.cpu_end.saturating_sub(self.cpu_start)
    }

    /// CPU time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.cpu_elapsed().as_secs_f64()
    }

    /// Wall-clock time in seconds
    pub fn wall_secs(&self) -> f64 {
        self.wall.as_secs_f64()
    }
}
