use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Rate limit for one repeated log line, owned by whoever emits it.
///
/// The gateway keeps one for its 401 warning so a burst of rejected
/// requests (every open view refetching at once) logs a single line plus a
/// count of what was swallowed.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    state: Mutex<ThrottleState>,
}

#[derive(Debug, Default)]
struct ThrottleState {
    last_emitted: Option<Instant>,
    suppressed: u64,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: Mutex::new(ThrottleState::default()),
        }
    }

    /// `Some(suppressed)` when the line should be written now, with the
    /// number of calls swallowed since the last one; `None` inside the
    /// window.
    pub fn should_emit(&self) -> Option<u64> {
        self.check(Instant::now())
    }

    fn check(&self, now: Instant) -> Option<u64> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.last_emitted {
            Some(at) if now.duration_since(at) < self.interval => {
                state.suppressed += 1;
                None
            }
            _ => {
                state.last_emitted = Some(now);
                Some(std::mem::take(&mut state.suppressed))
            }
        }
    }
}
