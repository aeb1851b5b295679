use std::time::{Duration, Instant};

use log::{log_enabled, trace, warn, Level};

/// Logs how long a scope took when it is dropped.
///
/// Anything slower than `budget` is reported at warn level, everything else
/// at trace.
pub struct FunctionTimer {
    name: &'static str,
    start: Instant,
    budget: Option<Duration>,
}

impl FunctionTimer {
    pub fn new(name: &'static str) -> Self {
        FunctionTimer {
            name,
            start: Instant::now(),
            budget: None,
        }
    }

    pub fn with_budget(name: &'static str, budget: Duration) -> Self {
        FunctionTimer {
            budget: Some(budget),
            ..Self::new(name)
        }
    }
}

impl Drop for FunctionTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        match self.budget {
            Some(budget) if duration > budget => {
                warn!("{} took {:?} (budget {:?})", self.name, duration, budget);
            }
            _ if log_enabled!(Level::Trace) => trace!("{} took {:?}", self.name, duration),
            _ => {}
        }
    }
}
