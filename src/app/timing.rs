use std::time::Instant;
use tracing::debug;

// Scoped wall-clock timer: start one at the top of an operation and it
// logs the elapsed time when it goes out of scope.
pub struct OpTimer {
    op: &'static str,
    started: Instant,
}

impl OpTimer {
    pub fn start(op: &'static str) -> OpTimer {
        OpTimer {
            op,
            started: Instant::now(),
        }
    }
}

impl Drop for OpTimer {
    fn drop(&mut self) {
        debug!(
            target: "timing",
            op = self.op,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "operation finished"
        );
    }
}
