//! Deadline-stamped deferred work, drained from the frame loop.

/// Work the controller defers to a later frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Clear the guilt message, but only if it is still the one with this generation.
    ClearMessage { generation: u64 },
    HideDecline,
    ConfettiBurst,
}

#[derive(Debug)]
struct Scheduled {
    due_ms: f64,
    seq: u64,
    task: Task,
}

/// Pending tasks ordered by deadline, ties broken by insertion order.
#[derive(Debug, Default)]
pub struct TaskQueue {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn schedule(&mut self, due_ms: f64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { due_ms, seq, task });
    }

    /// Remove and return every task due at or before `now_ms`, earliest first.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<Task> {
        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|s| s.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&Task) -> bool) {
        self.pending.retain(|s| keep(&s.task));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|s| s.due_ms).min_by(f64::total_cmp)
    }
}
