//! Simulated millisecond clock with cancellable tasks.
//!
//! Nothing here runs on its own: the owner moves time forward and pops the
//! tasks that came due, one at a time, so a firing task may cancel or start
//! others before the next one is looked at.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Tick,
    GiftExpiry,
}

/// Proof that a task was started. Cancelling consumes it, so a handle can't
/// be cancelled twice or kept around after being replaced.
#[derive(Debug, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Task {
    id: u64,
    kind: TaskKind,
    due_ms: f64,
    period_ms: Option<f64>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: f64,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn start_repeating(&mut self, kind: TaskKind, period_ms: f64) -> TaskHandle {
        self.start(kind, period_ms, Some(period_ms))
    }

    pub fn start_once(&mut self, kind: TaskKind, delay_ms: f64) -> TaskHandle {
        self.start(kind, delay_ms, None)
    }

    /// Returns false if the task already fired (one-shot).
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != handle.0);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, handle: &TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.id == handle.0)
    }

    pub fn next_due(&self) -> Option<f64> {
        self.earliest().map(|i| self.tasks[i].due_ms)
    }

    /// Fires the earliest task due at or before `until_ms`, moving the clock
    /// to its due time. Repeating tasks are rescheduled one period later,
    /// one-shots are removed.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<TaskKind> {
        let i = self.earliest()?;
        if self.tasks[i].due_ms > until_ms {
            return None;
        }

        let task = &mut self.tasks[i];
        self.now_ms = self.now_ms.max(task.due_ms);
        let kind = task.kind;

        match task.period_ms {
            Some(period) => task.due_ms += period,
            None => {
                self.tasks.remove(i);
            }
        }

        Some(kind)
    }

    pub fn advance_to(&mut self, ms: f64) {
        self.now_ms = self.now_ms.max(ms);
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start(&mut self, kind: TaskKind, delay_ms: f64, period_ms: Option<f64>) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task { id, kind, due_ms: self.now_ms + delay_ms, period_ms });
        TaskHandle(id)
    }

    // Ties go to the task started first.
    fn earliest(&self) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)
    }
}
