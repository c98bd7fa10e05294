use mt_core::session::{EditorSession, TargetChange};

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
enum EditOp {
    Single(TargetChange),
    Batch(Vec<TargetChange>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditHistory {
    past: Vec<EditOp>,
    future: Vec<EditOp>,
    limit: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl EditHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit,
        }
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn record_single(&mut self, change: TargetChange) -> bool {
        if change.before == change.after {
            return false;
        }
        self.push_op(EditOp::Single(change));
        true
    }

    pub fn record_batch(&mut self, mut changes: Vec<TargetChange>) -> bool {
        changes.retain(|c| c.before != c.after);
        if changes.is_empty() {
            return false;
        }
        self.push_op(EditOp::Batch(changes));
        true
    }

    pub fn undo(&mut self, session: &mut EditorSession) -> bool {
        let Some(op) = self.past.pop() else {
            return false;
        };
        if !apply_op(session, &op, false) {
            self.clear();
            return false;
        }
        self.future.push(op);
        true
    }

    pub fn redo(&mut self, session: &mut EditorSession) -> bool {
        let Some(op) = self.future.pop() else {
            return false;
        };
        if !apply_op(session, &op, true) {
            self.clear();
            return false;
        }
        self.past.push(op);
        true
    }

    fn push_op(&mut self, op: EditOp) {
        self.past.push(op);
        if self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(..overflow);
        }
        self.future.clear();
    }
}

fn apply_op(session: &mut EditorSession, op: &EditOp, forward: bool) -> bool {
    match op {
        EditOp::Single(change) => apply_change(session, change, forward),
        EditOp::Batch(changes) if forward => changes
            .iter()
            .all(|change| apply_change(session, change, true)),
        EditOp::Batch(changes) => changes
            .iter()
            .rev()
            .all(|change| apply_change(session, change, false)),
    }
}

fn apply_change(session: &mut EditorSession, change: &TargetChange, forward: bool) -> bool {
    let value = if forward { &change.after } else { &change.before };
    session.put_target_value(&change.key, value.as_deref())
}
