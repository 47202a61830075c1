// src/animation/schedule.rs
//
// Delayed point activations (wave stagger). Entries are plain data owned
// by the field, so dropping the field cancels them.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledActivation {
    pub due: f32,
    pub index: usize,
    pub chain_depth: u32,
}

#[derive(Debug, Default)]
pub struct ActivationSchedule {
    pending: Vec<ScheduledActivation>,
}

impl ActivationSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, due: f32, index: usize, chain_depth: u32) {
        self.pending.push(ScheduledActivation {
            due,
            index,
            chain_depth,
        });
    }

    /// Removes and returns every entry due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: f32) -> Vec<ScheduledActivation> {
        let mut due: Vec<ScheduledActivation> = Vec::new();
        self.pending.retain(|entry| {
            if entry.due <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_in_order() {
        let mut schedule = ActivationSchedule::new();
        schedule.push(100.0, 3, 0);
        schedule.push(50.0, 2, 0);
        schedule.push(150.0, 4, 0);

        let due = schedule.take_due(120.0);
        let indices: Vec<usize> = due.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![2, 3]);
        assert_eq!(schedule.len(), 1);

        assert!(schedule.take_due(120.0).is_empty());
        assert_eq!(schedule.take_due(150.0)[0].index, 4);
        assert!(schedule.is_empty());
    }
}
