use std::cell::Cell;
use std::rc::Rc;

/// Monotonic run counter for one output target.
///
/// Every new run calls [`Generation::begin`]; callbacks scheduled by older
/// runs hold stale tickets and must not touch the target any more.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: Rc<Cell<u64>>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    current: Rc<Cell<u64>>,
}

impl Generation {
    pub fn begin(&self) -> Ticket {
        let id = self.current.get() + 1;
        self.current.set(id);
        Ticket {
            id,
            current: self.current.clone(),
        }
    }

    /// Invalidates every outstanding ticket without starting a new run.
    pub fn cancel(&self) {
        self.current.set(self.current.get() + 1);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.current.get() == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let generation = Generation::default();
        let first = generation.begin();
        assert!(first.is_current());

        let second = generation.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generation = Generation::default();
        let handle = generation.clone();
        let ticket = generation.begin();
        handle.begin();
        assert!(!ticket.is_current());
    }

    #[test]
    fn test_cancel_invalidates_without_new_owner() {
        let generation = Generation::default();
        let ticket = generation.begin();
        generation.cancel();
        assert!(!ticket.is_current());
    }
}
