use std::cell::Cell;
use std::rc::Rc;

/// Guards a `play()` deferred behind an async audio context resume.
///
/// Each deferral takes a [`PlayTicket`]. Cancelling the gate, or arming it
/// again, invalidates every earlier ticket.
#[derive(Clone, Debug, Default)]
pub struct PlayGate {
    generation: Rc<Cell<u64>>,
}

impl PlayGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self) -> PlayTicket {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        PlayTicket {
            gate: self.generation.clone(),
            generation,
        }
    }

    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

#[derive(Debug)]
pub struct PlayTicket {
    gate: Rc<Cell<u64>>,
    generation: u64,
}

impl PlayTicket {
    /// True while no pause, unload or newer deferral has happened since
    /// this ticket was armed.
    pub fn is_current(&self) -> bool {
        self.gate.get() == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_survives_until_cancelled() {
        let gate = PlayGate::new();
        let ticket = gate.arm();
        assert!(ticket.is_current());

        gate.cancel();
        assert!(!ticket.is_current());
    }

    #[test]
    fn pause_before_resume_drops_deferred_play() {
        let gate = PlayGate::new();
        let deferred = gate.clone();
        let ticket = deferred.arm();

        // pause arrives on another handle while the resume is pending
        gate.cancel();

        assert!(!ticket.is_current());
        assert!(gate.arm().is_current());
    }

    #[test]
    fn newer_deferral_supersedes_older_one() {
        let gate = PlayGate::new();
        let first = gate.arm();
        let second = gate.arm();
        assert!(!first.is_current());
        assert!(second.is_current());
    }
}
