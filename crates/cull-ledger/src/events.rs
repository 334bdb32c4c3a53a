//! Observable record of absorbed persistence and sync outcomes.

/// One persistence or sync outcome. Failures listed here are absorbed and
/// never surfaced to the user; the log exists so hosts and tests can still
/// observe them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    LocalSaved,
    LocalReadFailed(String),
    LocalSaveFailed(String),
    RemoteSynced,
    /// No sync container is configured.
    RemoteUnavailable,
    RemoteReadFailed(String),
    RemoteWriteFailed(String),
    /// A strictly newer remote snapshot replaced local state wholesale.
    RemoteApplied,
    /// The remote snapshot was equal or older and was ignored.
    RemoteIgnored,
}

/// Append-only in-memory log of [`StoreEvent`]s.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<StoreEvent>,
}

impl EventLog {
    pub fn record(&mut self, event: StoreEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_drains() {
        let mut log = EventLog::default();
        log.record(StoreEvent::LocalSaved);
        log.record(StoreEvent::RemoteUnavailable);
        assert_eq!(
            log.events(),
            [StoreEvent::LocalSaved, StoreEvent::RemoteUnavailable]
        );

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.events().is_empty());
    }
}
