use super::{MediaEvent, MediaEventKind};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug)]
struct Entry {
    id: ListenerId,
    kind: MediaEventKind,
    tx: Sender<MediaEvent>,
}

/// Subscription table shared by the media backends.
#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Listeners {
    pub fn add(&mut self, kind: MediaEventKind, tx: Sender<MediaEvent>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(Entry { id, kind, tx });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn count(&self, kind: MediaEventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn emit(&self, event: MediaEvent) {
        let kind = event.kind();
        for e in self.entries.iter().filter(|e| e.kind == kind) {
            // a receiver that went away without unsubscribing just misses events
            let _ = e.tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn emit_reaches_only_matching_kind() {
        let mut l = Listeners::default();
        let (tx_time, rx_time) = mpsc::channel();
        let (tx_end, rx_end) = mpsc::channel();
        l.add(MediaEventKind::TimeUpdate, tx_time);
        l.add(MediaEventKind::Ended, tx_end);

        l.emit(MediaEvent::TimeUpdate(1.5));

        assert_eq!(rx_time.try_recv().ok(), Some(MediaEvent::TimeUpdate(1.5)));
        assert!(rx_end.try_recv().is_err());
    }

    #[test]
    fn remove_is_exact_and_reports_misses() {
        let mut l = Listeners::default();
        let (tx, rx) = mpsc::channel();
        let a = l.add(MediaEventKind::Ended, tx.clone());
        let b = l.add(MediaEventKind::Ended, tx);
        assert_ne!(a, b);

        assert!(l.remove(a));
        assert!(!l.remove(a));
        assert_eq!(l.count(MediaEventKind::Ended), 1);

        l.emit(MediaEvent::Ended);
        assert_eq!(rx.try_iter().count(), 1);

        assert!(l.remove(b));
        assert_eq!(l.len(), 0);
    }

    #[test]
    fn emit_survives_dropped_receiver() {
        let mut l = Listeners::default();
        let (tx, rx) = mpsc::channel();
        l.add(MediaEventKind::Ended, tx);
        drop(rx);
        l.emit(MediaEvent::Ended);
        assert_eq!(l.len(), 1);
    }
}
