/// Handle of a registered listener, used to unsubscribe it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered subscription list. Listeners are notified in registration order.
pub(crate) struct ListenerList<L: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<L>)>,
}

impl<L: ?Sized> Default for ListenerList<L> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<L: ?Sized> ListenerList<L> {
    pub(crate) fn add(&mut self, listener: Box<L>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let len = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != len
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &L> {
        self.entries.iter().map(|(_, listener)| listener.as_ref())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
