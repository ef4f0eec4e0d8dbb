/// A growable table handing out reusable indices.
///
/// Freed slots are recycled before the table grows, so indices stay small
/// for the lifetime of a runtime.
pub(crate) struct Slab<T> {
    /// Slot storage; `None` marks a vacant slot.
    entries: Vec<Option<T>>,

    /// Stack of vacant indices available for reuse.
    free: Vec<usize>,

    /// Number of occupied slots.
    len: usize,
}

impl<T> Slab<T> {
    /// Creates a slab with `capacity` vacant slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let entries = (0..capacity).map(|_| None).collect();
        let free = (0..capacity).rev().collect();

        Self {
            entries,
            free,
            len: 0,
        }
    }

    /// Inserts the value built by `f`, which receives the index the value
    /// will occupy.
    ///
    /// The table doubles in size when no vacant slot is left.
    pub(crate) fn insert_with(&mut self, f: impl FnOnce(usize) -> T) -> usize {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let len = self.entries.len();
                let new_len = if len == 0 { 1 } else { 2 * len };

                self.entries.extend((len..new_len).map(|_| None));
                self.free.extend(((len + 1)..new_len).rev());

                len
            }
        };

        self.entries[index] = Some(f(index));
        self.len += 1;

        index
    }

    /// Returns a reference to the value at `index`, if occupied.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    /// Removes and returns the value at `index`, if occupied.
    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        let item = self.entries.get_mut(index)?.take()?;

        self.free.push(index);
        self.len -= 1;

        Some(item)
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Removes every occupied value, leaving the slab empty but allocated.
    pub(crate) fn drain(&mut self) -> Vec<T> {
        let drained: Vec<T> = self.entries.iter_mut().filter_map(Option::take).collect();

        self.free = (0..self.entries.len()).rev().collect();
        self.len = 0;

        drained
    }
}
