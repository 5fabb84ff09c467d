//! Reusable entity slots
//!
//! Missiles, the bomb and explosions are never freed. They park in a `Pool`
//! in the `Ready` state and are handed out again by a linear scan.

/// Slots that can be recycled
pub trait Poolable {
    fn is_ready(&self) -> bool;
    /// Force the slot back to `Ready`
    fn recycle(&mut self);
}

/// Fixed or grow-on-demand set of pooled entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
    growable: bool,
}

impl<T: Poolable> Pool<T> {
    /// Pool that never grows past its initial slots
    pub fn fixed(slots: Vec<T>) -> Self {
        Self {
            slots,
            growable: false,
        }
    }

    /// Pool that allocates a new slot when none is ready
    pub fn growable() -> Self {
        Self {
            slots: Vec::new(),
            growable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_ready()).count()
    }

    /// Index of the first ready slot
    pub fn ready_index(&self) -> Option<usize> {
        self.slots.iter().position(Poolable::is_ready)
    }

    /// First ready slot, if any
    pub fn acquire(&mut self) -> Option<&mut T> {
        let idx = self.ready_index()?;
        self.slots.get_mut(idx)
    }

    /// First ready slot, growing the pool with `make` when allowed
    pub fn acquire_or_grow(&mut self, make: impl FnOnce() -> T) -> Option<&mut T> {
        match self.ready_index() {
            Some(idx) => self.slots.get_mut(idx),
            None if self.growable => {
                self.slots.push(make());
                self.slots.last_mut()
            }
            None => None,
        }
    }

    /// Return every slot to ready
    pub fn recycle_all(&mut self) {
        for slot in &mut self.slots {
            slot.recycle();
        }
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }
}
