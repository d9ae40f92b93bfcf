//! Fixed-capacity storage for short-lived entities.
//!
//! Slots are never freed: an entity that goes inactive stays in place and is
//! reused by the next `acquire`. The backing vector grows lazily up to the
//! capacity and never beyond it.

pub trait Poolable: Default {
    fn is_active(&self) -> bool;
}

#[derive(Debug)]
pub struct Pool<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T: Poolable> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Pool {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// First inactive slot, or a freshly appended one while below capacity.
    /// `None` means the pool is exhausted and the caller drops its request.
    pub fn acquire(&mut self) -> Option<&mut T> {
        if let Some(index) = self.slots.iter().position(|slot| !slot.is_active()) {
            return self.slots.get_mut(index);
        }
        if self.slots.len() < self.capacity {
            self.slots.push(T::default());
            return self.slots.last_mut();
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|slot| slot.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Number of allocated slots, active or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Slot {
        active: bool,
        tag: u32,
    }

    impl Poolable for Slot {
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn take(pool: &mut Pool<Slot>, tag: u32) -> bool {
        match pool.acquire() {
            Some(slot) => {
                slot.active = true;
                slot.tag = tag;
                true
            }
            None => false,
        }
    }

    #[test]
    fn grows_until_capacity_then_refuses() {
        let mut pool = Pool::with_capacity(2);
        assert!(take(&mut pool, 1));
        assert!(take(&mut pool, 2));
        assert!(!take(&mut pool, 3));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn reuses_first_inactive_slot() {
        let mut pool = Pool::with_capacity(3);
        take(&mut pool, 1);
        take(&mut pool, 2);
        take(&mut pool, 3);
        pool.get_mut(1).unwrap().active = false;
        assert!(take(&mut pool, 9));
        assert_eq!(pool.get(1).unwrap().tag, 9);
        assert_eq!(pool.len(), 3);
    }
}
