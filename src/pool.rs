/// Ordered storage for short-lived entities.
///
/// Entities are never removed while the pool is being walked.  They raise a
/// flag instead and a single `compact` pass drops them afterwards, keeping
/// the survivors in their original order.

use std::collections::VecDeque;

/// Anything that can ask to be dropped from its pool.
pub trait Expire {
    fn is_marked(&self) -> bool;
    fn mark(&mut self);
}

#[derive(Clone, Debug)]
pub struct EntityPool<T> {
    items: VecDeque<T>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        EntityPool {
            items: VecDeque::new(),
        }
    }
}

impl<T: Expire> EntityPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the back (oldest first).
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Insert at the front (newest first).
    pub fn push_front(&mut self, item: T) {
        self.items.push_front(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Entities whose removal flag is still down.
    pub fn live(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| !item.is_marked())
    }

    pub fn update_all(&mut self, mut f: impl FnMut(&mut T)) {
        for item in self.items.iter_mut() {
            f(item);
        }
    }

    /// Drop everything past `cap`, i.e. the tail.
    pub fn truncate(&mut self, cap: usize) {
        self.items.truncate(cap);
    }

    /// Drop every marked entity.  Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_marked());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Dot {
        id: u32,
        gone: bool,
    }

    impl Expire for Dot {
        fn is_marked(&self) -> bool {
            self.gone
        }
        fn mark(&mut self) {
            self.gone = true;
        }
    }

    fn dot(id: u32) -> Dot {
        Dot { id, gone: false }
    }

    fn ids(pool: &EntityPool<Dot>) -> Vec<u32> {
        pool.iter().map(|d| d.id).collect()
    }

    #[test]
    fn push_front_keeps_newest_first() {
        let mut pool = EntityPool::new();
        pool.push_front(dot(1));
        pool.push_front(dot(2));
        pool.push(dot(0));
        assert_eq!(ids(&pool), vec![2, 1, 0]);
    }

    #[test]
    fn truncate_drops_tail() {
        let mut pool = EntityPool::new();
        for id in 0..5 {
            pool.push_front(dot(id));
        }
        pool.truncate(3);
        assert_eq!(ids(&pool), vec![4, 3, 2]);
    }

    #[test]
    fn live_skips_marked() {
        let mut pool = EntityPool::new();
        pool.push(dot(1));
        pool.push(Dot { id: 2, gone: true });
        assert_eq!(pool.live().count(), 1);
        assert_eq!(pool.len(), 2);
    }
}
