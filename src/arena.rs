// Copyright 2025 Lars Brubaker
// License: MIT
//
// Slot arena with a LIFO free list.
//
// Released slots keep their storage (the codec writes them out verbatim) and
// are only flagged as dead. Claiming prefers the most recently released slot
// and resets it to `T::default()` before handing it out.

/// An arena entry that carries its own liveness flag.
pub trait Slot: Default {
    fn is_live(&self) -> bool;
    fn set_live(&mut self, live: bool);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arena<T> {
    items: Vec<T>,
    free_list: Vec<u32>,
}

impl<T: Slot> Arena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Rebuild an arena from raw storage, e.g. after decoding.
    /// No consistency between `items` and `free_list` is checked here.
    pub fn from_parts(items: Vec<T>, free_list: Vec<u32>) -> Self {
        Self { items, free_list }
    }

    /// Claim a slot, reusing the most recently released one if any.
    pub fn claim(&mut self) -> u32 {
        if let Some(idx) = self.free_list.pop() {
            self.items[idx as usize] = T::default();
            idx
        } else {
            let idx = self.items.len() as u32;
            self.items.push(T::default());
            idx
        }
    }

    /// Return a slot to the free list and mark it dead.
    pub fn release(&mut self, idx: u32) {
        self.items[idx as usize].set_live(false);
        self.free_list.push(idx);
    }

    #[inline]
    pub fn is_live(&self, idx: u32) -> bool {
        self.items.get(idx as usize).is_some_and(Slot::is_live)
    }

    #[inline]
    pub fn get(&self, idx: u32) -> Option<&T> {
        self.items.get(idx as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        self.items.get_mut(idx as usize)
    }

    /// Number of slots, live or released.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.items.len() - self.free_list.len()
    }

    pub fn free_slots(&self) -> &[u32] {
        &self.free_list
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterate `(index, item)` over live slots only.
    pub fn iter_live(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_live())
            .map(|(i, item)| (i as u32, item))
    }
}

impl<T: Slot> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<u32> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: u32) -> &T {
        &self.items[idx as usize]
    }
}

impl<T> std::ops::IndexMut<u32> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut T {
        &mut self.items[idx as usize]
    }
}
