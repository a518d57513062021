/*
Resource Pool
=============

A fixed set of N slots, each either free or owned by a key (a note number).
Every assignment stamps its slot with a monotonically increasing clock, so
the smallest stamp always marks the least-recently assigned slot.

Assignment order
----------------

    1. first slot that is free AND passes the caller's preference test
    2. first free slot
    3. steal the slot with the smallest stamp (first one on ties)

The preference test lets the synth favour voices that have fully decayed
over voices that were released but are still ringing. Everything is a
linear scan in slot order; N is small and the tie-break depends on it.

Release and lookup scan for the first slot holding the key. Assigning a key
that already owns a slot claims a second slot: both stay occupied until
each is released.
*/

#[derive(Debug, Clone, Copy)]
struct Slot<K> {
    occupant: Option<K>,
    stamp: u64,
}

pub struct ResourcePool<K> {
    slots: Box<[Slot<K>]>,
    clock: u64,
}

impl<K: Copy + PartialEq> ResourcePool<K> {
    /// `capacity` is raised to at least one slot.
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity.max(1))
            .map(|_| Slot {
                occupant: None,
                stamp: 0,
            })
            .collect();
        Self { slots, clock: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn assign(&mut self, key: K) -> usize {
        self.assign_preferring(key, |_| false)
    }

    pub fn assign_preferring(&mut self, key: K, prefer: impl Fn(usize) -> bool) -> usize {
        self.clock += 1;

        let index = self
            .slots
            .iter()
            .enumerate()
            .position(|(i, slot)| slot.occupant.is_none() && prefer(i))
            .or_else(|| self.slots.iter().position(|slot| slot.occupant.is_none()))
            .unwrap_or_else(|| self.oldest());

        if self.slots[index].occupant.is_some() {
            tracing::debug!(slot = index, stamp = self.slots[index].stamp, "stealing slot");
        }

        self.slots[index] = Slot {
            occupant: Some(key),
            stamp: self.clock,
        };
        index
    }

    fn oldest(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.stamp)
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Free the first slot holding `key`.
    pub fn release(&mut self, key: K) -> Option<usize> {
        let index = self.lookup(key)?;
        self.slots[index].occupant = None;
        Some(index)
    }

    pub fn lookup(&self, key: K) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.occupant == Some(key))
    }

    pub fn occupant(&self, index: usize) -> Option<K> {
        self.slots.get(index).and_then(|slot| slot.occupant)
    }

    /// Stamp of the most recent assignment to `index` (0 if never assigned).
    pub fn stamp(&self, index: usize) -> u64 {
        self.slots.get(index).map_or(0, |slot| slot.stamp)
    }

    /// Slots currently holding `key`, in slot order.
    pub fn slots_holding(&self, key: K) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.occupant == Some(key))
            .map(|(i, _)| i)
    }

    pub fn occupied(&self) -> impl Iterator<Item = (usize, K)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.occupant.map(|key| (i, key)))
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.occupant = None;
        }
    }
}

/// Number of member channels in an MPE lower zone.
pub const EXPRESSION_CHANNELS: usize = 15;
/// Channel 1 carries global messages; member channels start at 2.
pub const FIRST_EXPRESSION_CHANNEL: u8 = 2;

/// Hands out MPE member channels (2..=16) to notes, least recently used first.
pub struct ChannelAllocator {
    pool: ResourcePool<u8>,
}

impl ChannelAllocator {
    pub fn new() -> Self {
        Self {
            pool: ResourcePool::new(EXPRESSION_CHANNELS),
        }
    }

    pub fn assign(&mut self, note: u8) -> u8 {
        self.pool.assign(note) as u8 + FIRST_EXPRESSION_CHANNEL
    }

    pub fn release(&mut self, note: u8) -> Option<u8> {
        self.pool
            .release(note)
            .map(|slot| slot as u8 + FIRST_EXPRESSION_CHANNEL)
    }

    pub fn lookup(&self, note: u8) -> Option<u8> {
        self.pool
            .lookup(note)
            .map(|slot| slot as u8 + FIRST_EXPRESSION_CHANNEL)
    }

    /// Note currently holding `channel`, if any.
    pub fn note_on_channel(&self, channel: u8) -> Option<u8> {
        let slot = channel.checked_sub(FIRST_EXPRESSION_CHANNEL)?;
        self.pool.occupant(slot as usize)
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

impl Default for ChannelAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_free_slots_in_order() {
        let mut pool = ResourcePool::new(3);
        assert_eq!(pool.assign(60u8), 0);
        assert_eq!(pool.assign(62), 1);
        assert_eq!(pool.assign(64), 2);
    }

    #[test]
    fn steals_least_recently_assigned() {
        let mut pool = ResourcePool::new(2);
        pool.assign(60u8);
        pool.assign(62);
        assert_eq!(pool.assign(64), 0);
        assert_eq!(pool.lookup(60), None);
        assert_eq!(pool.assign(65), 1);
    }

    #[test]
    fn released_slot_is_reused_before_stealing() {
        let mut pool = ResourcePool::new(3);
        pool.assign(60u8);
        pool.assign(62);
        pool.assign(64);
        assert_eq!(pool.release(62), Some(1));
        assert_eq!(pool.assign(67), 1);
    }

    #[test]
    fn release_of_unknown_key_is_not_found() {
        let mut pool = ResourcePool::<u8>::new(2);
        pool.assign(60);
        assert_eq!(pool.release(61), None);
        assert_eq!(pool.lookup(60), Some(0));
    }

    #[test]
    fn preferred_free_slot_wins() {
        let mut pool = ResourcePool::new(3);
        assert_eq!(pool.assign_preferring(60u8, |i| i == 2), 2);
        assert_eq!(pool.assign_preferring(62, |i| i == 2), 0);
    }

    #[test]
    fn preference_never_blocks_stealing() {
        let mut pool = ResourcePool::new(2);
        pool.assign(60u8);
        pool.assign(62);
        assert_eq!(pool.assign_preferring(64, |_| true), 0);
    }

    #[test]
    fn stamps_strictly_increase() {
        let mut pool = ResourcePool::new(2);
        let a = pool.assign(1u8);
        let b = pool.assign(2);
        assert!(pool.stamp(b) > pool.stamp(a));
        let c = pool.assign(3);
        assert_eq!(c, a);
        assert!(pool.stamp(c) > pool.stamp(b));
    }

    #[test]
    fn duplicate_assign_claims_two_slots() {
        let mut pool = ResourcePool::new(3);
        pool.assign(60u8);
        pool.assign(60);
        assert_eq!(pool.slots_holding(60).count(), 2);
        assert_eq!(pool.release(60), Some(0));
        assert_eq!(pool.lookup(60), Some(1));
    }

    #[test]
    fn channels_start_at_two() {
        let mut channels = ChannelAllocator::new();
        assert_eq!(channels.assign(60), 2);
        assert_eq!(channels.assign(61), 3);
        assert_eq!(channels.lookup(61), Some(3));
        assert_eq!(channels.note_on_channel(3), Some(61));
        assert_eq!(channels.note_on_channel(1), None);
    }

    #[test]
    fn sixteenth_note_steals_oldest_channel() {
        let mut channels = ChannelAllocator::new();
        for note in 0..EXPRESSION_CHANNELS as u8 {
            channels.assign(note);
        }
        assert_eq!(channels.assign(100), 2);
        assert_eq!(channels.lookup(0), None);
        assert_eq!(channels.release(0), None);
    }
}
