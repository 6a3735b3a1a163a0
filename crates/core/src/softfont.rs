//! Slot allocation for downloaded (soft) fonts.

use bitvec::prelude::*;

/// Number of allocatable soft-font slots.
pub const SOFT_FONT_SLOTS: usize = 256;

/// Occupancy bitmap, one bit per slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftFontRegistry {
    slots: BitArray<[u64; 4], Lsb0>,
}

impl Default for SoftFontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftFontRegistry {
    pub fn new() -> Self {
        Self {
            slots: BitArray::new([0; 4]),
        }
    }

    /// Claims the lowest free slot.
    ///
    /// A full table hands out slot 0 again rather than failing.
    pub fn allocate(&mut self) -> usize {
        match self.slots.first_zero() {
            Some(slot) => {
                self.slots.set(slot, true);
                slot
            }
            None => {
                log::warn!("soft font table full, reusing slot 0");
                0
            }
        }
    }

    /// Frees `slot`.
    ///
    /// Returns `true` when the freed slot was the highest occupied one or the
    /// table is now empty, which is when callers re-evaluate the soft-font
    /// source. Freeing a slot that is not occupied changes nothing.
    pub fn release(&mut self, slot: usize) -> bool {
        if slot >= SOFT_FONT_SLOTS {
            log::warn!("soft font slot {} out of range", slot);
            return false;
        }
        if !self.is_allocated(slot) {
            return false;
        }
        self.slots.set(slot, false);
        match self.slots.last_one() {
            None => true,
            Some(highest) => slot > highest,
        }
    }

    pub fn is_allocated(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|bit| *bit)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.not_any()
    }
}
