//! Per-template instance storage with slot reuse.

use serde::{Deserialize, Serialize};

use super::components::{TemplateId, UnitInstance};

/// What to do when every instance of a template is in use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum PoolGrowth {
    /// Allocate one more instance from the prototype.
    #[default]
    Grow,
    /// Refuse with `PoolExhausted`.
    Fail,
}

struct Slot<U> {
    unit: U,
    generation: u32,
    in_use: bool,
}

/// Pre-built instances of a single template.
pub struct InstancePool<U> {
    template: TemplateId,
    prototype: U,
    slots: Vec<Slot<U>>,
    free: Vec<usize>,
}

impl<U: UnitInstance> InstancePool<U> {
    /// Build `size` deactivated copies of `prototype`.
    pub fn new(template: TemplateId, mut prototype: U, size: usize) -> Self {
        prototype.deactivate();
        let slots = (0..size)
            .map(|_| Slot {
                unit: prototype.clone(),
                generation: 0,
                in_use: false,
            })
            .collect();
        // Reversed so slot 0 is handed out first.
        let free = (0..size).rev().collect();

        Self {
            template,
            prototype,
            slots,
            free,
        }
    }

    pub fn template(&self) -> &TemplateId {
        &self.template
    }

    /// Total instances ever created for this template.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Reserve a slot and reset its unit. The unit stays deactivated.
    ///
    /// Returns the slot index and its new generation, or `None` when the pool is
    /// exhausted and `growth` is [`PoolGrowth::Fail`].
    pub fn acquire(&mut self, growth: PoolGrowth) -> Option<(usize, u32)> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => match growth {
                PoolGrowth::Grow => {
                    self.slots.push(Slot {
                        unit: self.prototype.clone(),
                        generation: 0,
                        in_use: false,
                    });
                    self.slots.len() - 1
                }
                PoolGrowth::Fail => return None,
            },
        };

        let slot = &mut self.slots[index];
        debug_assert!(!slot.in_use, "free list handed out a slot that is in use");
        slot.unit.reset_from(&self.prototype);
        slot.generation = slot.generation.wrapping_add(1);
        slot.in_use = true;
        Some((index, slot.generation))
    }

    /// Deactivate the unit in `index` and put the slot back on the free list.
    pub fn release(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if !slot.in_use {
            return false;
        }
        slot.unit.deactivate();
        slot.in_use = false;
        self.free.push(index);
        true
    }

    pub fn get(&self, index: usize, generation: u32) -> Option<&U> {
        self.slots
            .get(index)
            .filter(|slot| slot.in_use && slot.generation == generation)
            .map(|slot| &slot.unit)
    }

    pub fn get_mut(&mut self, index: usize, generation: u32) -> Option<&mut U> {
        self.slots
            .get_mut(index)
            .filter(|slot| slot.in_use && slot.generation == generation)
            .map(|slot| &mut slot.unit)
    }

    /// Number of units in this pool that report themselves active.
    pub fn active_units(&self) -> usize {
        self.slots.iter().filter(|slot| slot.unit.is_active()).count()
    }
}
