//! View-slot tracking
//!
//! Maps an unbounded stream of camera poses onto a fixed ring of view
//! buckets for near-field multi-view capture. Structurally an LRU cache
//! keyed by spatial proximity instead of exact key equality.

use std::f32::consts::PI;

use lumar_core::{FrameTime, Pose};

/// Maximum position distance for a pose to match an existing slot
pub const SLOT_POSITION_TOLERANCE: f32 = 0.1;

/// Maximum orientation distance for a pose to match an existing slot, radians
pub const SLOT_ANGLE_TOLERANCE: f32 = PI / 10.0;

/// One occupied view bucket
#[derive(Debug, Clone, Copy)]
pub struct ViewSlot {
    pub pose: Pose,
    pub updated_at: FrameTime,
}

/// Fixed-capacity pose-proximity cache over view indices `[0, V)`
#[derive(Debug, Clone)]
pub struct ViewSlotTracker {
    slots: Vec<ViewSlot>,
    capacity: usize,
}

impl ViewSlotTracker {
    pub fn new(capacity: usize) -> Self {
        ViewSlotTracker {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Assign the pose to a view index
    ///
    /// Match order: nearest-slot refresh, then first empty index, then
    /// eviction of the least-recently-updated slot (ties resolve to the
    /// lowest index).
    pub fn assign(&mut self, pose: &Pose, now: FrameTime) -> usize {
        // A held pose within both tolerances claims the slot
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let near = slot.pose.position.distance(&pose.position) < SLOT_POSITION_TOLERANCE;
            let aligned = slot.pose.rotation.angle_to(&pose.rotation) < SLOT_ANGLE_TOLERANCE;
            if near && aligned {
                slot.pose = *pose;
                slot.updated_at = now;
                return index;
            }
        }

        // Fill the next empty index
        if self.slots.len() < self.capacity {
            self.slots.push(ViewSlot {
                pose: *pose,
                updated_at: now,
            });
            return self.slots.len() - 1;
        }

        // Evict the oldest; min_by_key keeps the first minimum, so ties
        // resolve to the lowest index
        let index = self
            .slots
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.updated_at)
            .map(|(index, _)| index)
            .unwrap_or(0);

        self.slots[index] = ViewSlot {
            pose: *pose,
            updated_at: now,
        };
        index
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slot at `index`, if filled
    pub fn slot(&self, index: usize) -> Option<&ViewSlot> {
        self.slots.get(index)
    }
}
