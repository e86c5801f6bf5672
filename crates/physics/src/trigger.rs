//! Trigger volumes placed by the level builder.

use crate::PhysicsWorld;
use engine_core::Vec3;
use rapier3d::prelude::ColliderHandle;

/// What touching a trigger volume means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    LevelComplete,
    OutOfBounds,
}

/// A sensor collider tagged with its meaning. Only the handle identity is compared at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerVolume {
    pub kind: TriggerKind,
    pub collider: ColliderHandle,
}

impl TriggerVolume {
    pub fn new(kind: TriggerKind, collider: ColliderHandle) -> Self {
        Self { kind, collider }
    }

    /// Whether an overlap handle refers to this volume.
    pub fn matches(&self, handle: ColliderHandle) -> bool {
        self.collider == handle
    }
}

impl PhysicsWorld {
    /// Insert an axis-aligned box trigger volume.
    pub fn add_trigger_volume(
        &mut self,
        kind: TriggerKind,
        center: Vec3,
        half_extents: Vec3,
    ) -> TriggerVolume {
        let collider = self.add_sensor_cuboid(center, 0.0, half_extents);
        log::debug!("{:?} trigger at {:?} (half extents {:?})", kind, center, half_extents);
        TriggerVolume::new(kind, collider)
    }
}
