//! Scene proxies: the transforms the renderer draws, owned outside the physics world.

use engine_core::Transform;
use glam::{Quat, Vec3};
use std::collections::BTreeMap;

/// Stable handle to a mesh proxy in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(u32);

/// A drawable box. `transform.scale` is the full size of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshProxy {
    pub transform: Transform,
    pub color: [f32; 4],
    /// Ambient spin around Y in radians per second (0 = static).
    pub spin_rate: f32,
}

impl MeshProxy {
    /// Box centered at `center` with the given half extents.
    pub fn cuboid(center: Vec3, half_extents: Vec3, color: [f32; 4]) -> Self {
        Self {
            transform: Transform::from_position(center).with_scale(half_extents * 2.0),
            color,
            spin_rate: 0.0,
        }
    }

    pub fn with_spin(mut self, spin_rate: f32) -> Self {
        self.spin_rate = spin_rate;
        self
    }
}

/// Everything that gets drawn this frame.
#[derive(Debug, Default)]
pub struct Scene {
    proxies: BTreeMap<MeshHandle, MeshProxy>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a proxy and return its handle.
    pub fn insert(&mut self, proxy: MeshProxy) -> MeshHandle {
        let handle = MeshHandle(self.next_id);
        self.next_id += 1;
        self.proxies.insert(handle, proxy);
        handle
    }

    /// Remove a proxy. Returns it if it was present.
    pub fn remove(&mut self, handle: MeshHandle) -> Option<MeshProxy> {
        self.proxies.remove(&handle)
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&MeshProxy> {
        self.proxies.get(&handle)
    }

    pub fn contains(&self, handle: MeshHandle) -> bool {
        self.proxies.contains_key(&handle)
    }

    pub fn set_position(&mut self, handle: MeshHandle, position: Vec3) {
        if let Some(proxy) = self.proxies.get_mut(&handle) {
            proxy.transform.position = position;
        }
    }

    pub fn set_rotation(&mut self, handle: MeshHandle, rotation: Quat) {
        if let Some(proxy) = self.proxies.get_mut(&handle) {
            proxy.transform.rotation = rotation;
        }
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Iterate proxies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &MeshProxy)> {
        self.proxies.iter().map(|(h, p)| (*h, p))
    }

    /// Advance ambient animation (spinning proxies).
    pub fn advance(&mut self, dt: f32) {
        for proxy in self.proxies.values_mut() {
            if proxy.spin_rate != 0.0 {
                proxy.transform.rotate_y(proxy.spin_rate * dt);
            }
        }
    }
}
