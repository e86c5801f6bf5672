//! Rendering for VaultRun: scene proxies, the perspective camera, and a wgpu box renderer.

pub mod camera;
pub mod renderer;
pub mod scene;

pub use camera::*;
pub use renderer::*;
pub use scene::*;

// Re-export wgpu for downstream crates
pub use wgpu;
