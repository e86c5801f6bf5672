//! First-person and third-person cameras plus the avatar proxy they imply.

use crate::movement::flat_look_direction;
use glam::{Vec2, Vec3};
use input::InputState;
use renderer::{Camera, MeshHandle, MeshProxy, Scene};
use serde::{Deserialize, Serialize};

/// Which camera is current and how input is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionMode {
    /// Player camera. Movement keys and mouse look active.
    FirstPerson,
    /// Chase camera. Input ignored, avatar drawn.
    ThirdPersonSpectate,
}

/// Whether the avatar's mesh is in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarVisual {
    Visible(MeshHandle),
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigTuning {
    /// First-person eye above the capsule center.
    pub eye_height: f32,
    /// Third-person camera distance behind the avatar.
    pub third_person_back: f32,
    /// Third-person camera height above the avatar.
    pub third_person_up: f32,
}

impl Default for RigTuning {
    fn default() -> Self {
        Self {
            eye_height: 0.6,
            third_person_back: 4.0,
            third_person_up: 2.0,
        }
    }
}

pub struct CameraRig {
    first_person: Camera,
    third_person: Camera,
    mode: LocomotionMode,
    avatar: AvatarVisual,
    avatar_proxy: MeshProxy,
    tuning: RigTuning,
}

impl CameraRig {
    /// Starts in first person. `avatar_proxy` is what gets drawn in spectate mode.
    pub fn new(tuning: RigTuning, avatar_proxy: MeshProxy, sensitivity: f32) -> Self {
        let mut first_person = Camera::default();
        first_person.sensitivity = sensitivity;
        Self {
            first_person,
            third_person: Camera::default(),
            mode: LocomotionMode::FirstPerson,
            avatar: AvatarVisual::Hidden,
            avatar_proxy,
            tuning,
        }
    }

    pub fn mode(&self) -> LocomotionMode {
        self.mode
    }

    pub fn avatar(&self) -> AvatarVisual {
        self.avatar
    }

    /// The camera to render this frame.
    pub fn current(&self) -> &Camera {
        match self.mode {
            LocomotionMode::FirstPerson => &self.first_person,
            LocomotionMode::ThirdPersonSpectate => &self.third_person,
        }
    }

    pub fn first_person(&self) -> &Camera {
        &self.first_person
    }

    pub fn third_person(&self) -> &Camera {
        &self.third_person
    }

    /// Direction movement is planned against.
    pub fn look_forward(&self) -> Vec3 {
        self.first_person.forward()
    }

    pub fn use_first_person(&mut self, input: &mut InputState, scene: &mut Scene) {
        self.mode = LocomotionMode::FirstPerson;
        if let AvatarVisual::Visible(handle) = self.avatar {
            scene.remove(handle);
        }
        self.avatar = AvatarVisual::Hidden;
        input.enable();
        log::info!("camera: first person");
    }

    pub fn use_third_person(&mut self, input: &mut InputState, scene: &mut Scene) {
        self.mode = LocomotionMode::ThirdPersonSpectate;
        if self.avatar == AvatarVisual::Hidden {
            let mut proxy = self.avatar_proxy;
            proxy.transform.position = self.first_person.position() - Vec3::Y * self.tuning.eye_height;
            self.avatar = AvatarVisual::Visible(scene.insert(proxy));
        }
        input.disable();
        log::info!("camera: third person (spectate)");
    }

    pub fn switch_camera(&mut self, input: &mut InputState, scene: &mut Scene) {
        match self.mode {
            LocomotionMode::FirstPerson => self.use_third_person(input, scene),
            LocomotionMode::ThirdPersonSpectate => self.use_first_person(input, scene),
        }
    }

    /// Mouse look, first person only.
    pub fn apply_mouse(&mut self, delta: Vec2) {
        if self.mode == LocomotionMode::FirstPerson && delta != Vec2::ZERO {
            self.first_person.process_mouse(delta.x, delta.y);
        }
    }

    pub fn set_first_person_fov(&mut self, fov_degrees: f32) {
        self.first_person.fov_degrees = fov_degrees;
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.first_person.set_aspect(width, height);
        self.third_person.set_aspect(width, height);
    }

    /// Follow the avatar: eye for first person, offset plus look-at for third.
    pub fn sync(&mut self, avatar_position: Vec3, scene: &mut Scene) {
        self.first_person.transform.position = avatar_position + Vec3::Y * self.tuning.eye_height;

        let behind = -flat_look_direction(self.first_person.forward()) * self.tuning.third_person_back;
        self.third_person.transform.position = avatar_position + behind + Vec3::Y * self.tuning.third_person_up;
        self.third_person.look_at(avatar_position);

        if let AvatarVisual::Visible(handle) = self.avatar {
            scene.set_position(handle, avatar_position);
            scene.set_rotation(handle, glam::Quat::from_rotation_y(self.first_person.yaw()));
        }
    }

    /// Face the default direction again (respawn).
    pub fn reset_look(&mut self) {
        self.first_person.set_yaw_pitch(0.0, 0.0);
    }
}
