use std::sync::Arc;

use crate::animation::binding::{PropertyBinding, TargetPath};
use crate::animation::clip::{AnimationClip, TrackData};
use crate::animation::tracks::KeyframeCursor;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Playback instance of a clip: local time, speed and loop behaviour.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Vec<PropertyBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Advances local time by `dt * time_scale` and applies the loop mode.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }
        self.time += dt * self.time_scale;
        self.wrap_time();
    }

    /// Jumps to `time` (seconds), wrapped by the loop mode. Works while
    /// paused, which is how a scrubbed pose is shown.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
        self.wrap_time();
    }

    fn wrap_time(&mut self) {
        let duration = self.clip.duration;
        if duration <= 0.0 {
            self.time = 0.0;
            return;
        }

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.time = self.time.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let double_duration = duration * 2.0;
                let t = self.time.rem_euclid(double_duration);
                self.time = if t > duration { double_duration - t } else { t };
            }
        }
    }

    /// Writes the sampled pose of every bound track into the scene.
    pub fn apply(&mut self, scene: &mut Scene) {
        if !self.enabled || self.weight <= 0.0 {
            return;
        }

        for binding in &self.bindings {
            let Some(track) = self.clip.tracks.get(binding.track_index) else {
                continue;
            };
            let Some(cursor) = self.track_cursors.get_mut(binding.track_index) else {
                continue;
            };
            let Some(node) = scene.get_node_mut(binding.node_handle) else {
                continue;
            };

            match (&track.data, binding.target) {
                (TrackData::Vector3(t), TargetPath::Translation) => {
                    if let Some(value) = t.sample_with_cursor(self.time, cursor) {
                        node.transform.position = value;
                    }
                }
                (TrackData::Vector3(t), TargetPath::Scale) => {
                    if let Some(value) = t.sample_with_cursor(self.time, cursor) {
                        node.transform.scale = value;
                    }
                }
                (TrackData::Quaternion(t), TargetPath::Rotation) => {
                    if let Some(value) = t.sample_with_cursor(self.time, cursor) {
                        node.transform.rotation = value;
                    }
                }
                _ => {}
            }
        }
    }
}
