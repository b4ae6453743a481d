use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;

/// Number of frames a clip is normalized to, regardless of its duration.
///
/// Frame numbers drive the material fade, so they are resolution
/// independent: frame 500 is always the midpoint of the clip.
pub const FRAME_COUNT: f32 = 1000.0;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(t) => t.end_time(),
            TrackData::Quaternion(t) => t.end_time(),
        }
    }
}

/// A track: target metadata plus keyframe data.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

/// An immutable, named set of tracks. Shared between actions as `Arc`.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Builds a clip whose duration is the latest keyframe of any track.
    #[must_use]
    pub fn new(name: String, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);

        Self {
            name,
            duration,
            tracks,
        }
    }

    /// A clip with no tracks but a fixed duration (timeline-only playback).
    #[must_use]
    pub fn empty(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
            tracks: Vec::new(),
        }
    }

    /// Normalized progress of `time` through the clip, 0 for empty clips.
    #[must_use]
    pub fn progress_at(&self, time: f32) -> f32 {
        if self.duration > 0.0 {
            time / self.duration
        } else {
            0.0
        }
    }

    /// Frame number of `time` on the [`FRAME_COUNT`] scale.
    #[must_use]
    pub fn frame_at(&self, time: f32) -> f32 {
        self.progress_at(time) * FRAME_COUNT
    }
}
