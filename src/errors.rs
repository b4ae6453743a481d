//! Error Types
//!
//! This module defines the error types used throughout the player.
//!
//! # Overview
//!
//! The main error type [`PlayerError`] covers all failure modes including:
//! - Asset loading and decoding errors (glTF, HDR images)
//! - Invalid control input (playback speed)
//! - WebXR availability and session errors
//! - Audio element failures
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, PlayerError>`.
//!
//! ```rust,ignore
//! use myth_player::errors::{PlayerError, Result};
//!
//! fn load_asset() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the player.
///
/// Load failures are fatal to playback: the player logs them and never
/// starts. Every other variant is surfaced to the caller and leaves the
/// player in its previous state.
#[derive(Error, Debug)]
pub enum PlayerError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The model contains no animation clip to play.
    #[error("Model has no animation clips: {0}")]
    NoAnimation(String),

    /// The background loader hung up before delivering a result.
    #[error("Asset loader channel closed before completion")]
    LoadChannelClosed,

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Control Errors
    // ========================================================================
    /// Playback speed must be a positive, finite multiplier.
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f32),

    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// The platform does not expose WebXR (or immersive AR).
    #[error("WebXR not supported")]
    XrUnavailable,

    /// The XR runtime refused or failed the session request.
    #[error("XR session error: {0}")]
    XrSessionError(String),

    /// Audio element error (e.g. autoplay rejected).
    #[error("Audio error: {0}")]
    AudioError(String),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for PlayerError {
    fn from(err: image::ImageError) -> Self {
        PlayerError::ImageDecodeError(err.to_string())
    }
}

impl From<gltf::Error> for PlayerError {
    fn from(err: gltf::Error) -> Self {
        PlayerError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, PlayerError>`.
pub type Result<T> = std::result::Result<T, PlayerError>;
