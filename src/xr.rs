//! Augmented-reality presentation
//!
//! The XR runtime is reached through [`XrSystem`]. Entering AR only switches
//! which scheduler drives frames; the playback logic is unchanged.

use serde::{Deserialize, Serialize};

use crate::errors::{PlayerError, Result};

/// Where frames are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Regular canvas, frames scheduled per display refresh.
    #[default]
    Screen,
    /// Immersive AR session, frames scheduled by the XR runtime.
    Immersive,
}

/// Session type requested from the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrSessionMode {
    ImmersiveAr,
    ImmersiveVr,
}

impl XrSessionMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            XrSessionMode::ImmersiveAr => "immersive-ar",
            XrSessionMode::ImmersiveVr => "immersive-vr",
        }
    }
}

/// How a runtime answered a session request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    /// The session is running.
    Started,
    /// The runtime resolves the request later; see
    /// [`XrSystem::poll_session`].
    Pending,
}

/// Platform XR runtime.
pub trait XrSystem {
    /// Whether the platform exposes an XR runtime at all.
    fn is_available(&self) -> bool;

    /// Requests a session.
    ///
    /// An `Err` means the request could not be issued. Runtimes that create
    /// sessions asynchronously return [`SessionRequest::Pending`] and report
    /// the outcome through [`poll_session`](Self::poll_session); presentation
    /// stays on screen until then.
    fn request_session(&mut self, mode: XrSessionMode) -> Result<SessionRequest>;

    /// Outcome of a pending request, `None` while unresolved. Each outcome
    /// is reported once.
    fn poll_session(&mut self) -> Option<Result<()>> {
        None
    }
}

/// AR session lifecycle for one player.
pub struct ArSession {
    system: Box<dyn XrSystem>,
    mode: PresentationMode,
    pending: bool,
}

impl std::fmt::Debug for ArSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArSession")
            .field("mode", &self.mode)
            .field("pending", &self.pending)
            .finish()
    }
}

impl ArSession {
    #[must_use]
    pub fn new(system: Box<dyn XrSystem>) -> Self {
        Self {
            system,
            mode: PresentationMode::Screen,
            pending: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Whether a session request is waiting on the runtime.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests an immersive AR session and returns the presentation mode
    /// now in effect. That is still [`PresentationMode::Screen`] while an
    /// asynchronous request is pending.
    ///
    /// Fails with [`PlayerError::XrUnavailable`] when the platform has no
    /// XR runtime; callers show that to the user. No retry.
    pub fn enter(&mut self) -> Result<PresentationMode> {
        if self.mode == PresentationMode::Immersive || self.pending {
            return Ok(self.mode);
        }
        if !self.system.is_available() {
            log::warn!("AR requested but WebXR is not available");
            return Err(PlayerError::XrUnavailable);
        }

        match self.system.request_session(XrSessionMode::ImmersiveAr)? {
            SessionRequest::Started => self.start(),
            SessionRequest::Pending => {
                log::debug!("AR session requested, waiting for the runtime");
                self.pending = true;
            }
        }
        Ok(self.mode)
    }

    /// Resolves a pending request. Returns the new mode when it changed.
    ///
    /// A rejected request leaves the player on screen.
    pub fn poll(&mut self) -> Option<PresentationMode> {
        if !self.pending {
            return None;
        }
        let outcome = self.system.poll_session()?;
        self.pending = false;
        match outcome {
            Ok(()) => self.start(),
            Err(e) => {
                log::warn!("AR session was not started: {e}");
                self.mode = PresentationMode::Screen;
            }
        }
        Some(self.mode)
    }

    fn start(&mut self) {
        self.mode = PresentationMode::Immersive;
        log::info!("Entered immersive AR presentation");
    }

    /// Runtime ended the session; fall back to screen presentation.
    pub fn on_session_end(&mut self) -> PresentationMode {
        if self.mode == PresentationMode::Immersive {
            log::info!("XR session ended, returning to screen presentation");
        }
        self.pending = false;
        self.mode = PresentationMode::Screen;
        self.mode
    }
}

/// XR runtime for platforms without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoXr;

impl XrSystem for NoXr {
    fn is_available(&self) -> bool {
        false
    }

    fn request_session(&mut self, _mode: XrSessionMode) -> Result<SessionRequest> {
        Err(PlayerError::XrUnavailable)
    }
}
