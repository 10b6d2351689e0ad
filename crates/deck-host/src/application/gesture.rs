//! HScrollTracker: the stateful half of the horizontal-scroll gesture.
//!
//! Owns the single piece of cross-request mutable state in the system — one
//! [`GestureState`] behind a mutex — and drives the input actuator with the
//! effects the pure state machine (`deck_core::gesture`) computes.
//!
//! # The invariant this module exists to protect
//!
//! The modifier key must never be left stuck.  Two rules enforce that:
//!
//! 1. A transition is committed only after its actuation succeeded, so a
//!    failed modifier press never records the modifier as held.
//! 2. [`HScrollTracker::force_release`] resets to idle from any state, always
//!    issuing a modifier key-up (even when the tracker believes the modifier
//!    is already up — after a partial failure the physical key may disagree
//!    with the tracked state).  The dispatcher calls this on every actuation
//!    fault in the `h_scroll` family before surfacing the fault.

use std::sync::Arc;

use deck_core::{GestureEffect, GestureError, GestureState, ScrollPhase, HSCROLL_MODIFIER};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::actuate::{ActuationError, InputActuator};

/// Faults from one gesture step, kept separate so the dispatcher can map
/// invalid transitions to a client error and actuation faults to a server
/// error (with forced release).
#[derive(Debug, Error)]
pub enum GestureTrackError {
    /// The phase is not legal from the current gesture state.
    #[error("invalid gesture transition: {0}")]
    Transition(#[from] GestureError),
    /// The input backend failed while actuating the transition's effect.
    #[error(transparent)]
    Actuation(#[from] ActuationError),
}

/// Tracks the horizontal-scroll gesture across requests.
pub struct HScrollTracker {
    actuator: Arc<dyn InputActuator>,
    state: Mutex<GestureState>,
}

impl HScrollTracker {
    /// Creates an idle tracker driving the given actuator.
    pub fn new(actuator: Arc<dyn InputActuator>) -> Self {
        Self {
            actuator,
            state: Mutex::new(GestureState::idle()),
        }
    }

    /// Applies one gesture phase: validates the transition, actuates its
    /// effect, and commits the new state on success.
    ///
    /// The state lock is held across the actuation so two concurrent
    /// requests cannot interleave a `start`/`end` pair.
    ///
    /// # Errors
    ///
    /// [`GestureTrackError::Transition`] when the phase is illegal from the
    /// current state (nothing actuated, state unchanged);
    /// [`GestureTrackError::Actuation`] when the backend call fails (state
    /// unchanged — the dispatcher follows up with [`Self::force_release`]).
    pub fn apply(&self, phase: ScrollPhase, dx: f64) -> Result<(), GestureTrackError> {
        let mut state = self.state.lock();
        let (next, effect) = state.apply(phase, dx)?;

        match effect {
            GestureEffect::HoldModifier => self.actuator.key_down(HSCROLL_MODIFIER)?,
            GestureEffect::Scroll(clicks) => self.actuator.scroll(clicks)?,
            GestureEffect::ReleaseModifier => self.actuator.key_up(HSCROLL_MODIFIER)?,
        }

        debug!(?phase, ?next, "gesture transition committed");
        *state = next;
        Ok(())
    }

    /// Forces the tracker back to idle with the modifier released.
    ///
    /// Idempotent: callable from any state, including idle.  The modifier
    /// key-up is issued unconditionally; a failure to release is logged and
    /// otherwise ignored — the tracked state is reset regardless, so the
    /// next `start` begins from a clean slate.
    pub fn force_release(&self) {
        let mut state = self.state.lock();
        if let Err(e) = self.actuator.key_up(HSCROLL_MODIFIER) {
            warn!("forced modifier release failed: {e}");
        }
        *state = GestureState::idle();
    }

    /// Snapshot of the current gesture state.
    pub fn state(&self) -> GestureState {
        *self.state.lock()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
