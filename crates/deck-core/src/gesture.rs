//! The horizontal-scroll gesture state machine.
//!
//! A continuous horizontal-scroll gesture is the single stateful command
//! family: the client sends `start`, a run of `drag` steps, then `end`, and
//! the host holds a modifier key (shift) down for the whole run so the
//! vertical wheel the backend actually turns is interpreted horizontally.
//!
//! ```text
//!            start / hold modifier
//!   Idle ───────────────────────────▶ Active ──┐ drag / scroll(-dx)
//!    ▲                                  │  ▲───┘
//!    └──────────────────────────────────┘
//!            end / release modifier
//! ```
//!
//! This module is the pure half of the tracker: transitions are computed here
//! and the caller performs the returned [`GestureEffect`] against the input
//! backend, committing the new state only when the effect succeeded.  The
//! invariant `modifier_held ⇒ active` therefore holds on every path,
//! including faults — the forced-release edge ([`GestureState::idle`] plus an
//! unconditional modifier release in the caller) resets from any state and is
//! idempotent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The modifier key held for the duration of a gesture.
pub const HSCROLL_MODIFIER: &str = "shift";

/// The `state` field of an `h_scroll` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPhase {
    /// Begin a gesture: press and hold the modifier.
    Start,
    /// One step of horizontal scrolling while the modifier stays held.
    Drag,
    /// Finish the gesture: release the modifier.
    End,
}

/// Transition faults: the phase is not legal from the current state.
///
/// These are validation faults — no transition happens and no effect is
/// returned, so the caller reports them before touching any capability.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    /// `start` received while a gesture is already active.  At most one
    /// gesture can be active at a time.
    #[error("gesture already active")]
    AlreadyActive,
    /// `drag` or `end` received with no active gesture.
    #[error("no gesture active")]
    NotActive,
}

/// The single actuation a transition asks its caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    /// Press and hold the modifier key.
    HoldModifier,
    /// Scroll by this many wheel clicks (sign already inverted from `dx`).
    Scroll(i32),
    /// Release the modifier key.
    ReleaseModifier,
}

/// The cross-request gesture state: whether a gesture is active and whether
/// its modifier key is currently held.
///
/// Process-wide singleton semantics (the client is single and sequential);
/// the host wraps one value of this type in a mutex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureState {
    active: bool,
    modifier_held: bool,
}

impl GestureState {
    /// The resting state: no gesture, modifier released.
    pub const fn idle() -> Self {
        Self {
            active: false,
            modifier_held: false,
        }
    }

    /// `true` while a gesture is between `start` and `end`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `true` while the modifier key is held.  Implies [`Self::is_active`].
    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Computes the transition for one gesture phase.
    ///
    /// Returns the successor state and the effect the caller must actuate.
    /// The caller commits the successor only after the effect succeeds, so a
    /// failed modifier press never records the modifier as held.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError`] for phases that are not legal from the
    /// current state; the state is unchanged and nothing is actuated.
    pub fn apply(&self, phase: ScrollPhase, dx: f64) -> Result<(Self, GestureEffect), GestureError> {
        match (phase, self.active) {
            (ScrollPhase::Start, false) => Ok((
                Self {
                    active: true,
                    modifier_held: true,
                },
                GestureEffect::HoldModifier,
            )),
            (ScrollPhase::Start, true) => Err(GestureError::AlreadyActive),
            // Scroll direction is inverted relative to the drag delta.
            (ScrollPhase::Drag, true) => Ok((*self, GestureEffect::Scroll(-dx as i32))),
            (ScrollPhase::End, true) => Ok((Self::idle(), GestureEffect::ReleaseModifier)),
            (ScrollPhase::Drag | ScrollPhase::End, false) => Err(GestureError::NotActive),
        }
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::idle()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state_holds_the_invariant() {
        let s = GestureState::idle();
        assert!(!s.is_active());
        assert!(!s.modifier_held());
    }

    #[test]
    fn test_start_from_idle_activates_and_holds_modifier() {
        let (next, effect) = GestureState::idle().apply(ScrollPhase::Start, 0.0).unwrap();
        assert!(next.is_active());
        assert!(next.modifier_held());
        assert_eq!(effect, GestureEffect::HoldModifier);
    }

    #[test]
    fn test_drag_scrolls_inverted_delta_and_stays_active() {
        let (active, _) = GestureState::idle().apply(ScrollPhase::Start, 0.0).unwrap();

        let (next, effect) = active.apply(ScrollPhase::Drag, 20.0).unwrap();

        assert_eq!(effect, GestureEffect::Scroll(-20));
        assert_eq!(next, active);
    }

    #[test]
    fn test_end_releases_modifier_and_returns_to_idle() {
        let (active, _) = GestureState::idle().apply(ScrollPhase::Start, 0.0).unwrap();

        let (next, effect) = active.apply(ScrollPhase::End, 0.0).unwrap();

        assert_eq!(effect, GestureEffect::ReleaseModifier);
        assert_eq!(next, GestureState::idle());
    }

    #[test]
    fn test_full_sequence_ends_with_modifier_released() {
        // start, drag*, end — the modifier must end released.
        let mut state = GestureState::idle();
        for (phase, dx) in [
            (ScrollPhase::Start, 0.0),
            (ScrollPhase::Drag, 12.0),
            (ScrollPhase::Drag, -7.0),
            (ScrollPhase::End, 0.0),
        ] {
            let (next, _) = state.apply(phase, dx).unwrap();
            state = next;
        }
        assert!(!state.modifier_held());
        assert!(!state.is_active());
    }

    #[test]
    fn test_start_while_active_is_rejected_without_transition() {
        let (active, _) = GestureState::idle().apply(ScrollPhase::Start, 0.0).unwrap();
        assert_eq!(active.apply(ScrollPhase::Start, 0.0).unwrap_err(), GestureError::AlreadyActive);
    }

    #[test]
    fn test_drag_while_idle_is_rejected() {
        assert_eq!(
            GestureState::idle().apply(ScrollPhase::Drag, 5.0).unwrap_err(),
            GestureError::NotActive
        );
    }

    #[test]
    fn test_end_while_idle_is_rejected() {
        assert_eq!(
            GestureState::idle().apply(ScrollPhase::End, 0.0).unwrap_err(),
            GestureError::NotActive
        );
    }

    #[test]
    fn test_drag_truncates_fractional_delta() {
        let (active, _) = GestureState::idle().apply(ScrollPhase::Start, 0.0).unwrap();
        let (_, effect) = active.apply(ScrollPhase::Drag, 2.9).unwrap();
        assert_eq!(effect, GestureEffect::Scroll(-2));
    }

    #[test]
    fn test_scroll_phase_wire_names() {
        assert_eq!(serde_json::to_string(&ScrollPhase::Start).unwrap(), r#""start""#);
        assert_eq!(serde_json::to_string(&ScrollPhase::Drag).unwrap(), r#""drag""#);
        assert_eq!(serde_json::to_string(&ScrollPhase::End).unwrap(), r#""end""#);
    }
}
