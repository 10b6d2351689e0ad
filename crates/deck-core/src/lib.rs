//! # deck-core
//!
//! Shared library for Remote Deck containing the command model, the
//! horizontal-scroll gesture state machine, bounded level arithmetic, and the
//! key vocabulary tables.
//!
//! This crate is used by the host-side server binary (`deck-host`).
//! It has zero dependencies on OS APIs, HTTP frameworks, or async runtimes.
//!
//! # Architecture overview
//!
//! Remote Deck lets a companion mobile app drive the host machine's pointer,
//! keyboard, media, audio, and display-brightness controls over the local
//! network.  The client submits tagged commands; the host validates them,
//! routes each one to exactly one actuation capability, and answers with a
//! uniform acknowledgement or fault.
//!
//! This crate (`deck-core`) is the pure-domain foundation.  It defines:
//!
//! - **`command`** – The closed [`Command`] variant type, the raw wire
//!   envelope it is decoded from, and the [`DispatchError`] fault taxonomy.
//!
//! - **`gesture`** – The `Idle`/`Active` state machine for continuous
//!   horizontal-scroll gestures, including the forced-release edge that
//!   guarantees the held modifier key is never left stuck after a fault.
//!
//! - **`levels`** – Bounded arithmetic for the two clamped scalar levels the
//!   host owns: audio volume in `[0.0, 1.0]` and brightness in `[0, 100]`.
//!
//! - **`keys`** / **`keymap`** – Allow-lists for the legacy fixed-shape
//!   endpoints, the media-key vocabulary, and the key-name → Windows Virtual
//!   Key translation table used by the Windows input backend.

pub mod command;
pub mod gesture;
pub mod keymap;
pub mod keys;
pub mod levels;

// Re-export the most-used types at the crate root so callers can write
// `deck_core::Command` instead of `deck_core::command::request::Command`.
pub use command::error::{CommandAck, DispatchError};
pub use command::request::{Command, CommandEnvelope};
pub use gesture::{GestureEffect, GestureError, GestureState, ScrollPhase, HSCROLL_MODIFIER};
pub use keys::{MediaKey, MouseButton};
