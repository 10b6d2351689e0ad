//! CommandDispatcher: the single entry point every command goes through.
//!
//! This is the heart of the host service.  It decodes the wire envelope,
//! validates it (both checks before any side effect), routes the typed
//! command to exactly one capability, and synthesizes the uniform
//! acknowledgement or fault.  The legacy fixed-shape endpoints reuse the same
//! capability methods, so every actuation in the process funnels through this
//! one type and shares its locking and recovery rules.
//!
//! # Recovery
//!
//! The one piece of recovery logic in the system lives here: when a platform
//! call fails while executing an `h_scroll` step, the gesture tracker is
//! unconditionally forced back to idle — releasing the held modifier key —
//! before the fault propagates.  Validation faults never trigger it (nothing
//! was actuated).
//!
//! # Concurrency
//!
//! Side effects execute synchronously, exactly once per valid command, with
//! no retries and no timeout.  The gesture state and the selected volume
//! backend are the two process-wide mutable resources; both sit behind a
//! mutex so concurrent requests cannot interleave a `start`/`end` pair or
//! race two read-modify-write volume adjustments.

use std::sync::Arc;

use deck_core::{
    Command, CommandAck, CommandEnvelope, DispatchError, MediaKey, MouseButton, ScrollPhase,
};
use parking_lot::Mutex;
use tracing::info;

use crate::application::actuate::{ActuationError, InputActuator};
use crate::application::brightness::BrightnessService;
use crate::application::gesture::{GestureTrackError, HScrollTracker};
use crate::application::volume::VolumeControl;

/// Opens the downloads directory in the platform file manager.
#[cfg_attr(test, mockall::automock)]
pub trait FolderOpener: Send + Sync {
    fn open_downloads(&self) -> Result<(), ActuationError>;
}

/// Routes validated commands to the actuation capabilities.
pub struct CommandDispatcher {
    actuator: Arc<dyn InputActuator>,
    volume: Mutex<Box<dyn VolumeControl>>,
    brightness: BrightnessService,
    gesture: HScrollTracker,
    folder: Arc<dyn FolderOpener>,
}

impl CommandDispatcher {
    /// Wires the dispatcher to its capabilities.  The gesture tracker is
    /// created here so its state has exactly one owner.
    pub fn new(
        actuator: Arc<dyn InputActuator>,
        volume: Box<dyn VolumeControl>,
        brightness: BrightnessService,
        folder: Arc<dyn FolderOpener>,
    ) -> Self {
        let gesture = HScrollTracker::new(Arc::clone(&actuator));
        Self {
            actuator,
            volume: Mutex::new(volume),
            brightness,
            gesture,
            folder,
        }
    }

    /// Decodes, validates, and executes one generic command.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnknownCommandType`] / [`DispatchError::InvalidPayload`]
    /// before any side effect; [`DispatchError::Actuation`] when a platform
    /// call fails during execution (for `h_scroll`, after the forced modifier
    /// release).
    pub fn dispatch(&self, envelope: &CommandEnvelope) -> Result<CommandAck, DispatchError> {
        let command = envelope.decode()?;
        info!(command = command.kind(), "executing command");
        self.execute(&command)?;
        Ok(CommandAck::executed(envelope.clone()))
    }

    /// Exhaustive routing: each family invokes exactly one capability.
    fn execute(&self, command: &Command) -> Result<(), DispatchError> {
        match command {
            Command::KeyPress { key } => self.press_key(key),
            Command::Hotkey { keys } => self.hotkey(keys),
            Command::MouseClick { button } => self.click(*button),
            Command::MouseMove { dx, dy } => self.move_pointer(*dx, *dy),
            Command::VScroll { dy } => self.scroll(*dy as i32),
            Command::HScroll { state, dx } => self.hscroll(*state, *dx),
            Command::OpenFolder => self.open_folder(),
            Command::BrightnessControl { change } => self.adjust_brightness(*change).map(|_| ()),
        }
    }

    // ── Capability methods (shared with the legacy endpoints) ─────────────────

    /// Displaces the pointer by `(dx, dy)` pixels.
    pub fn move_pointer(&self, dx: f64, dy: f64) -> Result<(), DispatchError> {
        self.actuator.move_pointer(dx, dy).map_err(actuation)
    }

    /// Clicks one mouse button.
    pub fn click(&self, button: MouseButton) -> Result<(), DispatchError> {
        self.actuator.click(button).map_err(actuation)
    }

    /// Vertical scroll by `clicks` wheel notches.
    pub fn scroll(&self, clicks: i32) -> Result<(), DispatchError> {
        self.actuator.scroll(clicks).map_err(actuation)
    }

    /// Taps a key; the three volume key names route through the volume
    /// abstraction instead of the keyboard backend.
    pub fn press_key(&self, key: &str) -> Result<(), DispatchError> {
        match MediaKey::parse(key).filter(|k| k.is_volume()) {
            Some(volume_key) => self.media_key(volume_key),
            None => self.actuator.tap_key(key).map_err(actuation),
        }
    }

    /// Presses a media key: transport keys go to the keyboard backend,
    /// volume keys to the selected volume backend.
    pub fn media_key(&self, key: MediaKey) -> Result<(), DispatchError> {
        match key {
            MediaKey::VolumeUp => self.volume.lock().volume_up(),
            MediaKey::VolumeDown => self.volume.lock().volume_down(),
            MediaKey::VolumeMute => self.volume.lock().toggle_mute(),
            MediaKey::PlayPause | MediaKey::NextTrack | MediaKey::PrevTrack => {
                self.actuator.tap_key(key.key_name())
            }
        }
        .map_err(actuation)
    }

    /// Presses an ordered chord, key names passed through verbatim.
    pub fn hotkey(&self, keys: &[String]) -> Result<(), DispatchError> {
        self.actuator.press_chord(keys).map_err(actuation)
    }

    /// One horizontal-scroll gesture step, with the forced-release recovery
    /// rule applied on actuation faults.
    pub fn hscroll(&self, phase: ScrollPhase, dx: f64) -> Result<(), DispatchError> {
        match self.gesture.apply(phase, dx) {
            Ok(()) => Ok(()),
            Err(GestureTrackError::Transition(e)) => {
                Err(DispatchError::invalid_payload("h_scroll", e.to_string()))
            }
            Err(GestureTrackError::Actuation(e)) => {
                // Never skip this, whatever the fault path: the modifier key
                // must not be left stuck.
                self.gesture.force_release();
                Err(actuation(e))
            }
        }
    }

    /// Opens the downloads directory.
    pub fn open_folder(&self) -> Result<(), DispatchError> {
        self.folder.open_downloads().map_err(actuation)
    }

    /// Adjusts brightness by a signed delta; returns the level written.
    pub fn adjust_brightness(&self, change: i64) -> Result<u8, DispatchError> {
        self.brightness.adjust(change).map_err(actuation)
    }

    /// Snapshot of the gesture state, for tests and diagnostics.
    pub fn gesture_state(&self) -> deck_core::GestureState {
        self.gesture.state()
    }
}

fn actuation(e: ActuationError) -> DispatchError {
    DispatchError::Actuation(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::brightness::BrightnessService;
    use crate::application::volume::select_volume_backend;
    use crate::infrastructure::audio::mock::{MockAudioEndpoint, MockEndpointHandle};
    use crate::infrastructure::brightness::mock::{BrightnessHandle, MockBrightnessDevice};
    use crate::infrastructure::input::mock::RecordingActuator;

    struct Rig {
        dispatcher: CommandDispatcher,
        actuator: Arc<RecordingActuator>,
        audio: MockEndpointHandle,
        brightness: BrightnessHandle,
    }

    /// Builds a dispatcher over recording mocks: native audio endpoint at
    /// 0.5, brightness at 50, folder opener expecting no calls unless
    /// configured otherwise.
    fn rig() -> Rig {
        rig_with_folder(MockFolderOpener::new())
    }

    fn rig_with_folder(folder: MockFolderOpener) -> Rig {
        let actuator = Arc::new(RecordingActuator::new());
        let endpoint = MockAudioEndpoint::with_volume(0.5);
        let audio = endpoint.handle();
        let device = MockBrightnessDevice::with_level(50);
        let brightness = device.handle();

        let dispatcher = CommandDispatcher::new(
            Arc::clone(&actuator) as Arc<dyn InputActuator>,
            select_volume_backend(
                Some(Box::new(endpoint)),
                Arc::clone(&actuator) as Arc<dyn InputActuator>,
            ),
            BrightnessService::new(Box::new(device)),
            Arc::new(folder),
        );
        Rig { dispatcher, actuator, audio, brightness }
    }

    fn envelope(raw: &str) -> CommandEnvelope {
        serde_json::from_str(raw).expect("test envelope must parse")
    }

    // ── Valid commands invoke exactly one capability ──────────────────────────

    #[test]
    fn test_mouse_move_displaces_pointer_and_acks() {
        let rig = rig();

        let ack = rig
            .dispatcher
            .dispatch(&envelope(r#"{"type":"mouse_move","payload":{"dx":10,"dy":-5}}"#))
            .unwrap();

        assert_eq!(*rig.actuator.moves.lock().unwrap(), vec![(10.0, -5.0)]);
        assert_eq!(ack.status, "command executed");
        assert_eq!(ack.command.kind, "mouse_move");
    }

    #[test]
    fn test_mouse_click_presses_the_named_button() {
        let rig = rig();

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"mouse_click","payload":{"button":"middle"}}"#))
            .unwrap();

        assert_eq!(*rig.actuator.clicks.lock().unwrap(), vec![MouseButton::Middle]);
    }

    #[test]
    fn test_v_scroll_turns_the_wheel() {
        let rig = rig();

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"v_scroll","payload":{"dy":-3}}"#))
            .unwrap();

        assert_eq!(*rig.actuator.scrolls.lock().unwrap(), vec![-3]);
    }

    #[test]
    fn test_key_press_taps_ordinary_keys() {
        let rig = rig();

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"key_press","payload":{"key":"enter"}}"#))
            .unwrap();

        assert_eq!(*rig.actuator.key_downs.lock().unwrap(), vec!["enter".to_string()]);
        assert_eq!(*rig.actuator.key_ups.lock().unwrap(), vec!["enter".to_string()]);
    }

    #[test]
    fn test_key_press_routes_volume_keys_through_the_volume_backend() {
        let rig = rig();

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"key_press","payload":{"key":"volumeup"}}"#))
            .unwrap();

        // The native endpoint moved; the keyboard backend saw nothing.
        assert!(rig.audio.volume() > 0.5);
        assert!(rig.actuator.key_downs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_hotkey_presses_chord_in_order_and_releases_in_reverse() {
        let rig = rig();

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"hotkey","payload":{"keys":["ctrl","shift","t"]}}"#))
            .unwrap();

        assert_eq!(
            *rig.actuator.key_downs.lock().unwrap(),
            vec!["ctrl".to_string(), "shift".to_string(), "t".to_string()]
        );
        assert_eq!(
            *rig.actuator.key_ups.lock().unwrap(),
            vec!["t".to_string(), "shift".to_string(), "ctrl".to_string()]
        );
    }

    #[test]
    fn test_brightness_control_clamps_at_the_floor() {
        // Current 10, change -150: floors at 0.
        let rig = rig();
        rig.brightness.set_level_directly(10);

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"brightness_control","payload":{"change":-150}}"#))
            .unwrap();

        assert_eq!(rig.brightness.level(), 0);
    }

    #[test]
    fn test_open_folder_invokes_the_opener_once() {
        let mut folder = MockFolderOpener::new();
        folder.expect_open_downloads().times(1).returning(|| Ok(()));
        let rig = rig_with_folder(folder);

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"open_folder","payload":{}}"#))
            .unwrap();
    }

    // ── Validation faults perform zero capability calls ───────────────────────

    #[test]
    fn test_unknown_type_executes_nothing() {
        let rig = rig();

        let err = rig
            .dispatcher
            .dispatch(&envelope(r#"{"type":"self_destruct","payload":{}}"#))
            .unwrap_err();

        assert!(matches!(err, DispatchError::UnknownCommandType(_)));
        assert!(rig.actuator.is_untouched());
    }

    #[test]
    fn test_invalid_button_executes_nothing() {
        let rig = rig();

        let err = rig
            .dispatcher
            .dispatch(&envelope(r#"{"type":"mouse_click","payload":{"button":"up"}}"#))
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(rig.actuator.clicks.lock().unwrap().is_empty());
    }

    // ── Gesture routing and recovery ──────────────────────────────────────────

    #[test]
    fn test_h_scroll_start_drag_end_sequence() {
        let rig = rig();

        for raw in [
            r#"{"type":"h_scroll","payload":{"state":"start"}}"#,
            r#"{"type":"h_scroll","payload":{"state":"drag","dx":20}}"#,
            r#"{"type":"h_scroll","payload":{"state":"end"}}"#,
        ] {
            let ack = rig.dispatcher.dispatch(&envelope(raw)).unwrap();
            assert_eq!(ack.status, "command executed");
        }

        assert_eq!(*rig.actuator.key_downs.lock().unwrap(), vec!["shift".to_string()]);
        assert_eq!(*rig.actuator.scrolls.lock().unwrap(), vec![-20]);
        assert_eq!(*rig.actuator.key_ups.lock().unwrap(), vec!["shift".to_string()]);
        assert!(!rig.dispatcher.gesture_state().modifier_held());
    }

    #[test]
    fn test_h_scroll_actuation_fault_forces_modifier_release() {
        let rig = rig();
        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"h_scroll","payload":{"state":"start"}}"#))
            .unwrap();
        rig.actuator.set_should_fail(true);

        let err = rig
            .dispatcher
            .dispatch(&envelope(r#"{"type":"h_scroll","payload":{"state":"drag","dx":5}}"#))
            .unwrap_err();

        // Server-error fault, and the tracker is back to idle with the
        // modifier recorded as released.
        assert!(matches!(err, DispatchError::Actuation(_)));
        assert!(!rig.dispatcher.gesture_state().is_active());
        assert!(!rig.dispatcher.gesture_state().modifier_held());
    }

    #[test]
    fn test_h_scroll_invalid_transition_is_client_error_without_release() {
        let rig = rig();

        let err = rig
            .dispatcher
            .dispatch(&envelope(r#"{"type":"h_scroll","payload":{"state":"drag","dx":5}}"#))
            .unwrap_err();

        // Validation fault: no scroll, no forced release key-up.
        assert!(err.is_client_error());
        assert!(rig.actuator.is_untouched());
    }

    #[test]
    fn test_actuation_fault_on_non_gesture_command_leaves_gesture_alone() {
        let rig = rig();
        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"h_scroll","payload":{"state":"start"}}"#))
            .unwrap();
        rig.actuator.set_should_fail(true);

        rig.dispatcher
            .dispatch(&envelope(r#"{"type":"mouse_move","payload":{"dx":1,"dy":1}}"#))
            .unwrap_err();

        // Recovery is scoped to the h_scroll family only.
        assert!(rig.dispatcher.gesture_state().is_active());
    }

    // ── Media keys ────────────────────────────────────────────────────────────

    #[test]
    fn test_transport_media_key_goes_to_the_keyboard() {
        let rig = rig();

        rig.dispatcher.media_key(MediaKey::PlayPause).unwrap();

        assert_eq!(*rig.actuator.key_downs.lock().unwrap(), vec!["playpause".to_string()]);
        assert_eq!(rig.audio.volume(), 0.5);
    }

    #[test]
    fn test_volume_media_key_goes_to_the_endpoint() {
        let rig = rig();

        rig.dispatcher.media_key(MediaKey::VolumeDown).unwrap();

        assert!(rig.audio.volume() < 0.5);
        assert!(rig.actuator.key_downs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_mute_media_key_toggles_the_endpoint_flag() {
        let rig = rig();

        rig.dispatcher.media_key(MediaKey::VolumeMute).unwrap();

        assert!(rig.audio.muted());
        assert!(rig.actuator.key_downs.lock().unwrap().is_empty());
    }
}
