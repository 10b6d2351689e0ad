//! Key vocabulary: mouse buttons, media keys, and the legacy allow-lists.
//!
//! The generic command path passes chord key names through verbatim; only the
//! legacy single-key endpoints restrict input to an explicit allow-list, kept
//! here so both the HTTP surface and its tests share one source of truth.

use serde::{Deserialize, Serialize};

/// Keys the legacy `/press-key` endpoint accepts.
pub const NAVIGATION_KEYS: [&str; 10] = [
    "esc", "enter", "f11", "backspace", "up", "down", "left", "right", "pageup", "pagedown",
];

/// `true` if `key` is on the legacy single-key allow-list.
pub fn is_navigation_key(key: &str) -> bool {
    NAVIGATION_KEYS.contains(&key)
}

/// The three mouse buttons a click command may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// The lowercase wire name, used in legacy response messages.
    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
        }
    }
}

/// Media keys the legacy `/press-media-key` endpoint accepts.
///
/// The three volume keys never reach the keyboard backend directly: they are
/// routed through the volume abstraction, which may itself fall back to a
/// simulated keypress when no native audio endpoint is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKey {
    PlayPause,
    NextTrack,
    PrevTrack,
    VolumeUp,
    VolumeDown,
    VolumeMute,
}

impl MediaKey {
    /// Parses the lowercase wire name, `None` for anything off the allow-list.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "playpause" => Some(MediaKey::PlayPause),
            "nexttrack" => Some(MediaKey::NextTrack),
            "prevtrack" => Some(MediaKey::PrevTrack),
            "volumeup" => Some(MediaKey::VolumeUp),
            "volumedown" => Some(MediaKey::VolumeDown),
            "volumemute" => Some(MediaKey::VolumeMute),
            _ => None,
        }
    }

    /// The key name handed to the input backend for transport keys, and to
    /// the media-key volume fallback for volume keys.
    pub fn key_name(self) -> &'static str {
        match self {
            MediaKey::PlayPause => "playpause",
            MediaKey::NextTrack => "nexttrack",
            MediaKey::PrevTrack => "prevtrack",
            MediaKey::VolumeUp => "volumeup",
            MediaKey::VolumeDown => "volumedown",
            MediaKey::VolumeMute => "volumemute",
        }
    }

    /// `true` for the three keys that belong to the volume abstraction.
    pub fn is_volume(self) -> bool {
        matches!(self, MediaKey::VolumeUp | MediaKey::VolumeDown | MediaKey::VolumeMute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_allow_list_membership() {
        assert!(is_navigation_key("esc"));
        assert!(is_navigation_key("pagedown"));
        assert!(!is_navigation_key("a"));
        assert!(!is_navigation_key("volumeup"));
    }

    #[test]
    fn test_media_key_parse_covers_the_allow_list() {
        for name in ["playpause", "nexttrack", "prevtrack", "volumeup", "volumedown", "volumemute"]
        {
            let key = MediaKey::parse(name).unwrap();
            assert_eq!(key.key_name(), name);
        }
        assert!(MediaKey::parse("eject").is_none());
    }

    #[test]
    fn test_only_volume_keys_route_to_the_volume_abstraction() {
        assert!(MediaKey::VolumeUp.is_volume());
        assert!(MediaKey::VolumeDown.is_volume());
        assert!(MediaKey::VolumeMute.is_volume());
        assert!(!MediaKey::PlayPause.is_volume());
        assert!(!MediaKey::NextTrack.is_volume());
        assert!(!MediaKey::PrevTrack.is_volume());
    }

    #[test]
    fn test_mouse_button_wire_names_are_lowercase() {
        let b: MouseButton = serde_json::from_str(r#""middle""#).unwrap();
        assert_eq!(b, MouseButton::Middle);
        assert_eq!(b.name(), "middle");
    }
}
