//! Key-name → Windows Virtual Key (VK) code translation.
//!
//! Clients name keys with the lowercase strings of the original protocol
//! (`"enter"`, `"pageup"`, `"volumemute"`, single characters like `"a"`).
//! The Windows input backend needs `VK_*` codes from `<winuser.h>` to feed
//! `SendInput`, so this table maps names to codes.
//!
//! Reference: Windows Virtual-Key Codes,
//! <https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes>
//!
//! Chord key names travel verbatim from the client, so lookups are
//! case-insensitive and unmapped names are a translation failure the backend
//! reports, never a silent no-op.

/// Translates a client key name to a Windows VK code.
///
/// Returns `None` for names with no VK mapping.
pub fn windows_vk(name: &str) -> Option<u16> {
    let lower = name.to_ascii_lowercase();

    // Single character: letters map to VK_A..VK_Z (0x41..), digits to 0x30..
    if lower.len() == 1 {
        let c = lower.as_bytes()[0];
        if c.is_ascii_lowercase() {
            return Some(u16::from(c) - u16::from(b'a') + 0x41);
        }
        if c.is_ascii_digit() {
            return Some(u16::from(c) - u16::from(b'0') + 0x30);
        }
    }

    // Function keys f1..f24 map to VK_F1 (0x70) onward.
    if let Some(n) = lower.strip_prefix('f').and_then(|s| s.parse::<u16>().ok()) {
        if (1..=24).contains(&n) {
            return Some(0x70 + n - 1);
        }
    }

    let vk: u16 = match lower.as_str() {
        // ── Modifiers ─────────────────────────────────────────────────────────
        "shift" => 0x10,
        "ctrl" | "control" => 0x11,
        "alt" => 0x12,
        "win" | "winleft" | "super" | "cmd" => 0x5B,

        // ── Whitespace and editing ────────────────────────────────────────────
        "enter" | "return" => 0x0D,
        "tab" => 0x09,
        "space" => 0x20,
        "backspace" => 0x08,
        "delete" | "del" => 0x2E,
        "insert" => 0x2D,
        "esc" | "escape" => 0x1B,

        // ── Navigation ────────────────────────────────────────────────────────
        "up" => 0x26,
        "down" => 0x28,
        "left" => 0x25,
        "right" => 0x27,
        "home" => 0x24,
        "end" => 0x23,
        "pageup" => 0x21,
        "pagedown" => 0x22,

        // ── Media transport and volume ────────────────────────────────────────
        "playpause" => 0xB3,
        "nexttrack" => 0xB0,
        "prevtrack" => 0xB1,
        "volumeup" => 0xAF,
        "volumedown" => 0xAE,
        "volumemute" => 0xAD,

        // ── System ────────────────────────────────────────────────────────────
        "printscreen" => 0x2C,
        "capslock" => 0x14,
        "numlock" => 0x90,

        _ => return None,
    };
    Some(vk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_map_to_vk_a_range() {
        assert_eq!(windows_vk("a"), Some(0x41));
        assert_eq!(windows_vk("z"), Some(0x5A));
        // Lookups are case-insensitive: chord names travel verbatim.
        assert_eq!(windows_vk("A"), Some(0x41));
    }

    #[test]
    fn test_digits_map_to_vk_0_range() {
        assert_eq!(windows_vk("0"), Some(0x30));
        assert_eq!(windows_vk("9"), Some(0x39));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(windows_vk("f1"), Some(0x70));
        assert_eq!(windows_vk("f11"), Some(0x7A));
        assert_eq!(windows_vk("f24"), Some(0x87));
        assert_eq!(windows_vk("f25"), None);
    }

    #[test]
    fn test_every_navigation_allow_list_key_is_mapped() {
        for key in crate::keys::NAVIGATION_KEYS {
            assert!(windows_vk(key).is_some(), "unmapped allow-list key: {key}");
        }
    }

    #[test]
    fn test_every_media_key_is_mapped() {
        for name in ["playpause", "nexttrack", "prevtrack", "volumeup", "volumedown", "volumemute"]
        {
            assert!(windows_vk(name).is_some(), "unmapped media key: {name}");
        }
    }

    #[test]
    fn test_modifier_and_unknown_names() {
        assert_eq!(windows_vk("shift"), Some(0x10));
        assert_eq!(windows_vk("ctrl"), Some(0x11));
        assert_eq!(windows_vk("hyper"), None);
    }
}
