//! Windows input actuation via the SendInput API.
//!
//! Key names are translated to Virtual Key codes by `deck_core::keymap`;
//! pointer motion is injected as relative `MOUSEEVENTF_MOVE` events and
//! scrolling as wheel events in WHEEL_DELTA (120) units per click.

#![cfg(target_os = "windows")]

use deck_core::{keymap, MouseButton};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_WHEEL, MOUSEINPUT, VIRTUAL_KEY,
};

use crate::application::actuate::{ActuationError, InputActuator};

/// One wheel notch in Windows wheel-delta units.
const WHEEL_DELTA: i32 = 120;

/// Windows implementation of [`InputActuator`] using SendInput.
pub struct SendInputActuator;

impl SendInputActuator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SendInputActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputActuator for SendInputActuator {
    fn move_pointer(&self, dx: f64, dy: f64) -> Result<(), ActuationError> {
        // Relative motion: SendInput applies pointer acceleration itself.
        send_mouse(MOUSEINPUT {
            dx: dx.round() as i32,
            dy: dy.round() as i32,
            mouseData: 0,
            dwFlags: MOUSEEVENTF_MOVE,
            time: 0,
            dwExtraInfo: 0,
        })
    }

    fn click(&self, button: MouseButton) -> Result<(), ActuationError> {
        let (down, up) = match button {
            MouseButton::Left => (MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP),
            MouseButton::Middle => (MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP),
            MouseButton::Right => (MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP),
        };
        for flags in [down, up] {
            send_mouse(MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            })?;
        }
        Ok(())
    }

    fn scroll(&self, clicks: i32) -> Result<(), ActuationError> {
        send_mouse(MOUSEINPUT {
            dx: 0,
            dy: 0,
            mouseData: wheel_units(clicks) as u32,
            dwFlags: MOUSEEVENTF_WHEEL,
            time: 0,
            dwExtraInfo: 0,
        })
    }

    fn key_down(&self, key: &str) -> Result<(), ActuationError> {
        send_key(translate(key)?, false)
    }

    fn key_up(&self, key: &str) -> Result<(), ActuationError> {
        send_key(translate(key)?, true)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Wheel distance in WHEEL_DELTA units.  The click count is client-derived
/// and may sit anywhere in the i32 range, so the multiply saturates instead
/// of overflowing.
fn wheel_units(clicks: i32) -> i32 {
    clicks.saturating_mul(WHEEL_DELTA)
}

fn translate(key: &str) -> Result<u16, ActuationError> {
    keymap::windows_vk(key).ok_or_else(|| ActuationError::UnknownKey(key.to_string()))
}

fn send_key(vk: u16, key_up: bool) -> Result<(), ActuationError> {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }

    // Navigation, Insert/Delete, Win keys, and the right-hand modifiers are
    // extended keys on the Windows keyboard layout.
    let extended_vks: &[u16] = &[
        0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, // nav
        0x2D, 0x2E, // Insert, Delete
        0x5B, 0x5C, // Win keys
        0xA3, 0xA5, // Right Ctrl, Right Alt
    ];
    if extended_vks.contains(&vk) {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }

    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    dispatch_input(input)
}

fn send_mouse(mi: MOUSEINPUT) -> Result<(), ActuationError> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 { mi },
    };
    dispatch_input(input)
}

fn dispatch_input(input: INPUT) -> Result<(), ActuationError> {
    // SAFETY: input is a valid INPUT structure on the stack
    let injected =
        unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if injected == 0 {
        return Err(ActuationError::Platform("SendInput injected no events".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_units_scales_by_the_delta() {
        assert_eq!(wheel_units(3), 360);
        assert_eq!(wheel_units(-2), -240);
    }

    #[test]
    fn test_wheel_units_saturates_on_extreme_click_counts() {
        // A saturated f64-to-i32 cast upstream can hand us i32::MAX.
        assert_eq!(wheel_units(i32::MAX), i32::MAX);
        assert_eq!(wheel_units(i32::MIN), i32::MIN);
    }
}
