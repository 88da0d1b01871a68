//! Keyboard and mouse polling.

use serde::{Deserialize, Serialize};

use script_math::Vec2;

use crate::host::InputHost;

/// Keyboard keys a script can poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    Up,
    Down,
    Left,
    Right,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

/// Mouse buttons a script can poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Held this frame.
pub fn key(host: &(impl InputHost + ?Sized), key: KeyCode) -> bool {
    host.key(key)
}

/// Pressed this frame.
pub fn key_down(host: &(impl InputHost + ?Sized), key: KeyCode) -> bool {
    host.key_down(key)
}

/// Released this frame.
pub fn key_up(host: &(impl InputHost + ?Sized), key: KeyCode) -> bool {
    host.key_up(key)
}

pub fn mouse_button(host: &(impl InputHost + ?Sized), button: MouseButton) -> bool {
    host.mouse_button(button)
}

pub fn mouse_button_down(host: &(impl InputHost + ?Sized), button: MouseButton) -> bool {
    host.mouse_button_down(button)
}

pub fn mouse_button_up(host: &(impl InputHost + ?Sized), button: MouseButton) -> bool {
    host.mouse_button_up(button)
}

/// Cursor position in screen pixels.
pub fn mouse_position(host: &(impl InputHost + ?Sized)) -> Vec2 {
    host.mouse_position()
}
