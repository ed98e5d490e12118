use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    None,

    Backspace,
    Tab,
    Return,
    Escape,
    Space,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    UpArrow,
    DownArrow,
    RightArrow,
    LeftArrow,

    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,

    Alpha0,
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Alpha9,

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

    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadEnter,
}

// canonical binding names; anything not listed here resolves to KeyCode::None
const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("None", KeyCode::None),
    ("Backspace", KeyCode::Backspace),
    ("Tab", KeyCode::Tab),
    ("Return", KeyCode::Return),
    ("Escape", KeyCode::Escape),
    ("Space", KeyCode::Space),
    ("Insert", KeyCode::Insert),
    ("Delete", KeyCode::Delete),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("UpArrow", KeyCode::UpArrow),
    ("DownArrow", KeyCode::DownArrow),
    ("RightArrow", KeyCode::RightArrow),
    ("LeftArrow", KeyCode::LeftArrow),
    ("LeftShift", KeyCode::LeftShift),
    ("RightShift", KeyCode::RightShift),
    ("LeftControl", KeyCode::LeftControl),
    ("RightControl", KeyCode::RightControl),
    ("LeftAlt", KeyCode::LeftAlt),
    ("RightAlt", KeyCode::RightAlt),
    ("Alpha0", KeyCode::Alpha0),
    ("Alpha1", KeyCode::Alpha1),
    ("Alpha2", KeyCode::Alpha2),
    ("Alpha3", KeyCode::Alpha3),
    ("Alpha4", KeyCode::Alpha4),
    ("Alpha5", KeyCode::Alpha5),
    ("Alpha6", KeyCode::Alpha6),
    ("Alpha7", KeyCode::Alpha7),
    ("Alpha8", KeyCode::Alpha8),
    ("Alpha9", KeyCode::Alpha9),
    ("A", KeyCode::A),
    ("B", KeyCode::B),
    ("C", KeyCode::C),
    ("D", KeyCode::D),
    ("E", KeyCode::E),
    ("F", KeyCode::F),
    ("G", KeyCode::G),
    ("H", KeyCode::H),
    ("I", KeyCode::I),
    ("J", KeyCode::J),
    ("K", KeyCode::K),
    ("L", KeyCode::L),
    ("M", KeyCode::M),
    ("N", KeyCode::N),
    ("O", KeyCode::O),
    ("P", KeyCode::P),
    ("Q", KeyCode::Q),
    ("R", KeyCode::R),
    ("S", KeyCode::S),
    ("T", KeyCode::T),
    ("U", KeyCode::U),
    ("V", KeyCode::V),
    ("W", KeyCode::W),
    ("X", KeyCode::X),
    ("Y", KeyCode::Y),
    ("Z", KeyCode::Z),
    ("F1", KeyCode::F1),
    ("F2", KeyCode::F2),
    ("F3", KeyCode::F3),
    ("F4", KeyCode::F4),
    ("F5", KeyCode::F5),
    ("F6", KeyCode::F6),
    ("F7", KeyCode::F7),
    ("F8", KeyCode::F8),
    ("F9", KeyCode::F9),
    ("F10", KeyCode::F10),
    ("F11", KeyCode::F11),
    ("F12", KeyCode::F12),
    ("Keypad0", KeyCode::Keypad0),
    ("Keypad1", KeyCode::Keypad1),
    ("Keypad2", KeyCode::Keypad2),
    ("Keypad3", KeyCode::Keypad3),
    ("Keypad4", KeyCode::Keypad4),
    ("Keypad5", KeyCode::Keypad5),
    ("Keypad6", KeyCode::Keypad6),
    ("Keypad7", KeyCode::Keypad7),
    ("Keypad8", KeyCode::Keypad8),
    ("Keypad9", KeyCode::Keypad9),
    ("KeypadEnter", KeyCode::KeypadEnter),
];

impl KeyCode {
    pub fn from_name(name: &str) -> KeyCode {
        KEY_NAMES
            .iter()
            .find(|(key_name, _)| *key_name == name)
            .map(|(_, key)| *key)
            .unwrap_or(KeyCode::None)
    }

    pub fn name(&self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(_, key)| key == self)
            .map(|(key_name, _)| *key_name)
            .unwrap_or("None")
    }
}
