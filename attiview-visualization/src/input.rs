//! Translation of winit input into viewer events

use crate::SpecialKey;
use attiview_core::{ArrowKey, PixelPos, PointerButton};
use winit::dpi::PhysicalPosition;
use winit::event::MouseButton;
use winit::keyboard::{Key, NamedKey};

/// A key press as the viewer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Special(SpecialKey),
}

/// Map a logical key; `None` for keys the viewer ignores entirely
///
/// Escape is delivered as the ASCII escape character, matching how
/// terminals and classic toolkits report it.
pub fn translate_key(key: &Key) -> Option<KeyInput> {
    match key {
        Key::Character(text) => text.chars().next().map(KeyInput::Char),
        Key::Named(NamedKey::Escape) => Some(KeyInput::Char('\u{1b}')),
        Key::Named(NamedKey::Space) => Some(KeyInput::Char(' ')),
        Key::Named(NamedKey::Enter) => Some(KeyInput::Char('\r')),
        Key::Named(NamedKey::Tab) => Some(KeyInput::Char('\t')),
        Key::Named(NamedKey::Backspace) => Some(KeyInput::Char('\u{8}')),
        Key::Named(NamedKey::Delete) => Some(KeyInput::Char('\u{7f}')),
        Key::Named(NamedKey::ArrowLeft) => Some(KeyInput::Special(SpecialKey::Arrow(ArrowKey::Left))),
        Key::Named(NamedKey::ArrowUp) => Some(KeyInput::Special(SpecialKey::Arrow(ArrowKey::Up))),
        Key::Named(NamedKey::ArrowRight) => {
            Some(KeyInput::Special(SpecialKey::Arrow(ArrowKey::Right)))
        }
        Key::Named(NamedKey::ArrowDown) => Some(KeyInput::Special(SpecialKey::Arrow(ArrowKey::Down))),
        Key::Named(
            NamedKey::Shift | NamedKey::Control | NamedKey::Alt | NamedKey::Super | NamedKey::CapsLock,
        ) => None,
        Key::Named(_) => Some(KeyInput::Special(SpecialKey::Other)),
        _ => None,
    }
}

pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(code) => PointerButton::Other(code),
    }
}

/// Whole-pixel cursor position
pub fn pixel_pos(position: PhysicalPosition<f64>) -> PixelPos {
    PixelPos::new(position.x.floor() as i32, position.y.floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    #[test]
    fn test_arrow_keys_become_special() {
        assert_eq!(
            translate_key(&Key::Named(NamedKey::ArrowLeft)),
            Some(KeyInput::Special(SpecialKey::Arrow(ArrowKey::Left)))
        );
        assert_eq!(
            translate_key(&Key::Named(NamedKey::F1)),
            Some(KeyInput::Special(SpecialKey::Other))
        );
        assert_eq!(translate_key(&Key::Named(NamedKey::Shift)), None);
    }

    #[test]
    fn test_characters_and_escape() {
        assert_eq!(
            translate_key(&Key::Character(SmolStr::new("S"))),
            Some(KeyInput::Char('S'))
        );
        assert_eq!(
            translate_key(&Key::Named(NamedKey::Escape)),
            Some(KeyInput::Char('\u{1b}'))
        );
    }

    #[test]
    fn test_pointer_mapping() {
        assert_eq!(pointer_button(MouseButton::Right), PointerButton::Right);
        assert_eq!(pointer_button(MouseButton::Other(7)), PointerButton::Other(7));
        assert_eq!(pixel_pos(PhysicalPosition::new(12.7, -0.5)), PixelPos::new(12, -1));
    }
}
