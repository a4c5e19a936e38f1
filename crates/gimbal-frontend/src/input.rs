//! Bridge from egui input to gimbal key events

use gimbal_core::{Key, KeyEvent};

/// Turns egui key and modifier state into [`KeyEvent`]s
///
/// egui reports modifiers as state rather than key presses, so modifier
/// edges are detected by comparing against the previous frame.
#[derive(Debug, Default)]
pub struct KeyBridge {
    alt: bool,
    shift: bool,
    ctrl: bool,
}

impl KeyBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's key events
    pub fn collect(&mut self, ctx: &egui::Context) -> Vec<KeyEvent> {
        ctx.input(|input| self.translate(input.modifiers, &input.events))
    }

    fn translate(&mut self, modifiers: egui::Modifiers, events: &[egui::Event]) -> Vec<KeyEvent> {
        let mut out = Vec::new();
        Self::edge(&mut self.alt, modifiers.alt, Key::Alt, &mut out);
        Self::edge(&mut self.shift, modifiers.shift, Key::Shift, &mut out);
        Self::edge(&mut self.ctrl, modifiers.ctrl, Key::Control, &mut out);

        for event in events {
            if let egui::Event::Key {
                key,
                pressed,
                repeat,
                ..
            } = event
                && let Some(key) = map_key(*key)
            {
                out.push(KeyEvent {
                    key,
                    pressed: *pressed,
                    repeat: *repeat,
                });
            }
        }
        out
    }

    fn edge(held: &mut bool, now: bool, key: Key, out: &mut Vec<KeyEvent>) {
        if *held == now {
            return;
        }
        *held = now;
        out.push(if now {
            KeyEvent::pressed(key)
        } else {
            KeyEvent::released(key)
        });
    }
}

fn map_key(key: egui::Key) -> Option<Key> {
    if key == egui::Key::Escape {
        return Some(Key::Escape);
    }
    let mut chars = key.name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(Key::Character(c.to_ascii_lowercase())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(held: bool) -> egui::Modifiers {
        egui::Modifiers {
            alt: held,
            ..Default::default()
        }
    }

    #[test]
    fn test_alt_edges() {
        let mut bridge = KeyBridge::new();
        assert_eq!(bridge.translate(alt(true), &[]), vec![KeyEvent::pressed(Key::Alt)]);
        // Holding Alt is not another press
        assert!(bridge.translate(alt(true), &[]).is_empty());
        assert_eq!(bridge.translate(alt(false), &[]), vec![KeyEvent::released(Key::Alt)]);
    }

    #[test]
    fn test_key_events_mapped() {
        let mut bridge = KeyBridge::new();
        let events = [
            egui::Event::Key {
                key: egui::Key::R,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            },
            egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: false,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            },
        ];
        let out = bridge.translate(egui::Modifiers::NONE, &events);
        assert_eq!(
            out,
            vec![
                KeyEvent::pressed(Key::Character('r')),
                KeyEvent::released(Key::Escape),
            ]
        );
    }

    #[test]
    fn test_unmapped_keys_dropped() {
        assert_eq!(map_key(egui::Key::ArrowLeft), None);
        assert_eq!(map_key(egui::Key::Num1), Some(Key::Character('1')));
    }
}
