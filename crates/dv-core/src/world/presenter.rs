//! Presentation seam
//!
//! The engine never draws or prints by itself. Attacks report frames and
//! messages through a [`Presenter`]; headless callers plug in
//! [`NullPresenter`], tests use [`RecordingPresenter`].

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Pos;

/// Sixteen-colour text palette
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    #[default]
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

/// Output side of the engine
pub trait Presenter {
    /// Draw a projectile glyph over a cell
    fn draw_cell(&mut self, pos: Pos, glyph: char, color: Color);

    /// Put back whatever the cell normally shows
    fn restore_cell(&mut self, _pos: Pos) {}

    /// Queue a line for the message window
    fn show_message(&mut self, text: &str);

    /// Hold the current frame
    fn pause(&mut self, _ms: u32) {}
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn draw_cell(&mut self, _pos: Pos, _glyph: char, _color: Color) {}

    fn show_message(&mut self, _text: &str) {}
}

/// One call made on a [`RecordingPresenter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Draw { pos: Pos, glyph: char, color: Color },
    Restore(Pos),
    Message(String),
    Pause(u32),
}

/// Keeps every call in order
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self) -> impl Iterator<Item = (Pos, char)> + '_ {
        self.events.iter().filter_map(|e| match e {
            PresenterEvent::Draw { pos, glyph, .. } => Some((*pos, *glyph)),
            _ => None,
        })
    }

    pub fn total_pause_ms(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                PresenterEvent::Pause(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

impl Presenter for RecordingPresenter {
    fn draw_cell(&mut self, pos: Pos, glyph: char, color: Color) {
        self.events.push(PresenterEvent::Draw { pos, glyph, color });
    }

    fn restore_cell(&mut self, pos: Pos) {
        self.events.push(PresenterEvent::Restore(pos));
    }

    fn show_message(&mut self, text: &str) {
        self.events.push(PresenterEvent::Message(text.to_string()));
    }

    fn pause(&mut self, ms: u32) {
        self.events.push(PresenterEvent::Pause(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order() {
        let mut rec = RecordingPresenter::new();
        rec.draw_cell(Pos::new(1, 2), '*', Color::Red);
        rec.pause(75);
        rec.show_message("The orc dies in a fit of agony.");
        rec.restore_cell(Pos::new(1, 2));
        assert_eq!(rec.events.len(), 4);
        assert_eq!(rec.messages(), vec!["The orc dies in a fit of agony."]);
        assert_eq!(rec.draws().collect::<Vec<_>>(), vec![(Pos::new(1, 2), '*')]);
        assert_eq!(rec.total_pause_ms(), 75);
    }

    #[test]
    fn test_null_presenter_accepts_everything() {
        let mut null = NullPresenter;
        null.draw_cell(Pos::new(0, 0), '-', Color::White);
        null.show_message("ignored");
        null.pause(1000);
    }
}
