//! UI-side event types and styling helpers for the desktop shell.

use eframe::egui;
use shared::domain::{Direction, FeedbackTone};

/// Transient message under the guess box, colored by tone.
#[derive(Debug, Clone)]
pub struct FeedbackBanner {
    pub message: String,
    pub tone: FeedbackTone,
}

pub fn tone_color(tone: FeedbackTone) -> egui::Color32 {
    match tone {
        FeedbackTone::Positive => egui::Color32::from_rgb(67, 160, 71),
        FeedbackTone::Negative => egui::Color32::from_rgb(229, 57, 53),
        FeedbackTone::Warning => egui::Color32::from_rgb(251, 140, 0),
    }
}

/// Map a pressed key to a grid direction, if it is one of the arrows.
pub fn direction_for_key(key: egui::Key) -> Option<Direction> {
    match key {
        egui::Key::ArrowLeft => Some(Direction::Left),
        egui::Key::ArrowRight => Some(Direction::Right),
        egui::Key::ArrowUp => Some(Direction::Up),
        egui::Key::ArrowDown => Some(Direction::Down),
        _ => None,
    }
}
