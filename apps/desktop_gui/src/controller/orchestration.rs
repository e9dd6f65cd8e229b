//! Input dispatch from UI widgets into the single game event queue.

use crossbeam_channel::{Sender, TrySendError};
use game_core::InputEvent;

/// Queue one input event. Every input modality funnels through this so
/// pointer, keyboard and widget events stay serialized.
pub fn dispatch_input(cmd_tx: &Sender<InputEvent>, event: InputEvent, status: &mut String) {
    let event_name = match &event {
        InputEvent::PointerDown { .. } => "pointer_down",
        InputEvent::DirectionalKey(_) => "directional_key",
        InputEvent::SelectFeature(_) => "select_feature",
        InputEvent::SubmitGuess(_) => "submit_guess",
    };

    match cmd_tx.try_send(event) {
        Ok(()) => tracing::debug!(event = event_name, "queued input event"),
        Err(TrySendError::Full(_)) => {
            *status = "Input queue is full; event dropped".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Input queue disconnected; restart the app".to_string();
        }
    }
}
