//! Controller layer: UI-side event types and input orchestration.

pub mod events;
pub mod orchestration;
