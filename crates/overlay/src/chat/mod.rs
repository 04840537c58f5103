mod controller;
mod input_field;
mod log;
mod responder;
mod slots;
mod visibility;

pub use controller::{ChatOverlay, CLOSED_PLACEHOLDER, OPEN_PLACEHOLDER};
pub use input_field::InputField;
pub use log::MessageLog;
pub use responder::{AutoResponder, IndexSource, ThreadRngIndexSource};
pub use slots::{MessageKind, SlotId, SlotPool, SlotRecord};
pub use visibility::{ChatVisibility, VisibilityMachine};

#[cfg(test)]
mod tests;
