//! Order conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, ListPrompt};
pub use event::Event;
pub use state::{OrderContext, OrderState};
pub use transition::{transition, TransitionResult};
