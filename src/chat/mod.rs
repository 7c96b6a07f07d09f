//! Chat session: message log, event reducer and the controller driving it.
//!
//! The reducer is pure and owns every rule about how stream events fold into
//! the log. [`ChatSession`] runs the effects it asks for (task submission,
//! opening and closing the event stream) and publishes snapshots.

pub mod message;
pub mod reducer;
mod session;

pub use message::{Bubble, Message, Role};
pub use reducer::{reduce, step, ChatEvent, ChatSnapshot, ChatState, Effect};
pub use session::ChatSession;
