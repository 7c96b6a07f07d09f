//! Terminal user-interface building blocks.
//!
//! Views are pure functions from state to rows (`dashboard_view`,
//! `chat_view`); `renderer` owns the streams they are written to, and
//! `progress` the spinner shown while requests are in flight.

pub mod chat_view;
pub mod dashboard_view;
mod markdown;
pub mod palette;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod text;

pub use chat_view::{ChatPrinter, ChatStyle};
pub use renderer::Renderer;
