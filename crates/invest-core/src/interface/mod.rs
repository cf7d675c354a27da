//! Surface-facing pieces: messages, sessions, rendering

pub mod formatter;
pub mod message;
pub mod session;
pub mod theme;

pub use formatter::{Formatter, FormatterFactory, OutputFormat};
pub use message::{ChatMessage, Origin, Transcript};
pub use session::Session;
pub use theme::Theme;
