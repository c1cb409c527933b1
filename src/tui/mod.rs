//! Terminal front end: the "page" the dashboard is shown on.

pub mod events;
pub mod terminal;
pub mod widgets;

pub use events::InputReader;
pub use terminal::TerminalManager;
