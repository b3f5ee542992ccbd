//! Rendering module
//!
//! `frame` turns a simulation snapshot into a resolution-independent draw list.
//! `terminal` scales that list onto whatever terminal size is current.

pub mod frame;
pub mod terminal;

pub use frame::{DrawCommand, Frame, Rgb, SpriteKind, TextOverlay};
pub use terminal::{Grid, TerminalPresenter};
