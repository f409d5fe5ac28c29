//! Station board logic.
//!
//! Three pure pieces turn raw provider data into what a board shows:
//! - [`delay`] reads free-text delay annotations into an adjusted time,
//! - [`status`] turns a status code and comment into the status column,
//! - [`window`] picks which trains appear and in what order.
//!
//! [`table`] puts them together into departure and arrival rows.

mod delay;
mod status;
mod table;
mod window;

pub use delay::{DelayAnnotation, DelayParser, WordPairParser, adjust};
pub use status::{DisplayStatus, StatusResolver, resolve};
pub use table::{BoardRow, StationBoard};
pub use window::{BoardWindow, select};
