//! Type definitions for installations, registrations and health

mod entry;
mod health;
mod installation;

pub use entry::*;
pub use health::*;
pub use installation::*;
