//! Utility modules shared across docugen.

pub mod html;
pub mod mime;
pub mod path;
pub mod plural;
pub mod slug;
