//! Utility modules.

pub mod date;
pub mod html;
pub mod path;
pub mod plural;
pub mod slug;
