//! Helper functions shared by the generator and templates

mod date;
mod html;
mod scroll;
mod url;

pub use date::*;
pub use html::*;
pub use scroll::*;
pub use url::*;
