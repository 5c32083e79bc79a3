//! Text helpers shared by the fetcher and prompt builder.

pub mod text;

pub use text::{collapse_whitespace, take_chars};
