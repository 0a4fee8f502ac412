pub mod client;
pub mod source;

pub use client::GridClient;
pub use source::{DraftSource, SeriesDraft};
