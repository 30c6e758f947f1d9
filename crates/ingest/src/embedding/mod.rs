//! Text prepared for the downstream embedding model.

pub mod template;

pub use template::passage_text;
