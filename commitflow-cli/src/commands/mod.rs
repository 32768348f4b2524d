//! CLI command implementations

pub mod deliver;
pub mod summarize;

pub use deliver::DeliverArgs;
pub use summarize::SummarizeArgs;
