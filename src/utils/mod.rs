pub mod stats;

pub use stats::TextStats;
