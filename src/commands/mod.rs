/// Command implementations. The tool has a single pipeline, `dump`.
pub mod dump;

pub use dump::run;
