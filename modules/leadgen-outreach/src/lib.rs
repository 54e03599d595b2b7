pub mod bulk;
pub mod fallback;
pub mod generator;
pub mod parse;
pub mod prompt;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use bulk::{summarize, BulkOutcome};
pub use fallback::fallback_message;
pub use generator::OutreachGenerator;
pub use parse::{parse_generated_message, parse_quality_analysis, GeneratedMessage};
