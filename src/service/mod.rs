pub mod llm;
pub mod report;

pub use llm::{LlmClient, TextGenerator};
pub use report::ReportService;
