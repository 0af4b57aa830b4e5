pub mod gemini;

pub use gemini::{ContentGenerator, GeminiClient, UpstreamOutcome};
