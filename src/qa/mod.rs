mod client;
mod service;

pub use client::{CompletionClient, OpenAiCompletionClient};
pub use service::QaService;
