// Delegated skill selectors backed by external LLM services

pub mod chat_completion;

pub use chat_completion::{ChatCompletionConfig, ChatCompletionSelector};
