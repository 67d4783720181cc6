// Visa eligibility analysis.
// Prompt Builder (profile + prompts) and Response Normalizer, wired together by
// service. All LLM calls go through llm_client.

pub mod handlers;
pub mod normalizer;
pub mod profile;
pub mod prompts;
pub mod schema;
pub mod service;
