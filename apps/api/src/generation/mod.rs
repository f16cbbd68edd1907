// Generation collaborator: prompt building, LLM text generation and the résumé audit.
// All LLM calls go through llm_client.

pub mod audit;
pub mod generator;
pub mod handlers;
pub mod prompts;
