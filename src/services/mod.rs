pub mod emotion;
pub mod llm;
