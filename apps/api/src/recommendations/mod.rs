// Recommendation assistants: songs, movies, books and sports matches.
// All generation goes through llm_client; the parser is pure and does no I/O.

pub mod category;
pub mod handlers;
pub mod parser;
pub mod prompts;
