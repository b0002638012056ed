pub mod assistant;
pub mod handlers;
pub mod models;
pub mod prompts;
