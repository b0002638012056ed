pub mod handlers;
pub mod models;
pub mod partition;
pub mod schedule;
