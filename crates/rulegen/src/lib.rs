pub mod agent;
pub mod errors;
pub mod extract;
pub mod models;
pub mod prompts;
pub mod providers;
pub mod tools;
