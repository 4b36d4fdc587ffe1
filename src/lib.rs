pub mod core;
pub mod engine;
pub mod generate;
pub mod knowledge;
pub mod logging;
pub mod retrieval;
pub mod server;
pub mod state;
pub mod telegram;
pub mod translate;
