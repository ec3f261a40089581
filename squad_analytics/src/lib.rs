pub mod agents;
pub mod analytics;
pub mod context;
pub mod conversation;
pub mod retrieval;
pub mod signals;
pub mod state;
pub mod utils;
