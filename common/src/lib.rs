pub mod configuration;
pub mod consts;
pub mod errors;
