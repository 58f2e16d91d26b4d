pub mod core;

// Re-export key items for easy importing in this crate
pub use core::types;

// Re-export key items for easy importing in other crates
pub use core::engine::classifier::classify;
pub use core::engine::http::HttpExecutor;
pub use core::engine::sampler::Sampler;
pub use core::engine::traits::{RequestError, RequestExecutor, Response};
pub use core::engine::validator::validate;
pub use core::main_shared::run_main;
