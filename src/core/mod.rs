// src/core/mod.rs — Capital lookup pipeline

pub mod cache;
pub mod classifier;
pub mod resolver;
pub mod service;
pub mod system_prompt;

pub use cache::LookupCache;
pub use resolver::CapitalResolver;
pub use service::{CapitalAnswer, CapitalService};
