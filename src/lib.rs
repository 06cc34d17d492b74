// src/lib.rs — Library root for the capitals service

pub mod api;
pub mod cli;
pub mod core;
pub mod infra;
pub mod provider;
