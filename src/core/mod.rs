// src/core/mod.rs — Chat core: store, validation, orchestration

pub mod orchestrator;
pub mod store;
pub mod types;
pub mod upload;
pub mod validate;
