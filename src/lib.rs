// src/lib.rs — Library root for parlor

pub mod cli;
pub mod core;
pub mod infra;
pub mod responder;
pub mod util;
