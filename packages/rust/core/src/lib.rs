//! Site assembly and orchestration for nodedocs.
//!
//! This crate ties together outline fetching, fragment resolution, content
//! assembly, type linking, rendering, and writing into one build run
//! ([`pipeline::build_site`]).

pub mod assembler;
pub mod index;
pub mod pipeline;
pub mod resolver;
pub mod sources;
pub mod store;
pub mod writer;
