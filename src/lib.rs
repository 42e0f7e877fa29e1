//! enroll: interactive course registration backed by a JSON file
//!
//! Layers, innermost first: `domain` (validated records), `application`
//! (persistence service), `infrastructure` (filesystem, wiring) and `cli`
//! (arguments, menu session, terminal output).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
