//! mensentaal - rewrite political text in plain language
//!
//! An HTTP backend that turns dense political prose into simpler text for a
//! chosen audience and output format. Prompts are composed from the request and
//! a user-maintained dictionary of term replacements, then sent to an
//! OpenAI-compatible chat completion endpoint.

pub mod cli;
pub mod config;
pub mod llm;
pub mod server;
pub mod store;
pub mod util;
