//! Scribe Server - HTTP audio transcription service
//!
//! Clients upload an audio file, get a task id back immediately and poll for
//! the result while a background worker sends the file to Google Gemini and
//! renders the speaker-labelled transcript to HTML.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Tasks and their state machine, audio files, poll policy, config
//! - **Application**: Use cases, the background worker and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, local staging, in-memory store, etc.)
//! - **HTTP**: Routes, handlers and JSON error responses
//! - **CLI**: Argument parsing, config loading and the server runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod http;
pub mod infrastructure;
