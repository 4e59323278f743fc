//! Voxrelay agent: a session-aware HTTP bridge between voice clients and a
//! chat-completion API.

// Interdiction stricte de pratiques dangereuses ou non idiomatiques
#![deny(unsafe_code)] // Le code unsafe est interdit
#![deny(missing_docs)] // Toute fonction, struct, enum ou module public doit être documenté
#![deny(unused_must_use)] // Oblige à gérer explicitement les Result et Option

// Clippy pour stricte discipline
#![deny(clippy::all)] // Active toutes les lints Clippy standard
#![deny(clippy::unwrap_used)] // Interdit unwrap()
#![deny(clippy::expect_used)] // Interdit expect()
#![deny(clippy::panic)] // Interdit panic!()
#![deny(clippy::print_stdout)] // Interdit println!() en production

/// Agent configuration with environment overrides.
pub mod config;
/// Conversation sessions: messages, transcripts, storage, and the manager.
pub mod conversation;
/// Completion-provider seam and the OpenAI chat client.
pub mod llm;
/// HTTP server and API routes.
#[allow(clippy::unused_async)]
pub mod server;
/// Entry helpers to start the voxrelay agent.
pub mod start_voxrelay_agent;
