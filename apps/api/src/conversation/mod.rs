//! Conversation — the LLM-backed responder: session log, system prompt,
//! chat bot and streamed-reply assembly.

pub mod assembler;
pub mod chat;
pub mod handlers;
pub mod prompts;
pub mod session;
