// Rule-based responder: fixed texts, formatting and keyword routing.
// No LLM calls here.

pub mod catalog;
pub mod formatter;
pub mod handlers;
pub mod router;
