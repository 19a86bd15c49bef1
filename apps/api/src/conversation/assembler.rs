//! Response Assembler — reduces a stream of text fragments to one committed
//! assistant message.
//!
//! Commit happens exactly once and only when the upstream stream finishes
//! cleanly. An upstream error, or the consumer dropping the stream early,
//! leaves the session without an assistant message for the turn.

use std::ops::DerefMut;

use futures::StreamExt;
use tracing::{debug, warn};

use crate::conversation::session::{ConversationSession, Role};
use crate::llm_client::TextStream;

#[derive(Debug, Default)]
pub struct ResponseAssembler {
    buffer: String,
    fragments: usize,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment in arrival order.
    pub fn push(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
        self.fragments += 1;
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Commits the accumulated text as a single assistant message and returns it.
    /// Consumes the assembler so a turn cannot be committed twice.
    pub fn commit(self, session: &mut ConversationSession) -> String {
        session.append(Role::Assistant, self.buffer.clone());
        self.buffer
    }
}

/// Forwards every fragment of `upstream` to the caller while assembling the reply,
/// then commits it to `session` once `upstream` ends without error.
///
/// `session` is any exclusive handle to the session (a plain `&mut` or an owned
/// mutex guard); it is held until the stream ends or is dropped, which keeps the
/// session single-flight for the duration of the reply.
pub fn relay<G>(upstream: TextStream, session: G) -> TextStream
where
    G: DerefMut<Target = ConversationSession> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut session = session;
        let mut upstream = upstream;
        let mut assembler = ResponseAssembler::new();

        while let Some(item) = upstream.next().await {
            match item {
                Ok(fragment) => {
                    assembler.push(&fragment);
                    yield Ok(fragment);
                }
                Err(e) => {
                    warn!("Stream aborted after {} fragments: {e}", assembler.fragments());
                    yield Err(e);
                    return;
                }
            }
        }

        let fragments = assembler.fragments();
        let reply = assembler.commit(&mut session);
        debug!("Stream complete: {} fragments, {} chars committed", fragments, reply.len());
    })
}
