//! Chat session lifecycle
//!
//! One session is created at startup and reused for the whole
//! conversation; it is an explicitly owned value passed to callers, not
//! a module-level singleton. The persona instruction is fixed by the
//! provider; the session only carries the turn history.

use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use parking_lot::RwLock;

use crate::prompts::STREAM_FALLBACK;
use crate::{ChatTurn, Oracle};

/// A create-once-then-reuse tutor conversation
pub struct ChatSession {
    oracle: Arc<dyn Oracle>,
    history: Arc<RwLock<Vec<ChatTurn>>>,
}

impl ChatSession {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self {
            oracle,
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Send a message and stream the reply fragments.
    ///
    /// If the connection fails before or during the stream, a single
    /// fixed fallback fragment is yielded in place of the rest of the
    /// reply; no retry is attempted. The completed reply (fallback
    /// included) is recorded into the session history.
    pub fn send(&self, message: impl Into<String>) -> Pin<Box<dyn Stream<Item = String> + Send>> {
        use async_stream::stream;
        use futures::StreamExt;

        let oracle = Arc::clone(&self.oracle);
        let history = Arc::clone(&self.history);
        let message = message.into();

        Box::pin(stream! {
            history.write().push(ChatTurn::user(&message));
            let turns = history.read().clone();

            let mut reply = String::new();
            match oracle.chat_stream(&turns).await {
                Ok(mut fragments) => {
                    while let Some(item) = fragments.next().await {
                        match item {
                            Ok(fragment) => {
                                reply.push_str(&fragment);
                                yield fragment;
                            }
                            Err(error) => {
                                tracing::warn!(%error, "chat stream failed mid-way");
                                reply.push_str(STREAM_FALLBACK);
                                yield STREAM_FALLBACK.to_string();
                                break;
                            }
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "chat stream could not be opened");
                    reply.push_str(STREAM_FALLBACK);
                    yield STREAM_FALLBACK.to_string();
                }
            }

            history.write().push(ChatTurn::model(reply));
        })
    }

    /// Conversation turns so far
    pub fn history(&self) -> Vec<ChatTurn> {
        self.history.read().clone()
    }
}
