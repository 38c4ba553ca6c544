//! # Conversation
//!
//! What the advisor page shows: the message list and a loading flag.
//!
//! ## Send Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  send(input)                                                            │
//! │    blank input                    ──► Ignored                           │
//! │    push user message, push empty model placeholder, loading = true      │
//! │    for each fragment: append to placeholder, notify                     │
//! │                                                                         │
//! │    stream ends      ──► Completed                                       │
//! │    error            ──► drop placeholder if still empty,                │
//! │                         push one error message ──► Failed               │
//! │    cancel signalled ──► drop placeholder if still empty ──► Cancelled   │
//! │                                                                         │
//! │    loading = false in every case                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use futures_util::StreamExt;
use tokio::sync::watch;
use tracing::{debug, error};

use sanivita_core::{ChatMessage, Product};

use crate::client::{Advisor, ReplyStream};
use crate::error::AdvisorResult;

/// First message of every conversation.
pub const GREETING: &str = "أهلاً بك! أنا مساعد SaniVita الذكي. كيف يمكنني مساعدتك في اختيار المكمل الغذائي المناسب لصحتك اليوم؟";

/// Shown in place of a reply when the advisor fails.
pub const ERROR_MESSAGE: &str =
    "عذراً، حدث خطأ أثناء الاتصال بالخدمة. يرجى المحاولة مرة أخرى لاحقاً.";

/// How a [`Conversation::send`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    Completed,
    Failed,
    Cancelled,
}

/// Message list of the advisor page.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    is_loading: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Conversation {
            messages: vec![ChatMessage::model(GREETING)],
            is_loading: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Most recent message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Sends `input` and streams the reply into the message list.
    ///
    /// `on_update` sees the conversation after every visible change. A
    /// `cancel` receiver flipping to `true` stops the reply between
    /// fragments; whatever text already arrived is kept.
    pub async fn send<A, F>(
        &mut self,
        advisor: &A,
        input: &str,
        products: &[Product],
        mut cancel: Option<watch::Receiver<bool>>,
        mut on_update: F,
    ) -> SendOutcome
    where
        A: Advisor + ?Sized,
        F: FnMut(&Conversation),
    {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::model(""));
        self.is_loading = true;
        on_update(self);

        let outcome = match advisor.stream_reply(text, products).await {
            Ok(mut stream) => loop {
                let Some(next) = next_unless_cancelled(&mut stream, &mut cancel).await else {
                    break SendOutcome::Cancelled;
                };

                match next {
                    Some(Ok(fragment)) => {
                        self.append_to_reply(&fragment);
                        on_update(self);
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "Advisor reply failed");
                        break SendOutcome::Failed;
                    }
                    None => break SendOutcome::Completed,
                }
            },
            Err(e) => {
                error!(error = %e, "Advisor request failed");
                SendOutcome::Failed
            }
        };

        if outcome != SendOutcome::Completed {
            self.drop_empty_placeholder();
        }
        if outcome == SendOutcome::Failed {
            self.messages.push(ChatMessage::error(ERROR_MESSAGE));
        }
        if outcome == SendOutcome::Cancelled {
            debug!("Advisor reply cancelled");
        }

        self.is_loading = false;
        on_update(self);
        outcome
    }

    fn append_to_reply(&mut self, fragment: &str) {
        if let Some(reply) = self.messages.last_mut() {
            reply.text.push_str(fragment);
        }
    }

    fn drop_empty_placeholder(&mut self) {
        if self
            .messages
            .last()
            .is_some_and(|m| !m.is_error && m.text.is_empty())
        {
            self.messages.pop();
        }
    }
}

/// Next stream item, or `None` once `cancel` reads `true`.
async fn next_unless_cancelled(
    stream: &mut ReplyStream,
    cancel: &mut Option<watch::Receiver<bool>>,
) -> Option<Option<AdvisorResult<String>>> {
    loop {
        let Some(rx) = cancel.as_mut() else {
            return Some(stream.next().await);
        };
        if *rx.borrow_and_update() {
            return None;
        }

        let changed = tokio::select! {
            item = stream.next() => return Some(item),
            changed = rx.changed() => changed,
        };
        // Sender gone: nothing can cancel any more.
        if changed.is_err() {
            *cancel = None;
        }
    }
}
