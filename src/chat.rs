//! Coach Chat
//!
//! Append-only transcript of message bubbles. Sending shows the user's bubble
//! and a provisional "Typing..." bubble, posts the message, then swaps the
//! placeholder for the coach's reply rendered from Markdown.
//!
//! Exchanges are not serialized: a second message sent before the first reply
//! arrives gets its own placeholder, and each reply removes only its own.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::DashboardApi;
use crate::markup::render_markdown;

/// Text of the provisional bubble
pub const TYPING_TEXT: &str = "Typing...";

/// Shown in place of a reply when the exchange fails
pub const CHAT_ERROR_TEXT: &str = "Error connecting to server.";

/// Identity of a bubble within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    /// CSS class paired with `bubble`
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BubbleContent {
    /// Shown verbatim (set as text, never parsed)
    Text(String),
    /// Rendered HTML
    Markup(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub id: BubbleId,
    pub sender: Sender,
    pub content: BubbleContent,
}

/// The scrollable message window and its input box
pub trait ChatWindow {
    fn append_bubble(&self, bubble: &Bubble);

    fn remove_bubble(&self, id: BubbleId);

    fn clear_input(&self);

    fn scroll_to_bottom(&self);
}

/// How a send ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// Coach reply appended
    Answered,
    /// Error bubble appended
    Failed,
    /// Blank input; nothing sent
    Ignored,
}

/// One chat view's session
pub struct ChatSession {
    api: DashboardApi,
    window: Rc<dyn ChatWindow>,
    next_id: Cell<u64>,
    transcript: RefCell<Vec<Bubble>>,
    in_flight: Cell<usize>,
}

impl ChatSession {
    pub fn new(api: DashboardApi, window: Rc<dyn ChatWindow>) -> Self {
        Self {
            api,
            window,
            next_id: Cell::new(1),
            transcript: RefCell::new(Vec::new()),
            in_flight: Cell::new(0),
        }
    }

    /// Bubbles currently shown, oldest first
    pub fn transcript(&self) -> Vec<Bubble> {
        self.transcript.borrow().clone()
    }

    /// Exchanges still waiting for a reply
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Send the input box's text
    pub async fn send(&self, input: &str) -> Exchange {
        let message = input.trim();
        if message.is_empty() {
            return Exchange::Ignored;
        }

        self.append(Sender::User, BubbleContent::Text(message.to_string()));
        self.window.clear_input();
        let placeholder = self.append(Sender::Ai, BubbleContent::Text(TYPING_TEXT.to_string()));

        self.in_flight.set(self.in_flight.get() + 1);
        if self.in_flight.get() > 1 {
            tracing::debug!(in_flight = self.in_flight.get(), "Overlapping chat exchange");
        }

        let result = self.api.send_chat(message).await;

        self.in_flight.set(self.in_flight.get() - 1);
        self.remove(placeholder);

        match result {
            Ok(reply) => {
                self.append(Sender::Ai, BubbleContent::Markup(render_markdown(&reply)));
                Exchange::Answered
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                self.append(Sender::Ai, BubbleContent::Text(CHAT_ERROR_TEXT.to_string()));
                Exchange::Failed
            }
        }
    }

    fn append(&self, sender: Sender, content: BubbleContent) -> BubbleId {
        let id = BubbleId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let bubble = Bubble {
            id,
            sender,
            content,
        };
        self.window.append_bubble(&bubble);
        self.window.scroll_to_bottom();
        self.transcript.borrow_mut().push(bubble);
        id
    }

    fn remove(&self, id: BubbleId) {
        self.transcript.borrow_mut().retain(|b| b.id != id);
        self.window.remove_bubble(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CHAT_PATH;
    use crate::page::MemoryPage;
    use crate::testing::MockTransport;
    use crate::transport::{Method, Response};

    fn session() -> (ChatSession, Rc<MockTransport>, Rc<MemoryPage>) {
        let mock = Rc::new(MockTransport::new());
        let page = Rc::new(MemoryPage::new());
        let session = ChatSession::new(DashboardApi::new(mock.clone()), page.clone());
        (session, mock, page)
    }

    fn contents(bubbles: &[Bubble]) -> Vec<(Sender, BubbleContent)> {
        bubbles
            .iter()
            .map(|b| (b.sender, b.content.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_send_hello() {
        let (session, mock, page) = session();
        page.set_chat_input("hello");
        let reply = mock.gate(Method::Post, CHAT_PATH);

        let send = session.send("hello");
        let check = async {
            tokio::task::yield_now().await;
            assert_eq!(
                contents(&page.bubbles()),
                vec![
                    (Sender::User, BubbleContent::Text("hello".to_string())),
                    (Sender::Ai, BubbleContent::Text("Typing...".to_string())),
                ]
            );
            assert_eq!(page.chat_input(), "");
            reply
                .send(Ok(Response::new(200, r#"{"response": "hi!"}"#)))
                .unwrap();
        };

        let (outcome, _) = tokio::join!(send, check);

        assert_eq!(outcome, Exchange::Answered);
        assert_eq!(
            contents(&page.bubbles()),
            vec![
                (Sender::User, BubbleContent::Text("hello".to_string())),
                (Sender::Ai, BubbleContent::Markup("<p>hi!</p>\n".to_string())),
            ]
        );
        assert_eq!(page.bubbles(), session.transcript());
    }

    #[tokio::test]
    async fn test_send_failure_shows_error_bubble() {
        let (session, mock, page) = session();
        mock.fail(Method::Post, CHAT_PATH);

        let outcome = session.send("what should I eat?").await;

        assert_eq!(outcome, Exchange::Failed);
        assert_eq!(
            contents(&page.bubbles()),
            vec![
                (Sender::User, BubbleContent::Text("what should I eat?".to_string())),
                (Sender::Ai, BubbleContent::Text(CHAT_ERROR_TEXT.to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_server_error_shows_error_bubble() {
        let (session, mock, page) = session();
        mock.respond(Method::Post, CHAT_PATH, 400, r#"{"error": "Empty message"}"#);

        assert_eq!(session.send("x").await, Exchange::Failed);
        assert_eq!(page.bubbles().len(), 2);
        assert!(!page
            .bubbles()
            .iter()
            .any(|b| b.content == BubbleContent::Text(TYPING_TEXT.to_string())));
    }

    #[tokio::test]
    async fn test_blank_message_ignored() {
        let (session, mock, page) = session();

        assert_eq!(session.send("   \n").await, Exchange::Ignored);
        assert!(page.bubbles().is_empty());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_message_is_trimmed() {
        let (session, mock, _page) = session();
        mock.respond(Method::Post, CHAT_PATH, 200, r#"{"response": "ok"}"#);

        session.send("  squat form?  ").await;

        let transcript = session.transcript();
        assert_eq!(
            transcript[0].content,
            BubbleContent::Text("squat form?".to_string())
        );
    }

    #[tokio::test]
    async fn test_overlapping_sends_keep_separate_placeholders() {
        let (session, mock, page) = session();
        let first = mock.gate(Method::Post, CHAT_PATH);
        let second = mock.gate(Method::Post, CHAT_PATH);

        let a = session.send("one");
        let b = session.send("two");
        let release = async {
            tokio::task::yield_now().await;
            let typing = page
                .bubbles()
                .iter()
                .filter(|b| b.content == BubbleContent::Text(TYPING_TEXT.to_string()))
                .count();
            assert_eq!(typing, 2);
            assert_eq!(session.in_flight(), 2);

            second.send(Ok(Response::new(200, r#"{"response": "two-reply"}"#))).unwrap();
            tokio::task::yield_now().await;
            first.send(Ok(Response::new(200, r#"{"response": "one-reply"}"#))).unwrap();
        };

        let (a, b, _) = tokio::join!(a, b, release);

        assert_eq!(a, Exchange::Answered);
        assert_eq!(b, Exchange::Answered);
        assert_eq!(session.in_flight(), 0);

        let bubbles = page.bubbles();
        assert_eq!(bubbles.len(), 4);
        assert!(!bubbles
            .iter()
            .any(|b| b.content == BubbleContent::Text(TYPING_TEXT.to_string())));
        // Replies land in arrival order, after both user bubbles
        let replies: Vec<_> = bubbles[2..].iter().map(|b| b.content.clone()).collect();
        assert!(replies.contains(&BubbleContent::Markup("<p>one-reply</p>\n".to_string())));
        assert!(replies.contains(&BubbleContent::Markup("<p>two-reply</p>\n".to_string())));
    }

    #[test]
    fn test_sender_classes() {
        assert_eq!(Sender::User.css_class(), "user");
        assert_eq!(Sender::Ai.css_class(), "ai");
    }
}
