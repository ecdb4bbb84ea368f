use chrono::{DateTime, Utc};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThreadView {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl ThreadView {
    pub fn new() -> Self {
        ThreadView {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        }
    }
}

impl Default for ThreadView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessageView {
    pub id: String,
    pub thread_id: String,
    pub content: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl MessageView {
    pub fn user(thread_id: &str, content: &str) -> Self {
        MessageView {
            id: Uuid::new_v4().to_string(),
            thread_id: thread_id.to_string(),
            content: Some(content.to_string()),
            role: "user".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

/// Thread manager the title subsystem consumes: the active thread id, the
/// thread list, and every thread's ordered messages. Owns thread lifecycle
/// (create, select, archive), never titles.
#[derive(Clone, Copy)]
pub struct ChatContext {
    pub current_thread_id: RwSignal<String>,
    pub threads: RwSignal<Vec<ThreadView>>,
    pub messages: RwSignal<Vec<MessageView>>,
}

impl ChatContext {
    /// Starts with one empty thread selected, the way a fresh chat opens.
    pub fn new() -> Self {
        let first = ThreadView::new();
        let first_id = first.id.clone();
        ChatContext {
            current_thread_id: RwSignal::new(first_id),
            threads: RwSignal::new(vec![first]),
            messages: RwSignal::new(Vec::new()),
        }
    }

    /// Ordered messages of one thread. Reactive when called inside a memo or
    /// view closure, since it reads the messages signal.
    pub fn messages_for(&self, thread_id: &str) -> Vec<MessageView> {
        self.messages.with(|all| {
            all.iter()
                .filter(|message| message.thread_id == thread_id)
                .cloned()
                .collect()
        })
    }

    pub fn create_thread(&self) -> String {
        let thread = ThreadView::new();
        let thread_id = thread.id.clone();
        self.threads.update(|threads| threads.insert(0, thread));
        self.current_thread_id.set(thread_id.clone());
        log::info!("created thread {thread_id}");
        thread_id
    }

    pub fn select_thread(&self, thread_id: &str) {
        self.current_thread_id.set(thread_id.to_string());
    }

    /// Drops the thread and its messages from local state. When the active
    /// thread goes away, selection moves to the first remaining thread, or a
    /// fresh one if none are left. Title overrides are left alone.
    pub fn archive_thread(&self, thread_id: &str) {
        self.threads.update(|threads| threads.retain(|t| t.id != thread_id));
        self.messages
            .update(|all| all.retain(|m| m.thread_id != thread_id));

        if self.current_thread_id.get_untracked() == thread_id {
            let next = self
                .threads
                .with_untracked(|threads| threads.first().map(|t| t.id.clone()));
            match next {
                Some(next_id) => self.current_thread_id.set(next_id),
                None => {
                    log::info!("no threads left");
                    self.create_thread();
                }
            }
        }
    }

    pub fn push_user_message(&self, thread_id: &str, content: &str) {
        let message = MessageView::user(thread_id, content);
        self.messages.update(|all| all.push(message));
    }
}

impl Default for ChatContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_for_filters_and_keeps_order() {
        let context = ChatContext::new();
        context.push_user_message("t-1", "first");
        context.push_user_message("t-2", "other thread");
        context.push_user_message("t-1", "second");

        let messages = context.messages_for("t-1");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content.as_deref(), Some("first"));
        assert_eq!(messages[1].content.as_deref(), Some("second"));
        assert!(messages.iter().all(|m| m.is_user()));
    }

    #[test]
    fn test_archiving_active_thread_selects_next() {
        let context = ChatContext::new();
        let first = context.current_thread_id.get_untracked();
        let second = context.create_thread();
        context.push_user_message(&second, "hello");

        context.archive_thread(&second);

        assert_eq!(context.current_thread_id.get_untracked(), first);
        assert!(context.messages_for(&second).is_empty());
        assert_eq!(context.threads.with_untracked(|t| t.len()), 1);
    }

    #[test]
    fn test_archiving_last_thread_creates_a_fresh_one() {
        let context = ChatContext::new();
        let only = context.current_thread_id.get_untracked();

        context.archive_thread(&only);

        let replacement = context.current_thread_id.get_untracked();
        assert_ne!(replacement, only);
        assert_eq!(context.threads.with_untracked(|t| t.len()), 1);
    }

    #[test]
    fn test_archiving_inactive_thread_keeps_selection() {
        let context = ChatContext::new();
        let first = context.current_thread_id.get_untracked();
        let second = context.create_thread();

        context.archive_thread(&first);

        assert_eq!(context.current_thread_id.get_untracked(), second);
    }
}
