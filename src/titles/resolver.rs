use crate::models::conversations::MessageView;
use crate::titles::store::TitleStore;

pub const FALLBACK_TITLE: &str = "New Chat";

const DERIVED_TITLE_MAX_CHARS: usize = 50;

/// The one displayed title for a thread: the user's override unmodified,
/// else a prefix of the first message, else the fallback. Pure and cheap,
/// meant to run on every render.
pub fn resolve_title(store: &TitleStore, thread_id: &str, messages: &[MessageView]) -> String {
    if let Some(title) = store.get(thread_id) {
        return title;
    }
    derived_title(messages)
}

/// Derived title with no override: the first message's text, capped at 50
/// characters with a "..." marker. A missing or whitespace-only first
/// message falls back to the constant.
pub fn derived_title(messages: &[MessageView]) -> String {
    let seed = messages
        .first()
        .and_then(|message| message.content.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty());

    match seed {
        Some(text) => truncate_title(text),
        None => FALLBACK_TITLE.to_string(),
    }
}

// Char based, never slices into a multi-byte boundary.
fn truncate_title(text: &str) -> String {
    if text.chars().count() > DERIVED_TITLE_MAX_CHARS {
        text.chars().take(DERIVED_TITLE_MAX_CHARS).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
