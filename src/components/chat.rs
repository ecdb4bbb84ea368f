use leptos::prelude::*;

use crate::models::conversations::ChatContext;

/// Composer for the active thread. The send path ends at the local thread
/// manager, transport to a model backend belongs to the host application.
#[component]
pub fn Chat() -> impl IntoView {
    let chat = expect_context::<ChatContext>();
    let (message, set_message) = signal(String::new());

    let send_message = move || {
        let value = message.get_untracked();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        let thread_id = chat.current_thread_id.get_untracked();
        chat.push_user_message(&thread_id, trimmed);
        set_message.set(String::new());
    };

    view! {
        <div class="flex items-center space-x-2">
            <input
                type="text"
                placeholder="type a message"
                class="flex-grow p-2 rounded bg-gray-100 dark:bg-teal-800 text-gray-800 dark:text-gray-100
                border border-gray-400 dark:border-teal-600 focus:border-teal-500 focus:outline-none
                transition duration-0 ease-in-out"
                prop:value=message
                on:input=move |ev| set_message.set(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        send_message();
                    }
                }
            />

            <button
                class="px-4 py-2 rounded text-sm text-white bg-teal-600 hover:bg-teal-500 dark:bg-teal-700 dark:hover:bg-teal-600
                transition duration-0 ease-in-out"
                on:click=move |_| send_message()
            >
                "Send"
            </button>
        </div>
    }
}
