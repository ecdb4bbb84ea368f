use leptos::prelude::*;

use crate::models::conversations::{ChatContext, MessageView};

#[component]
pub fn MessageList() -> impl IntoView {
    let chat = expect_context::<ChatContext>();

    let messages = Memo::new(move |_| {
        let thread_id = chat.current_thread_id.get();
        chat.messages_for(&thread_id)
    });

    view! {
        <div class="h-full w-full overflow-y-auto flex flex-col space-y-3 p-4">
            {move || {
                if messages.get().is_empty() {
                    view! {
                        <div class="flex-1 flex items-center justify-center">
                            <p class="text-gray-500 dark:text-gray-400 text-sm">
                                "No messages yet. Say something below."
                            </p>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <For
                            each=move || messages.get()
                            key=|message| message.id.clone()
                            children=move |message| {
                                view! { <MessageBubble message=message/> }
                            }
                        />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn MessageBubble(message: MessageView) -> impl IntoView {
    let is_user = message.is_user();
    let alignment = if is_user { "justify-end" } else { "justify-start" };
    let bubble_class = if is_user {
        "bg-teal-600 text-white"
    } else {
        "bg-gray-200 dark:bg-teal-800 text-gray-800 dark:text-gray-100"
    };
    let content = message.content.clone().unwrap_or_default();

    view! {
        <div class=format!("flex {alignment}")>
            <div class=format!("max-w-[75%] rounded-lg px-3 py-2 text-sm {bubble_class}")>
                <p class="whitespace-pre-wrap break-words">{content}</p>
            </div>
        </div>
    }
}
