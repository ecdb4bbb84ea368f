use leptos::prelude::*;
use leptos_icons::Icon;
use log::info;

use crate::models::conversations::{ChatContext, ThreadView};
use crate::titles::resolver::resolve_title;
use crate::titles::store::TitleStore;

#[component]
pub fn ThreadList() -> impl IntoView {
    let chat = expect_context::<ChatContext>();

    view! {
        <div class="thread-list-container flex flex-col h-full">
            <div class="flex-shrink-0 mb-2">
                <button
                    class="flex w-full items-center justify-start gap-1 p-2 rounded-md text-sm text-gray-700 dark:text-gray-100
                    bg-gray-300 dark:bg-teal-800 hover:bg-gray-400 dark:hover:bg-teal-700 transition duration-0 ease-in-out"
                    on:click=move |_| {
                        chat.create_thread();
                    }
                >
                    <Icon icon=icondata_mdi::MdiPlus width="16" height="16"/>
                    "New Thread"
                </button>
            </div>

            <div class="flex-1 overflow-y-auto">
                <For
                    each=move || chat.threads.get()
                    key=|thread| thread.id.clone()
                    children=move |thread| {
                        view! { <ThreadListItem thread=thread/> }
                    }
                />
            </div>
        </div>
    }
}

/// One sidebar row: a select button showing the resolved title, plus an
/// archive affordance. The title is read-only here, editing lives in the
/// header view, both write through the same store.
#[component]
fn ThreadListItem(thread: ThreadView) -> impl IntoView {
    let chat = expect_context::<ChatContext>();
    let store = expect_context::<TitleStore>();

    let thread_id = thread.id;
    let thread_id_for_active = thread_id.clone();
    let thread_id_for_select = thread_id.clone();
    let thread_id_for_archive = thread_id.clone();

    let is_active = Memo::new(move |_| chat.current_thread_id.get() == thread_id_for_active);

    // Re-derive on every store broadcast and whenever messages change, so a
    // freshly sent first message shows up without an override.
    let (store_revision, set_store_revision) = signal(0u32);
    let subscription = store.subscribe(move || set_store_revision.update(|n| *n += 1));
    on_cleanup(move || drop(subscription));

    let title = Memo::new(move |_| {
        store_revision.get();
        let messages = chat.messages_for(&thread_id);
        resolve_title(&store, &thread_id, &messages)
    });

    let button_class = move || {
        if is_active.get() {
            "bg-teal-600 dark:bg-teal-700 text-white"
        } else {
            "bg-gray-300 dark:bg-teal-800 hover:bg-gray-400 dark:hover:bg-teal-700 text-gray-700 dark:text-gray-100"
        }
    };

    view! {
        <div class="flex w-full items-center justify-between mb-1 group">
            <button
                class=move || {
                    format!(
                        "thread-item flex-grow min-w-0 p-2 text-start border-0 rounded-md text-sm transition duration-0 ease-in-out {}",
                        button_class(),
                    )
                }

                on:click=move |_| {
                    info!("switching to thread {thread_id_for_select}");
                    chat.select_thread(&thread_id_for_select);
                }
            >
                <p class="thread-name truncate">{title}</p>
            </button>

            <button
                class="archive-button ml-2 p-2 rounded text-gray-500 dark:text-gray-400 hover:text-teal-600 dark:hover:text-teal-300
                bg-gray-300 dark:bg-teal-900 hover:bg-gray-400 dark:hover:bg-teal-800 transition duration-0 ease-in-out"
                on:click=move |_| chat.archive_thread(&thread_id_for_archive)
            >
                <Icon icon=icondata_bs::BsArchive width="14" height="14"/>
            </button>
        </div>
    }
}
