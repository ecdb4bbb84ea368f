use leptos::prelude::*;
use leptos_icons::Icon;

use crate::models::conversations::ChatContext;
use crate::titles::resolver::resolve_title;
use crate::titles::store::TitleStore;

/// Header title with inline editing. Two states only: viewing (title plus a
/// hover pencil) and editing (input prefilled with the current title, confirm
/// and cancel affordances). Saving goes through `TitleStore::set`, which
/// rejects blank input, so an empty confirm just closes the editor.
#[component]
pub fn ThreadName() -> impl IntoView {
    let chat = expect_context::<ChatContext>();
    let store = expect_context::<TitleStore>();

    let (is_editing, set_is_editing) = signal(false);
    let (edit_value, set_edit_value) = signal(String::new());

    // Tick bumped by the store broadcast; the memo re-reads the store itself.
    let (store_revision, set_store_revision) = signal(0u32);
    let subscription = store.subscribe(move || set_store_revision.update(|n| *n += 1));
    on_cleanup(move || drop(subscription));

    let store_for_title = store.clone();
    let title = Memo::new(move |_| {
        store_revision.get();
        let thread_id = chat.current_thread_id.get();
        let messages = chat.messages_for(&thread_id);
        resolve_title(&store_for_title, &thread_id, &messages)
    });

    let start_editing = move |_| {
        set_edit_value.set(title.get_untracked());
        set_is_editing.set(true);
    };

    let save_edit = {
        let store = store.clone();
        move || {
            let value = edit_value.get_untracked();
            if !value.trim().is_empty() {
                store.set(&chat.current_thread_id.get_untracked(), &value);
            }
            set_is_editing.set(false);
        }
    };

    let cancel_edit = move || {
        set_is_editing.set(false);
        set_edit_value.set(String::new());
    };

    view! {
        {move || {
            if is_editing.get() {
                let save_on_key = save_edit.clone();
                let save_on_click = save_edit.clone();
                view! {
                    <div class="flex items-center gap-2">
                        <input
                            type="text"
                            class="h-8 px-2 text-sm rounded bg-gray-100 dark:bg-teal-800 text-gray-800 dark:text-gray-100
                            border border-gray-400 dark:border-teal-600 focus:border-teal-500 focus:outline-none"
                            prop:value=edit_value
                            autofocus=true
                            on:input=move |ev| set_edit_value.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    save_on_key();
                                } else if ev.key() == "Escape" {
                                    cancel_edit();
                                }
                            }
                        />
                        <button
                            class="p-1 text-teal-600 dark:text-teal-300 hover:text-teal-500 dark:hover:text-teal-200"
                            on:click=move |_| save_on_click()
                        >
                            <Icon icon=icondata_mdi::MdiCheck width="16" height="16"/>
                        </button>
                        <button
                            class="p-1 text-gray-500 dark:text-gray-400 hover:text-gray-700 dark:hover:text-gray-200"
                            on:click=move |_| cancel_edit()
                        >
                            <Icon icon=icondata_mdi::MdiClose width="16" height="16"/>
                        </button>
                    </div>
                }
                    .into_any()
            } else {
                view! {
                    <div class="flex items-center gap-2 group">
                        <span class="text-sm font-medium text-gray-800 dark:text-gray-100">
                            {title}
                        </span>
                        <button
                            class="p-1 text-gray-500 dark:text-gray-400 opacity-0 group-hover:opacity-100 transition-opacity"
                            on:click=start_editing
                        >
                            <Icon icon=icondata_mdi::MdiPencil width="16" height="16"/>
                        </button>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
