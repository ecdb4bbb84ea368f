use leptos::prelude::*;

use crate::components::chat::Chat;
use crate::components::messagelist::MessageList;
use crate::components::thread_name::ThreadName;
use crate::components::threadlist::ThreadList;
use crate::models::conversations::ChatContext;
use crate::titles::storage::LocalStorageTitles;
use crate::titles::store::TitleStore;

/// The assistant shell: collapsible thread sidebar, header with the editable
/// thread name, message view, composer. Thread state and the title store are
/// provided here so every view below shares the same instances.
#[component]
pub fn Assistant() -> impl IntoView {
    let chat = ChatContext::new();
    provide_context(chat);

    // One store per app, rehydrated from local storage once at startup.
    let store = TitleStore::new(LocalStorageTitles::new());
    provide_context(store);

    let (show_threads, set_show_threads) = signal(true);

    view! {
        <div class="w-full h-screen bg-gray-300 dark:bg-teal-900 flex flex-col">
            <div class="flex-shrink-0 p-2 border-b border-gray-400 dark:border-teal-700">
                <div class="flex flex-row items-center space-x-2">
                    <button
                        class="text-xs md:text-sm text-gray-900 dark:text-gray-100 px-3 py-2
                        bg-gray-400 dark:bg-teal-700 hover:bg-gray-500 dark:hover:bg-teal-600
                        border border-gray-600 dark:border-gray-500 rounded transition-colors duration-200"
                        on:click=move |_| set_show_threads.update(|v| *v = !*v)
                    >
                        {move || if show_threads.get() { "←" } else { "→" }}
                    </button>

                    <div class="h-4 border-l border-gray-500 dark:border-teal-600"></div>

                    <ThreadName/>
                </div>
            </div>

            <div class="flex-1 flex flex-row min-h-0 overflow-hidden">
                <div class=move || {
                    let base_class = "transition-all duration-300 ease-in-out overflow-hidden border-r border-gray-400 dark:border-teal-700 bg-gray-200 dark:bg-teal-800 flex-shrink-0";
                    if show_threads.get() {
                        format!("{base_class} w-80 opacity-100")
                    } else {
                        format!("{base_class} w-0 opacity-0")
                    }
                }>
                    <div class="p-4 h-full overflow-y-auto w-80">
                        <ThreadList/>
                    </div>
                </div>

                <div class="flex-1 flex flex-col min-h-0 min-w-0 overflow-hidden">
                    <div class="flex-1 overflow-hidden min-w-0">
                        <MessageList/>
                    </div>

                    <div class="flex-shrink-0 border-t border-gray-400 dark:border-teal-700 bg-gray-100 dark:bg-teal-800 p-4">
                        <Chat/>
                    </div>
                </div>
            </div>
        </div>
    }
}
