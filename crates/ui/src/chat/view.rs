use std::time::Duration;

use gpui::*;
use gpui_component::{ActiveTheme, v_flex};
use smartshop_core::{MessageStore, PromptController, PromptDeps};
use tokio::runtime::Handle;

use crate::chat::empty_screen::EmptyScreen;
use crate::chat::message_list::MessageList;
use crate::chat::prompt_form::{NewChatRequested, PromptForm, PromptSubmitted};

/// One conversation screen: message list above the prompt form.
///
/// Dropping the view drops its [`PromptController`], which cancels a pending
/// submission and suppresses navigation from one still in flight.
pub struct ChatView {
    controller: PromptController,
    message_list: Entity<MessageList>,
    prompt_form: Entity<PromptForm>,
    _store_watch: Task<()>,
}

impl EventEmitter<NewChatRequested> for ChatView {}

impl ChatView {
    pub fn new(
        runtime: Handle,
        debounce: Duration,
        deps: PromptDeps,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let store = deps.store.clone();
        let controller = PromptController::new(runtime, debounce, deps);

        let message_list = cx.new(MessageList::new);
        message_list.update(cx, |list, cx| list.set_messages(store.messages(), cx));
        let prompt_form = cx.new(|cx| PromptForm::new(window, cx));

        cx.subscribe(&prompt_form, |this, _, event: &PromptSubmitted, _cx| {
            this.handle_submit(event);
        })
        .detach();

        cx.subscribe(&prompt_form, |_, _, _event: &NewChatRequested, cx| {
            cx.emit(NewChatRequested);
        })
        .detach();

        prompt_form.update(cx, |form, cx| form.focus(window, cx));

        Self {
            controller,
            message_list,
            prompt_form,
            _store_watch: Self::watch_store(store, cx),
        }
    }

    fn watch_store(store: MessageStore, cx: &mut Context<Self>) -> Task<()> {
        let mut versions = store.subscribe();

        cx.spawn(async move |this, cx| {
            while versions.changed().await.is_ok() {
                let synced = this.update(cx, |this, cx| this.sync_messages(cx));
                if synced.is_err() {
                    break;
                }
            }
        })
    }

    fn sync_messages(&mut self, cx: &mut Context<Self>) {
        let messages = self.controller.store().messages();
        self.message_list
            .update(cx, |list, cx| list.set_messages(messages, cx));
        cx.notify();
    }

    fn handle_submit(&mut self, event: &PromptSubmitted) {
        if self.controller.on_submit(&event.value) {
            tracing::debug!(
                pending = self.controller.is_pending(),
                "scheduled prompt submission"
            );
        }
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let is_empty = self.message_list.read(cx).messages().is_empty();
        let body = if is_empty {
            EmptyScreen.into_any_element()
        } else {
            self.message_list.clone().into_any_element()
        };

        v_flex()
            .id("chat-view")
            .relative()
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .child(div().id("chat-view-body").flex_1().min_h_0().child(body))
            .child(
                div()
                    .id("chat-view-prompt-form")
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(self.prompt_form.clone()),
            )
    }
}
