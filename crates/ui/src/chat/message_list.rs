use gpui::*;
use gpui_component::{ActiveTheme, h_flex, label::Label, text::TextView, v_flex};
use smartshop_core::{Message, MessageDisplay};

const USER_BUBBLE_MAX_WIDTH: Pixels = px(540.);
const USER_BUBBLE_PADDING_X: Pixels = px(14.);
const USER_BUBBLE_PADDING_Y: Pixels = px(10.);

pub struct MessageList {
    messages: Vec<Message>,
    scroll_handle: ScrollHandle,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            messages: Vec::new(),
            scroll_handle: ScrollHandle::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn set_messages(&mut self, messages: Vec<Message>, cx: &mut Context<Self>) {
        let grew = messages.len() > self.messages.len();
        self.messages = messages;
        if grew {
            self.scroll_handle.scroll_to_bottom();
        }
        cx.notify();
    }

    fn render_message_row(&self, message: &Message, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();

        match &message.display {
            MessageDisplay::User(text) => v_flex()
                .w_full()
                .items_end()
                .child(
                    div()
                        .max_w(USER_BUBBLE_MAX_WIDTH)
                        .px(USER_BUBBLE_PADDING_X)
                        .py(USER_BUBBLE_PADDING_Y)
                        .rounded_lg()
                        .bg(theme.accent)
                        .text_color(theme.accent_foreground)
                        .child(Label::new(text.clone()).text_sm()),
                )
                .into_any_element(),
            MessageDisplay::Spinner => h_flex()
                .w_full()
                .gap_2()
                .items_center()
                .child(div().size(px(8.)).rounded_full().bg(theme.primary))
                .child(
                    Label::new("Finding the best buy...")
                        .text_xs()
                        .text_color(theme.foreground.opacity(0.65)),
                )
                .into_any_element(),
            MessageDisplay::Assistant(text) => {
                let markdown_id =
                    ElementId::Name(SharedString::from(format!("assistant-{}", message.id)));

                v_flex()
                    .w_full()
                    .gap_2()
                    .child(
                        Label::new("Assistant")
                            .text_xs()
                            .text_color(theme.foreground.opacity(0.5)),
                    )
                    .child(TextView::markdown(markdown_id, text.clone()).selectable(true))
                    .into_any_element()
            }
        }
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let rows = self
            .messages
            .iter()
            .map(|message| self.render_message_row(message, cx))
            .collect::<Vec<_>>();

        v_flex()
            .id("message-list")
            .size_full()
            .min_h_0()
            .overflow_y_scroll()
            .track_scroll(&self.scroll_handle)
            .px_4()
            .py_3()
            .gap_4()
            .children(rows)
    }
}
