use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    v_flex,
};

/// Raw form value, forwarded to the prompt controller untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSubmitted {
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewChatRequested;

pub struct PromptForm {
    input_state: Entity<InputState>,
}

impl EventEmitter<PromptSubmitted> for PromptForm {}
impl EventEmitter<NewChatRequested> for PromptForm {}

impl PromptForm {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("Add items, separated by commas...")
                .clean_on_escape()
        });

        cx.subscribe_in(
            &input_state,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if let InputEvent::PressEnter { secondary: false } = event {
                    this.handle_submit(window, cx);
                }
            },
        )
        .detach();

        Self { input_state }
    }

    pub fn focus(&self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state
            .update(cx, |state, cx| state.focus(window, cx));
    }

    fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let value = self.input_state.read(cx).value().to_string();
        if value.trim().is_empty() {
            return;
        }

        cx.emit(PromptSubmitted { value });
        self.clear(window, cx);
    }
}

impl Render for PromptForm {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex().bg(theme.background).gap_2().p_3().child(
            h_flex()
                .w_full()
                .gap_2()
                .items_center()
                .px_3()
                .py_2()
                .rounded_lg()
                .border_1()
                .border_color(theme.border)
                .bg(theme.background)
                .child(
                    Button::new("prompt-new-chat")
                        .ghost()
                        .small()
                        .icon(IconName::Plus)
                        .tooltip("New chat")
                        .on_click(cx.listener(|_, _, _window, cx| {
                            cx.emit(NewChatRequested);
                        })),
                )
                .child(div().flex_1().min_w_0().child(Input::new(&self.input_state).w_full()))
                .child(
                    Button::new("prompt-send")
                        .small()
                        .primary()
                        .icon(IconName::ArrowUp)
                        .on_click(cx.listener(|this, _, window, cx| {
                            this.handle_submit(window, cx);
                        })),
                ),
        )
    }
}
