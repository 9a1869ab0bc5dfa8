use gpui::*;
use gpui_component::{ActiveTheme, label::Label, v_flex};

pub const WELCOME_TITLE: &str = "Welcome to the Smart Shop Demo!";
pub const WELCOME_HINT: &str = "This is an AI shopping list app.";

#[derive(IntoElement)]
pub struct EmptyScreen;

impl RenderOnce for EmptyScreen {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id("empty-screen")
            .size_full()
            .items_center()
            .justify_center()
            .px_4()
            .child(
                v_flex()
                    .max_w(px(672.))
                    .gap_2()
                    .p_8()
                    .rounded_lg()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .child(Label::new(WELCOME_TITLE).text_lg())
                    .child(Label::new(WELCOME_HINT).text_color(theme.muted_foreground)),
            )
    }
}
