use gpui::*;
use gpui_component::{
    ActiveTheme, Icon, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
};
use smartshop_core::{HeaderNav, Route, SessionUser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderAction {
    NewChat,
    Navigate(Route),
    ToggleTheme,
}

/// Top bar that switches between the member and guest branches.
pub struct HeaderView {
    nav: HeaderNav,
    path: String,
}

impl EventEmitter<HeaderAction> for HeaderView {}

impl HeaderView {
    pub fn new(nav: HeaderNav, route: &Route) -> Self {
        Self {
            nav,
            path: route.path(),
        }
    }

    pub fn set_nav(&mut self, nav: HeaderNav, cx: &mut Context<Self>) {
        self.nav = nav;
        cx.notify();
    }

    pub fn set_route(&mut self, route: &Route, cx: &mut Context<Self>) {
        self.path = route.path();
        cx.notify();
    }

    fn render_member(&self, user: &SessionUser, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();

        h_flex()
            .id("header-member")
            .gap_2()
            .items_center()
            .child(
                Button::new("header-new-list")
                    .ghost()
                    .small()
                    .icon(IconName::Plus)
                    .child("New list")
                    .on_click(cx.listener(|_, _, _window, cx| {
                        cx.emit(HeaderAction::NewChat);
                    })),
            )
            .child(
                div()
                    .id("header-user")
                    .size(px(28.))
                    .rounded_full()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.muted)
                    .flex()
                    .items_center()
                    .justify_center()
                    .child(
                        Icon::new(IconName::CircleUser)
                            .size(px(16.))
                            .text_color(theme.foreground),
                    ),
            )
            .child(Label::new(user.display_name().to_string()).text_sm())
            .into_any_element()
    }

    fn render_guest(&self, new_chat: &Route, login: &Route, cx: &Context<Self>) -> AnyElement {
        let new_chat = new_chat.clone();
        let login = login.clone();

        h_flex()
            .id("header-guest")
            .gap_2()
            .items_center()
            .child(
                Button::new("header-cart")
                    .ghost()
                    .small()
                    .icon(IconName::Plus)
                    .tooltip("New chat")
                    .on_click(cx.listener(move |_, _, _window, cx| {
                        cx.emit(HeaderAction::Navigate(new_chat.clone()));
                    })),
            )
            .child(
                Button::new("header-login")
                    .small()
                    .primary()
                    .child("Login")
                    .on_click(cx.listener(move |_, _, _window, cx| {
                        cx.emit(HeaderAction::Navigate(login.clone()));
                    })),
            )
            .into_any_element()
    }
}

impl Render for HeaderView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let branch = match &self.nav {
            HeaderNav::Member { user } => self.render_member(user, cx),
            HeaderNav::Guest { new_chat, login } => self.render_guest(new_chat, login, cx),
        };
        let theme_icon = if theme.mode.is_dark() {
            IconName::Sun
        } else {
            IconName::Moon
        };

        h_flex()
            .id("app-header")
            .w_full()
            .h(px(44.))
            .flex_shrink_0()
            .px_4()
            .items_center()
            .justify_between()
            .bg(theme.background)
            .border_b_1()
            .border_color(theme.border)
            .child(
                h_flex()
                    .gap_3()
                    .items_center()
                    .child(Label::new("Smart Shop").text_sm())
                    .child(
                        div()
                            .id("header-path")
                            .px_2()
                            .py_1()
                            .rounded_full()
                            .bg(theme.muted)
                            .border_1()
                            .border_color(theme.border)
                            .text_xs()
                            .text_color(theme.muted_foreground)
                            .child(self.path.clone()),
                    ),
            )
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    .child(branch)
                    .child(
                        Button::new("header-theme")
                            .ghost()
                            .small()
                            .icon(theme_icon)
                            .on_click(cx.listener(|_, _, _window, cx| {
                                cx.emit(HeaderAction::ToggleTheme);
                            })),
                    ),
            )
    }
}
