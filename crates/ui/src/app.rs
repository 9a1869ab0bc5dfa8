use std::sync::Arc;

use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use gpui::*;
use gpui_component::notification::{Notification, NotificationList};
use gpui_component::{
    ActiveTheme, ThemeMode, Sizable,
    button::{Button, ButtonVariants},
    label::Label,
    v_flex,
};
use gpui_tokio_bridge::Tokio;
use smartshop_core::{
    AiStateHandle, HeaderNav, MessageStore, Notice, NoticeLevel, PromptDeps, ResultCode, Route,
    Session, SessionProvider, SubmissionService,
};
use smartshop_llm::create_service;
use tokio::runtime::Handle;

use crate::chat::{
    ChannelNavigator, ChannelNotifier, ChatView, NavigationEvent, NewChatRequested,
    UnconfiguredService, navigation_channel, notice_channel,
};
use crate::header::{HeaderAction, HeaderView};
use crate::settings::{AppSettings, FileSessionProvider, SettingsStore};

gpui::actions!(shell, [NewChat, Quit]);

/// Builds the assistant from settings, or a stand-in that fails every submit.
pub fn build_service(
    settings: &AppSettings,
    ai_state: AiStateHandle,
) -> Arc<dyn SubmissionService> {
    match create_service(settings.provider_config(), ai_state) {
        Ok(service) => service,
        Err(error) => {
            tracing::warn!(error = %error, "assistant unavailable, submissions will fail");
            Arc::new(UnconfiguredService::new(error.to_string()))
        }
    }
}

/// Root view: header, routed body and the toast layer.
///
/// Owns the message list and conversation state so a reload can rebuild the
/// chat view without losing either.
pub struct SmartShopShell {
    notification_list: Entity<NotificationList>,
    header: Entity<HeaderView>,
    chat_view: Option<Entity<ChatView>>,
    route: Route,
    runtime: Option<Handle>,
    settings: SettingsStore,
    session_path: String,
    ai_state: AiStateHandle,
    store: MessageStore,
    service: Arc<dyn SubmissionService>,
    notifier: Arc<ChannelNotifier>,
    navigator: Arc<ChannelNavigator>,
    _tasks: Vec<Task<()>>,
}

impl SmartShopShell {
    pub fn new(
        notification_list: Entity<NotificationList>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let settings = SettingsStore::load();
        let ai_state = AiStateHandle::default();
        let service = build_service(&settings.settings(), ai_state.clone());
        let (notifier, notices) = notice_channel();
        let (navigator, navigation) = navigation_channel();
        let route = Route::New;

        let header = cx.new(|_| HeaderView::new(HeaderNav::from_session(None), &route));
        cx.subscribe_in(&header, window, |this, _, action: &HeaderAction, window, cx| {
            this.handle_header_action(action.clone(), window, cx);
        })
        .detach();

        let session_provider = Arc::new(FileSessionProvider::load_default());
        let session_path = session_provider.path().display().to_string();

        let tasks = vec![
            Self::bootstrap_runtime(window, cx),
            Self::load_session(session_provider, cx),
            Self::forward_notices(notices, window, cx),
            Self::forward_navigation(navigation, window, cx),
        ];

        Self {
            notification_list,
            header,
            chat_view: None,
            route,
            runtime: None,
            settings,
            session_path,
            ai_state,
            store: MessageStore::new(),
            service,
            notifier,
            navigator,
            _tasks: tasks,
        }
    }

    fn bootstrap_runtime(window: &mut Window, cx: &mut Context<Self>) -> Task<()> {
        let runtime_task = Tokio::spawn(cx, async { Handle::current() });

        cx.spawn_in(window, async move |this, cx| match runtime_task.await {
            Ok(runtime) => {
                let _ = this.update_in(cx, |this, window, cx| {
                    this.runtime = Some(runtime);
                    this.rebuild_chat_view(window, cx);
                });
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to obtain the tokio runtime handle");
            }
        })
    }

    fn load_session(provider: Arc<FileSessionProvider>, cx: &mut Context<Self>) -> Task<()> {
        let session_task = Tokio::spawn(cx, async move { provider.auth().await });

        cx.spawn(async move |this, cx| match session_task.await {
            Ok(session) => {
                let _ = this.update(cx, |this, cx| this.apply_session(session, cx));
            }
            Err(error) => tracing::warn!(error = %error, "session lookup failed"),
        })
    }

    fn forward_notices(
        mut notices: UnboundedReceiver<Notice>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Task<()> {
        cx.spawn_in(window, async move |this, cx| {
            while let Some(notice) = notices.next().await {
                let shown = this.update_in(cx, |this, window, cx| {
                    this.show_notice(notice, window, cx);
                });
                if shown.is_err() {
                    break;
                }
            }
        })
    }

    fn forward_navigation(
        mut navigation: UnboundedReceiver<NavigationEvent>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Task<()> {
        cx.spawn_in(window, async move |this, cx| {
            while let Some(event) = navigation.next().await {
                let applied = this.update_in(cx, |this, window, cx| {
                    this.handle_navigation(event, window, cx);
                });
                if applied.is_err() {
                    break;
                }
            }
        })
    }

    fn apply_session(&mut self, session: Option<Session>, cx: &mut Context<Self>) {
        let nav = HeaderNav::from_session(session.as_ref());
        tracing::info!(member = nav.is_member(), "resolved session");
        self.header.update(cx, |header, cx| header.set_nav(nav, cx));
    }

    fn show_notice(&mut self, notice: Notice, window: &mut Window, cx: &mut Context<Self>) {
        let notification = match notice.level {
            NoticeLevel::Error => Notification::error(notice.text),
            NoticeLevel::Success => Notification::success(notice.text),
        };
        self.notification_list
            .update(cx, |list, cx| list.push(notification, window, cx));
    }

    fn handle_navigation(
        &mut self,
        event: NavigationEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match event {
            NavigationEvent::Replace(path) => match Route::parse(&path) {
                Some(route) => self.set_route(route, cx),
                None => tracing::warn!(path = %path, "ignoring unknown path"),
            },
            NavigationEvent::Reload => {
                tracing::debug!(path = %self.route.path(), "reloading chat view");
                self.rebuild_chat_view(window, cx);
            }
        }
    }

    fn handle_header_action(
        &mut self,
        action: HeaderAction,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match action {
            HeaderAction::NewChat | HeaderAction::Navigate(Route::New) => {
                self.start_new_chat(window, cx);
            }
            HeaderAction::Navigate(route) => self.set_route(route, cx),
            HeaderAction::ToggleTheme => self.toggle_theme(window, cx),
        }
    }

    fn set_route(&mut self, route: Route, cx: &mut Context<Self>) {
        self.header
            .update(cx, |header, cx| header.set_route(&route, cx));
        self.route = route;
        cx.notify();
    }

    fn start_new_chat(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let chat_id = self.ai_state.restart();
        self.store.reset(Vec::new());
        tracing::info!(chat_id = %chat_id, "started a new chat");
        self.set_route(Route::New, cx);
        self.rebuild_chat_view(window, cx);
    }

    /// Replaces the chat view; the old controller is torn down on drop.
    fn rebuild_chat_view(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let Some(runtime) = self.runtime.clone() else {
            return;
        };

        let deps = PromptDeps {
            store: self.store.clone(),
            service: Arc::clone(&self.service),
            notifier: self.notifier.clone(),
            navigator: self.navigator.clone(),
            ai_state: self.ai_state.clone(),
        };
        let debounce = self.settings.settings().debounce();

        let chat_view = cx.new(|cx| ChatView::new(runtime, debounce, deps, window, cx));
        cx.subscribe_in(
            &chat_view,
            window,
            |this, _, _event: &NewChatRequested, window, cx| {
                this.start_new_chat(window, cx);
            },
        )
        .detach();

        self.chat_view = Some(chat_view);
        cx.notify();
    }

    fn toggle_theme(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let mut next = AppSettings::clone(&self.settings.settings());
        next.theme_mode = if next.theme_mode.is_dark() {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        };
        next.apply_theme(Some(window), cx);

        if let Err(error) = self.settings.update(next) {
            tracing::error!(error = %error, "failed to save theme preference");
            self.show_notice(
                Notice::error(ResultCode::UnknownError.message()),
                window,
                cx,
            );
        }
        cx.refresh_windows();
    }

    fn render_body(&self, cx: &Context<Self>) -> AnyElement {
        match (&self.route, &self.chat_view) {
            (Route::Login | Route::Signup, _) => self.render_auth_panel(cx),
            (_, Some(chat_view)) => chat_view.clone().into_any_element(),
            (_, None) => v_flex()
                .size_full()
                .items_center()
                .justify_center()
                .child(Label::new("Starting...").text_sm())
                .into_any_element(),
        }
    }

    fn render_auth_panel(&self, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let title = if self.route == Route::Signup {
            "Create an account"
        } else {
            "Sign in"
        };

        v_flex()
            .id("auth-panel")
            .size_full()
            .items_center()
            .justify_center()
            .gap_3()
            .child(Label::new(title).text_lg())
            .child(
                Label::new(format!(
                    "Sessions are read from {} on startup.",
                    self.session_path
                ))
                .text_sm()
                .text_color(theme.muted_foreground),
            )
            .child(
                Button::new("auth-back")
                    .small()
                    .ghost()
                    .child("Back to shopping")
                    .on_click(cx.listener(|this, _, window, cx| {
                        this.start_new_chat(window, cx);
                    })),
            )
            .into_any_element()
    }
}

impl Render for SmartShopShell {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .id("app-shell")
            .size_full()
            .relative()
            .bg(theme.background)
            .on_action(cx.listener(|this, _: &NewChat, window, cx| {
                this.start_new_chat(window, cx);
            }))
            .child(
                v_flex()
                    .size_full()
                    .child(self.header.clone())
                    .child(
                        div()
                            .id("main-content")
                            .flex_1()
                            .min_h_0()
                            .overflow_hidden()
                            .child(self.render_body(cx)),
                    ),
            )
            .child(self.notification_list.clone())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use smartshop_core::ChatError;

    use super::*;

    #[test]
    fn settings_without_api_key_fall_back_to_failing_service() {
        let service = build_service(&AppSettings::default(), AiStateHandle::default());
        let result = block_on(service.submit("milk".to_string()));
        assert!(matches!(result, Err(ChatError::Transport { .. })));
    }
}
