/// Channel adapters between the submission pipeline and the UI thread.
pub mod bridge;
pub mod empty_screen;
pub mod message_list;
pub mod prompt_form;
pub mod view;

pub use bridge::{
    ChannelNavigator, ChannelNotifier, NavigationEvent, UnconfiguredService, navigation_channel,
    notice_channel,
};
pub use empty_screen::EmptyScreen;
pub use message_list::MessageList;
pub use prompt_form::{NewChatRequested, PromptForm, PromptSubmitted};
pub use view::ChatView;
