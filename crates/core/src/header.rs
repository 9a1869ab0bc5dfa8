use crate::auth::{Session, SessionUser};
use crate::navigation::Route;

/// Navigation branch shown in the app header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderNav {
    /// New-list action plus the user's avatar and name.
    Member { user: SessionUser },
    /// Cart shortcut to a new chat plus a login link.
    Guest { new_chat: Route, login: Route },
}

impl HeaderNav {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session.and_then(|session| session.user.clone()) {
            Some(user) => Self::Member { user },
            None => Self::Guest {
                new_chat: Route::New,
                login: Route::Login,
            },
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_shows_guest_links() {
        let nav = HeaderNav::from_session(None);
        assert_eq!(
            nav,
            HeaderNav::Guest {
                new_chat: Route::New,
                login: Route::Login,
            }
        );
    }

    #[test]
    fn session_without_user_is_guest() {
        let session = Session::default();
        assert!(!HeaderNav::from_session(Some(&session)).is_member());
    }

    #[test]
    fn session_user_switches_to_member_branch() {
        let session = Session {
            user: Some(SessionUser {
                id: Some("u-7".to_string()),
                ..SessionUser::default()
            }),
            ..Session::default()
        };

        match HeaderNav::from_session(Some(&session)) {
            HeaderNav::Member { user } => assert_eq!(user.id.as_deref(), Some("u-7")),
            other => panic!("expected member branch, got {other:?}"),
        }
    }
}
