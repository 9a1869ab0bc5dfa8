use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::navigation::{LOGIN_PATH, SIGNUP_PATH};
use crate::submission::BoxFuture;

pub const AUTH_SECRET_ENV: &str = "AUTH_SECRET";

/// Pages the auth provider redirects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPages {
    pub sign_in: String,
    pub new_user: String,
}

impl Default for AuthPages {
    fn default() -> Self {
        Self {
            sign_in: LOGIN_PATH.to_string(),
            new_user: SIGNUP_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthConfig {
    pub secret: Option<String>,
    pub pages: AuthPages,
}

impl AuthConfig {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|value| !value.trim().is_empty()),
            pages: AuthPages::default(),
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var(AUTH_SECRET_ENV).ok();
        if secret.is_none() {
            tracing::warn!("{AUTH_SECRET_ENV} is not set; sessions cannot be verified");
        }
        Self::new(secret)
    }

    /// Every route is reachable; login state only changes what the header shows.
    pub fn authorized(&self, session: Option<&Session>, path: &str) -> bool {
        let logged_in = session.is_some_and(Session::is_logged_in);
        tracing::trace!(path, logged_in, "authorizing route");
        true
    }

    /// Copies the signed-in user's id into the token, keeping existing claims.
    pub fn jwt_callback(&self, mut token: Token, user: Option<&SessionUser>) -> Token {
        if let Some(id) = user.and_then(|user| user.id.clone()) {
            token.id = Some(id);
        }
        token
    }

    /// Exposes the token id on `session.user`, keeping every other field.
    pub fn session_callback(&self, mut session: Session, token: Option<&Token>) -> Session {
        let Some(token) = token else {
            return session;
        };

        let mut user = session.user.take().unwrap_or_default();
        user.id = token.id.clone();
        session.user = Some(user);
        session
    }
}

/// Signed-in user as exposed on the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    /// Best label for menus: name, then email, then id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("Account")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// JWT claims; unknown claims survive a round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

/// Resolves the current session, `None` when signed out.
pub trait SessionProvider: Send + Sync {
    fn auth<'a>(&'a self) -> BoxFuture<'a, Option<Session>>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user(id: Option<&str>) -> SessionUser {
        SessionUser {
            id: id.map(str::to_string),
            name: Some("Ada".to_string()),
            ..SessionUser::default()
        }
    }

    #[test]
    fn default_pages_point_at_login_and_signup() {
        let config = AuthConfig::new(Some("secret".to_string()));
        assert_eq!(config.pages.sign_in, "/login");
        assert_eq!(config.pages.new_user, "/signup");
        assert!(config.authorized(None, "/new"));
    }

    #[test]
    fn blank_secret_is_treated_as_missing() {
        assert_eq!(AuthConfig::new(Some("  ".to_string())).secret, None);
    }

    #[test]
    fn jwt_callback_merges_user_id_into_existing_claims() {
        let config = AuthConfig::default();
        let token: Token = serde_json::from_value(json!({ "sub": "42", "iat": 1 }))
            .expect("token json");

        let token = config.jwt_callback(token, Some(&user(Some("user-1"))));

        assert_eq!(token.id.as_deref(), Some("user-1"));
        assert_eq!(token.claims.get("sub"), Some(&json!("42")));
        assert_eq!(token.claims.get("iat"), Some(&json!(1)));
    }

    #[test]
    fn jwt_callback_without_user_keeps_token() {
        let config = AuthConfig::default();
        let token = Token {
            id: Some("kept".to_string()),
            ..Token::default()
        };
        assert_eq!(config.jwt_callback(token.clone(), None), token);
    }

    #[test]
    fn session_callback_exposes_token_id_and_keeps_fields() {
        let config = AuthConfig::default();
        let session: Session = serde_json::from_value(json!({
            "user": { "name": "Ada", "email": "ada@example.com", "role": "admin" },
            "expires": "2030-01-01T00:00:00Z",
            "theme": "dark"
        }))
        .expect("session json");
        let token = Token {
            id: Some("user-1".to_string()),
            ..Token::default()
        };

        let session = config.session_callback(session, Some(&token));
        let user = session.user.as_ref().expect("user present");

        assert_eq!(user.id.as_deref(), Some("user-1"));
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.extra.get("role"), Some(&json!("admin")));
        assert_eq!(session.extra.get("theme"), Some(&json!("dark")));
        assert_eq!(session.expires.as_deref(), Some("2030-01-01T00:00:00Z"));
    }

    #[test]
    fn session_callback_without_token_is_identity() {
        let config = AuthConfig::default();
        let session = Session {
            user: Some(user(None)),
            ..Session::default()
        };
        assert_eq!(config.session_callback(session.clone(), None), session);
    }
}
