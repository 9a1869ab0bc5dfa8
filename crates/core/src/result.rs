use std::fmt;

use serde::{Deserialize, Serialize};

/// Result codes shared by the submission service and the auth flows.
///
/// `UserCreated` and `UserLoggedIn` travel on the same channel but signal success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    InvalidCredentials,
    InvalidSubmission,
    UserAlreadyExists,
    UnknownError,
    UserCreated,
    UserLoggedIn,
}

impl ResultCode {
    pub const ALL: [ResultCode; 6] = [
        ResultCode::InvalidCredentials,
        ResultCode::InvalidSubmission,
        ResultCode::UserAlreadyExists,
        ResultCode::UnknownError,
        ResultCode::UserCreated,
        ResultCode::UserLoggedIn,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidSubmission => "INVALID_SUBMISSION",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::UserCreated => "USER_CREATED",
            Self::UserLoggedIn => "USER_LOGGED_IN",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == raw.trim())
    }

    /// User-facing text for this code.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid credentials!",
            Self::InvalidSubmission => "Invalid submission, please try again!",
            Self::UserAlreadyExists => "User already exists, please log in!",
            Self::UnknownError => "Something went wrong, please try again!",
            Self::UserCreated => "User created, welcome!",
            Self::UserLoggedIn => "Logged in!",
        }
    }

    pub const fn is_error(self) -> bool {
        !matches!(self, Self::UserCreated | Self::UserLoggedIn)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Resolves a raw code to its message; unknown codes read as `UNKNOWN_ERROR`.
pub fn message_from_code(raw: &str) -> &'static str {
    ResultCode::parse(raw)
        .unwrap_or(ResultCode::UnknownError)
        .message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_submission_has_fixed_text() {
        assert_eq!(
            message_from_code("INVALID_SUBMISSION"),
            "Invalid submission, please try again!"
        );
    }

    #[test]
    fn unmapped_codes_fall_back_to_unknown_error() {
        assert_eq!(
            message_from_code("RATE_LIMITED"),
            ResultCode::UnknownError.message()
        );
        assert_eq!(message_from_code(""), ResultCode::UnknownError.message());
    }

    #[test]
    fn every_code_parses_from_its_wire_form() {
        for code in ResultCode::ALL {
            assert_eq!(ResultCode::parse(code.as_str()), Some(code));
            let json = serde_json::to_string(&code).expect("serialize code");
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn success_codes_are_not_errors() {
        assert!(!ResultCode::UserCreated.is_error());
        assert!(!ResultCode::UserLoggedIn.is_error());
        assert!(ResultCode::InvalidCredentials.is_error());
        assert!(ResultCode::UnknownError.is_error());
    }
}
