use crate::result::{ResultCode, message_from_code};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-facing notification (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    /// Builds the notice for a raw result code; unknown codes are errors.
    pub fn from_code(raw: &str) -> Self {
        let text = message_from_code(raw);
        match ResultCode::parse(raw) {
            Some(code) if !code.is_error() => Self::success(text),
            _ => Self::error(text),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_levels() {
        assert_eq!(
            Notice::from_code("USER_CREATED"),
            Notice::success("User created, welcome!")
        );
        assert_eq!(
            Notice::from_code("INVALID_CREDENTIALS"),
            Notice::error("Invalid credentials!")
        );
        assert_eq!(Notice::from_code("NOPE").level, NoticeLevel::Error);
    }
}
