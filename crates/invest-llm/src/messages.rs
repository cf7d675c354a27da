//! Dialogue messages exchanged with a completion service

use serde::{Deserialize, Serialize};

/// Who a message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name used by chat-completion APIs
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One plain-text message of the context sent to the advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn text(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role() {
        assert_eq!(Message::user("5000 جنيه").role, Role::User);
        assert_eq!(Message::assistant("تم").role, Role::Assistant);
        assert_eq!(Message::system("كن موجزاً").text(), "كن موجزاً");
    }

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_value(Message::system("Be brief")).unwrap();
        assert_eq!(json["role"], Role::System.as_str());
        assert_eq!(json["content"], "Be brief");
    }
}
