use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "member" => Some(UserRole::Member),
            _ => None,
        }
    }
}

/// Identity supplied by the session layer. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub display_name: String,
    pub role: UserRole,
}

impl SessionUser {
    /// Deletion is offered to admins only; the store performs no check of
    /// its own, enforcement belongs server-side.
    pub fn can_delete_conversations(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_are_offered_deletion() {
        let admin = SessionUser {
            id: "u1".to_string(),
            display_name: "Alva".to_string(),
            role: UserRole::Admin,
        };
        let member = SessionUser {
            role: UserRole::Member,
            ..admin.clone()
        };
        assert!(admin.can_delete_conversations());
        assert!(!member.can_delete_conversations());
    }

    #[test]
    fn roles_round_trip_through_their_wire_names() {
        for role in [UserRole::Admin, UserRole::Member] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("superuser"), None);
    }
}
