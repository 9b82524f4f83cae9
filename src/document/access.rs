use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Capability tokens understood by the collaboration service
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
pub enum Permission {
    #[strum(serialize = "room:write")]
    RoomWrite,
    #[strum(serialize = "room:read")]
    RoomRead,
    #[strum(serialize = "room:presence:write")]
    RoomPresenceWrite,
}

/// Human-facing access level chosen when sharing a document
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserType {
    Creator,
    Editor,
    Viewer,
}

impl UserType {
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            UserType::Creator | UserType::Editor => &[Permission::RoomWrite],
            UserType::Viewer => &[Permission::RoomRead, Permission::RoomPresenceWrite],
        }
    }

    /// Token set written into the room's access mapping
    pub fn access_tokens(self) -> Vec<String> {
        self.permissions()
            .iter()
            .map(|p| p.as_ref().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(UserType::Creator, vec!["room:write"])]
    #[case(UserType::Editor, vec!["room:write"])]
    #[case(UserType::Viewer, vec!["room:read", "room:presence:write"])]
    fn test_access_tokens(#[case] user_type: UserType, #[case] expected: Vec<&str>) {
        assert_eq!(user_type.access_tokens(), expected);
    }

    #[rstest]
    #[case("creator", UserType::Creator)]
    #[case("editor", UserType::Editor)]
    #[case("viewer", UserType::Viewer)]
    fn test_user_type_parses(#[case] raw: &str, #[case] expected: UserType) {
        assert_eq!(UserType::from_str(raw).unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[test]
    fn test_unknown_user_type_is_rejected() {
        assert!(UserType::from_str("admin").is_err());
        assert!(serde_json::from_str::<UserType>("\"admin\"").is_err());
    }

    #[test]
    fn test_user_type_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&UserType::Editor).unwrap(), "\"editor\"");
        let parsed: UserType = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(parsed, UserType::Viewer);
    }

    #[test]
    fn test_permission_tokens_round_trip_through_strum() {
        assert_eq!(
            Permission::from_str("room:presence:write").unwrap(),
            Permission::RoomPresenceWrite
        );
        assert_eq!(Permission::RoomWrite.to_string(), "room:write");
    }
}
