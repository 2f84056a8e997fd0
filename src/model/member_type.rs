use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    pub const ALL: [MemberTypeId; 2] = [MemberTypeId::Basic, MemberTypeId::Business];
}

impl fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberTypeId::Basic => write!(f, "BASIC"),
            MemberTypeId::Business => write!(f, "BUSINESS"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberType {
    pub id: MemberTypeId,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_id_serde() {
        assert_eq!(
            serde_json::to_string(&MemberTypeId::Business).unwrap(),
            "\"BUSINESS\""
        );
        let id: MemberTypeId = serde_json::from_str("\"BASIC\"").unwrap();
        assert_eq!(id, MemberTypeId::Basic);
        assert_eq!(id.to_string(), "BASIC");
    }
}
