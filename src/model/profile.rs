use super::MemberTypeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: String,
    pub member_type_id: MemberTypeId,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: String,
    pub member_type_id: MemberTypeId,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl Profile {
    pub fn new(id: String, data: NewProfile) -> Self {
        Self {
            id,
            is_male: data.is_male,
            year_of_birth: data.year_of_birth,
            user_id: data.user_id,
            member_type_id: data.member_type_id,
        }
    }

    pub fn apply(&mut self, changes: ProfileChanges) {
        if let Some(is_male) = changes.is_male {
            self.is_male = is_male;
        }
        if let Some(year) = changes.year_of_birth {
            self.year_of_birth = year;
        }
        if let Some(member_type_id) = changes.member_type_id {
            self.member_type_id = member_type_id;
        }
    }
}
