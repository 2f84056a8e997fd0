use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub balance: f64,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub balance: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl User {
    pub fn new(id: String, data: NewUser) -> Self {
        Self {
            id,
            name: data.name,
            balance: data.balance,
        }
    }

    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(balance) = changes.balance {
            self.balance = balance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut user = User::new(
            "u1".to_string(),
            NewUser {
                name: "Ann".to_string(),
                balance: 10.5,
            },
        );
        user.apply(UserChanges {
            balance: Some(0.0),
            ..Default::default()
        });
        assert_eq!(user.name, "Ann");
        assert_eq!(user.balance, 0.0);
    }
}
