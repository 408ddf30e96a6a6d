use serde::{Deserialize, Serialize};

/// Account discriminant. Gates which optional profile fields are meaningful
/// and which ones a profile update may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Individual,
    Business,
}

impl Default for UserType {
    fn default() -> Self {
        UserType::Individual
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
    /// Argon2 hash, stored and serialized under the legacy `password` key.
    #[serde(rename = "password")]
    pub password_hash: String,
    pub country: Option<String>,
    pub user_type: UserType,
    pub business_name: Option<String>,
    pub business_description: Option<String>,
    /// Synthesized pseudo-address, `0x` followed by hex digits.
    pub address: String,
    /// Opaque session token issued at registration, `mock-token-` prefixed.
    pub token: String,
    pub receive_method: Option<String>,
    pub receive_details: Option<String>,
    pub send_method: Option<String>,
    pub role: String,
    pub profile_pic: Option<String>,
}

/// Partial update applied to a stored user. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub business_name: Option<String>,
    pub business_description: Option<String>,
    pub profile_pic: Option<String>,
    pub receive_method: Option<String>,
    pub receive_details: Option<String>,
    pub send_method: Option<String>,
}

impl User {
    /// Search predicate shared by every backend: email equality ignoring
    /// case, or a case-insensitive substring of the name or surname.
    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.email.eq_ignore_ascii_case(query)
            || self.name.to_lowercase().contains(&q)
            || self
                .surname
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&q))
    }

    /// Merges the supplied fields into the record. Surname only ever changes
    /// on individual accounts, the business fields only on business accounts,
    /// regardless of what the caller supplied.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(profile_pic) = patch.profile_pic {
            self.profile_pic = Some(profile_pic);
        }
        match self.user_type {
            UserType::Individual => {
                if let Some(surname) = patch.surname {
                    self.surname = Some(surname);
                }
            }
            UserType::Business => {
                if let Some(business_name) = patch.business_name {
                    self.business_name = Some(business_name);
                }
                if let Some(business_description) = patch.business_description {
                    self.business_description = Some(business_description);
                }
            }
        }
        if let Some(receive_method) = patch.receive_method {
            self.receive_method = Some(receive_method);
        }
        if let Some(receive_details) = patch.receive_details {
            self.receive_details = Some(receive_details);
        }
        if let Some(send_method) = patch.send_method {
            self.send_method = Some(send_method);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    pub surname: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub country: Option<String>,
    pub user_type: Option<UserType>,
    pub business_name: Option<String>,
    pub business_description: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub email: String,
    pub receive_method: Option<String>,
    pub receive_details: Option<String>,
    pub send_method: Option<String>,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub business_name: Option<String>,
    pub business_description: Option<String>,
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual() -> User {
        User {
            id: 1,
            name: "Ada".to_string(),
            surname: Some("Lovelace".to_string()),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            country: Some("Gabon".to_string()),
            user_type: UserType::Individual,
            business_name: None,
            business_description: None,
            address: "0xabc".to_string(),
            token: "mock-token-abc".to_string(),
            receive_method: None,
            receive_details: None,
            send_method: None,
            role: "user".to_string(),
            profile_pic: None,
        }
    }

    fn business() -> User {
        User {
            user_type: UserType::Business,
            business_name: Some("Ada Ltd".to_string()),
            business_description: Some("computing".to_string()),
            ..individual()
        }
    }

    #[test]
    fn patch_ignores_business_fields_on_individual_account() {
        let mut user = individual();
        user.apply_patch(UserPatch {
            surname: Some("Byron".to_string()),
            business_name: Some("Sneaky Ltd".to_string()),
            business_description: Some("nope".to_string()),
            ..UserPatch::default()
        });
        assert_eq!(user.surname.as_deref(), Some("Byron"));
        assert_eq!(user.business_name, None);
        assert_eq!(user.business_description, None);
    }

    #[test]
    fn patch_ignores_surname_on_business_account() {
        let mut user = business();
        user.apply_patch(UserPatch {
            surname: Some("Byron".to_string()),
            business_name: Some("Byron Ltd".to_string()),
            ..UserPatch::default()
        });
        assert_eq!(user.surname.as_deref(), Some("Lovelace"));
        assert_eq!(user.business_name.as_deref(), Some("Byron Ltd"));
    }

    #[test]
    fn patch_leaves_unsupplied_fields_untouched() {
        let mut user = individual();
        let before = user.clone();
        user.apply_patch(UserPatch {
            receive_method: Some("bank".to_string()),
            ..UserPatch::default()
        });
        assert_eq!(user.receive_method.as_deref(), Some("bank"));
        assert_eq!(user.name, before.name);
        assert_eq!(user.surname, before.surname);
        assert_eq!(user.send_method, before.send_method);
        assert_eq!(user.token, before.token);
    }
}
