use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// An identity record in either the `users` or the `admin` collection.
/// Which collection holds it decides the role; the record itself has no role.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    // Stored and compared as plaintext, see DESIGN.md
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl Account {
    pub fn new(email: &str, password: &str, full_name: Option<&str>) -> Self {
        Account {
            id: None,
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.map(str::to_string),
            date_of_birth: None,
        }
    }

    /// Hex form of the document id, used as the token subject.
    pub fn subject_id(&self) -> Option<String> {
        self.id.as_ref().map(|oid| oid.to_hex())
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
