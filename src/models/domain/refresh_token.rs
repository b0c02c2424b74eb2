use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn new(user_id: &str, refresh_token: &str) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            refresh_token: refresh_token.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
