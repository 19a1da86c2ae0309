//! Tutor search endpoints.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, Envelope};
use crate::error::ApiError;

/// A tutor listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub levels: Vec<String>,
    /// Hourly rate in minor currency units.
    pub hourly_rate: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Search filters for `GET /tutors`.
#[derive(Debug, Clone, Default)]
pub struct TutorQuery {
    pub subject: Option<String>,
    pub level: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TutorQuery {
    fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(s) = &self.subject {
            params.push(format!("subject={s}"));
        }
        if let Some(l) = &self.level {
            params.push(format!("level={l}"));
        }
        if let Some(n) = self.limit {
            params.push(format!("limit={n}"));
        }
        if let Some(n) = self.offset {
            params.push(format!("offset={n}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl ApiClient {
    /// `GET /tutors` with optional filters.
    pub async fn list_tutors(&self, query: &TutorQuery) -> Result<Vec<Tutor>, ApiError> {
        let path = format!("/tutors{}", query.to_query_string());
        let resp: Envelope<Vec<Tutor>> = self.get(&path).await?;
        Ok(resp.data)
    }

    /// `GET /tutors/{id}`.
    pub async fn get_tutor(&self, id: &str) -> Result<Tutor, ApiError> {
        let resp: Envelope<Tutor> = self.get(&format!("/tutors/{id}")).await?;
        Ok(resp.data)
    }
}
