use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub duration: i64,
    pub description: String,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "course ID: {}, course title: {}, course duration: {}, course description: {}",
            self.id, self.title, self.duration, self.description
        )
    }
}

/// Body of `POST`/`PUT /api/v1/course`.
///
/// Missing fields fall back to their zero values so that `validate` can
/// reject them with a single message instead of a serde error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseRequest {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Duration")]
    pub duration: i64,
    #[serde(alias = "Description")]
    pub description: String,
}

impl CourseRequest {
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && self.duration != 0 && !self.description.is_empty()
    }
}
