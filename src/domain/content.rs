use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::ValidationErrors;

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub img: Option<String>,
    pub summary: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: String,
    pub img: Option<String>,
    pub summary: String,
    pub content: String,
}

impl ArticleDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.title.trim().is_empty() {
            errors.add_field("title", "This field is required.");
        } else if self.title.chars().count() > 256 {
            errors.add_field("title", "Ensure this value has at most 256 characters.");
        }
        if self.summary.chars().count() > 1024 {
            errors.add_field("summary", "Ensure this value has at most 1024 characters.");
        }
        if self.content.trim().is_empty() {
            errors.add_field("content", "This field is required.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
    pub score: i32,
}

#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub title: String,
    pub content: String,
    pub score: i32,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.title.trim().is_empty() {
            errors.add_field("title", "This field is required.");
        }
        if self.content.trim().is_empty() {
            errors.add_field("content", "This field is required.");
        }
        if self.score < 1 {
            errors.add_field("score", "Value must be at least 1.");
        } else if self.score > 10 {
            errors.add_field("score", "Value cannot exceed 10.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStat {
    pub username: String,
    pub review_count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub answer_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vacancy {
    pub id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub job_type_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct About {
    pub id: Uuid,
    pub logo: Option<String>,
    pub history: Option<String>,
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrivacyPolicy {
    pub id: Uuid,
    pub policy_content: String,
    pub created_at: DateTime<Utc>,
}
