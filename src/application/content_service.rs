use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::content::{
    About, Article, ArticleDraft, Faq, PrivacyPolicy, Review, ReviewDraft, ReviewStat, Vacancy,
};
use crate::domain::errors::{DomainError, ValidationErrors};
use crate::domain::identity::Role;
use crate::domain::ports::ContentRepository;

pub struct ContentService<R> {
    repo: R,
}

impl<R: ContentRepository> ContentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_articles(&self) -> Result<Vec<Article>, DomainError> {
        self.repo.list_articles()
    }

    pub fn get_article(&self, id: Uuid) -> Result<Article, DomainError> {
        self.repo
            .find_article(id)?
            .ok_or(DomainError::NotFound("Article"))
    }

    pub fn create_article(&self, principal: &Principal, draft: ArticleDraft) -> Result<Article, DomainError> {
        let identity = principal.require_admin()?;
        draft.validate()?;
        self.repo.create_article(identity.account_id, draft)
    }

    pub fn list_faqs(&self) -> Result<Vec<Faq>, DomainError> {
        self.repo.list_faqs()
    }

    pub fn create_faq(&self, principal: &Principal, question: String, answer: String) -> Result<Faq, DomainError> {
        principal.require_admin()?;
        let mut errors = ValidationErrors::default();
        for (field, value) in [("question", &question), ("answer", &answer)] {
            if value.trim().is_empty() {
                errors.add_field(field, "This field is required.");
            } else if value.chars().count() > 256 {
                errors.add_field(field, "Ensure this value has at most 256 characters.");
            }
        }
        errors.into_result()?;
        self.repo.create_faq(question, answer)
    }

    pub fn list_vacancies(&self) -> Result<Vec<Vacancy>, DomainError> {
        self.repo.list_vacancies()
    }

    pub fn create_vacancy(
        &self,
        principal: &Principal,
        job_title: String,
        job_description: String,
        job_type_id: Option<Uuid>,
    ) -> Result<Vacancy, DomainError> {
        principal.require_admin()?;
        let mut errors = ValidationErrors::default();
        if job_title.trim().is_empty() {
            errors.add_field("job_title", "This field is required.");
        }
        if job_description.trim().is_empty() {
            errors.add_field("job_description", "This field is required.");
        }
        errors.into_result()?;
        self.repo.create_vacancy(job_title, job_description, job_type_id)
    }

    pub fn about(&self) -> Result<Option<About>, DomainError> {
        self.repo.latest_about()
    }

    pub fn publish_about(
        &self,
        principal: &Principal,
        logo: Option<String>,
        history: Option<String>,
        contact_info: String,
    ) -> Result<About, DomainError> {
        principal.require_admin()?;
        if contact_info.trim().is_empty() {
            let mut errors = ValidationErrors::default();
            errors.add_field("contact_info", "This field is required.");
            return Err(errors.into());
        }
        self.repo.publish_about(logo, history, contact_info)
    }

    pub fn privacy_policy(&self) -> Result<Option<PrivacyPolicy>, DomainError> {
        self.repo.latest_privacy_policy()
    }

    pub fn publish_privacy_policy(
        &self,
        principal: &Principal,
        policy_content: String,
    ) -> Result<PrivacyPolicy, DomainError> {
        principal.require_admin()?;
        if policy_content.trim().is_empty() {
            let mut errors = ValidationErrors::default();
            errors.add_field("policy_content", "This field is required.");
            return Err(errors.into());
        }
        self.repo.publish_privacy_policy(policy_content)
    }

    pub fn list_reviews(&self) -> Result<Vec<Review>, DomainError> {
        self.repo.list_reviews()
    }

    pub fn create_review(&self, principal: &Principal, draft: ReviewDraft) -> Result<Review, DomainError> {
        let identity = principal.require_identity()?;
        draft.validate()?;
        self.repo.create_review(identity.account_id, draft)
    }

    /// Only the author may edit; the check happens before anything is written.
    pub fn update_review(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: ReviewDraft,
    ) -> Result<Review, DomainError> {
        let identity = principal.require_identity()?;
        let review = self.repo.find_review(id)?.ok_or(DomainError::NotFound("Review"))?;
        if review.author_id != identity.account_id {
            return Err(DomainError::Forbidden);
        }
        draft.validate()?;
        self.repo.update_review(id, draft)
    }

    /// Authors may delete their own reviews; admins may remove any.
    pub fn delete_review(&self, principal: &Principal, id: Uuid) -> Result<(), DomainError> {
        let identity = principal.require_identity()?;
        let review = self.repo.find_review(id)?.ok_or(DomainError::NotFound("Review"))?;
        if review.author_id != identity.account_id && identity.role != Role::Admin {
            return Err(DomainError::Forbidden);
        }
        self.repo.delete_review(id)
    }

    pub fn review_stats(&self, principal: &Principal) -> Result<Vec<ReviewStat>, DomainError> {
        principal.require_staff_or_admin()?;
        self.repo.review_stats()
    }
}
