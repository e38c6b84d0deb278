use chrono::Utc;
use diesel::dsl::count;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::content::{
    About, Article, ArticleDraft, Faq, PrivacyPolicy, Review, ReviewDraft, ReviewStat, Vacancy,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::ContentRepository;
use crate::schema::{about_pages, accounts, articles, faqs, privacy_policies, reviews, vacancies};

use super::models::{
    AboutRow, ArticleRow, FaqRow, NewArticleRow, NewReviewRow, PrivacyPolicyRow,
    ReviewChangeset, ReviewRow, VacancyRow,
};

#[derive(Clone)]
pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn article((row, author_name): (ArticleRow, String)) -> Article {
    Article {
        id: row.id,
        title: row.title,
        author_id: row.author_id,
        author_name,
        img: row.img,
        summary: row.summary,
        content: row.content,
        publication_date: row.publication_date,
    }
}

fn review((row, author_name): (ReviewRow, String)) -> Review {
    Review {
        id: row.id,
        title: row.title,
        author_id: row.author_id,
        author_name,
        content: row.content,
        publication_date: row.publication_date,
        score: row.score,
    }
}

fn find_review(conn: &mut PgConnection, id: Uuid) -> Result<Option<Review>, DomainError> {
    Ok(reviews::table
        .inner_join(accounts::table)
        .filter(reviews::id.eq(id))
        .select((ReviewRow::as_select(), accounts::username))
        .first(conn)
        .optional()?
        .map(review))
}

impl ContentRepository for DieselContentRepository {
    fn list_articles(&self) -> Result<Vec<Article>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = articles::table
            .inner_join(accounts::table)
            .order(articles::publication_date.desc())
            .select((ArticleRow::as_select(), accounts::username))
            .load(&mut conn)?;
        Ok(rows.into_iter().map(article).collect())
    }

    fn find_article(&self, id: Uuid) -> Result<Option<Article>, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(articles::table
            .inner_join(accounts::table)
            .filter(articles::id.eq(id))
            .select((ArticleRow::as_select(), accounts::username))
            .first(&mut conn)
            .optional()?
            .map(article))
    }

    fn create_article(&self, author_id: Uuid, draft: ArticleDraft) -> Result<Article, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(articles::table)
                .values(&NewArticleRow {
                    id: Uuid::new_v4(),
                    title: draft.title,
                    author_id,
                    img: draft.img,
                    summary: draft.summary,
                    content: draft.content,
                })
                .returning(ArticleRow::as_returning())
                .get_result(conn)?;
            let author_name: String = accounts::table
                .find(author_id)
                .select(accounts::username)
                .first(conn)?;
            Ok(article((row, author_name)))
        })
    }

    fn list_faqs(&self) -> Result<Vec<Faq>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = faqs::table
            .order(faqs::answer_date.desc())
            .select(FaqRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Faq::from).collect())
    }

    fn create_faq(&self, question: String, answer: String) -> Result<Faq, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(faqs::table)
            .values(&FaqRow {
                id: Uuid::new_v4(),
                question,
                answer,
                answer_date: Utc::now(),
            })
            .returning(FaqRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn list_vacancies(&self) -> Result<Vec<Vacancy>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = vacancies::table
            .order(vacancies::job_title.asc())
            .select(VacancyRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Vacancy::from).collect())
    }

    fn create_vacancy(
        &self,
        job_title: String,
        job_description: String,
        job_type_id: Option<Uuid>,
    ) -> Result<Vacancy, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(vacancies::table)
            .values(&VacancyRow {
                id: Uuid::new_v4(),
                job_title,
                job_description,
                job_type_id,
            })
            .returning(VacancyRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn latest_about(&self) -> Result<Option<About>, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(about_pages::table
            .order(about_pages::created_at.desc())
            .select(AboutRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(About::from))
    }

    fn publish_about(
        &self,
        logo: Option<String>,
        history: Option<String>,
        contact_info: String,
    ) -> Result<About, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(about_pages::table)
            .values(&AboutRow {
                id: Uuid::new_v4(),
                logo,
                history,
                contact_info,
                created_at: Utc::now(),
            })
            .returning(AboutRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn latest_privacy_policy(&self) -> Result<Option<PrivacyPolicy>, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(privacy_policies::table
            .order(privacy_policies::created_at.desc())
            .select(PrivacyPolicyRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(PrivacyPolicy::from))
    }

    fn publish_privacy_policy(&self, policy_content: String) -> Result<PrivacyPolicy, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(privacy_policies::table)
            .values(&PrivacyPolicyRow {
                id: Uuid::new_v4(),
                policy_content,
                created_at: Utc::now(),
            })
            .returning(PrivacyPolicyRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn list_reviews(&self) -> Result<Vec<Review>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = reviews::table
            .inner_join(accounts::table)
            .order(reviews::publication_date.desc())
            .select((ReviewRow::as_select(), accounts::username))
            .load(&mut conn)?;
        Ok(rows.into_iter().map(review).collect())
    }

    fn find_review(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let mut conn = self.pool.get()?;
        find_review(&mut conn, id)
    }

    fn create_review(&self, author_id: Uuid, draft: ReviewDraft) -> Result<Review, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let id = Uuid::new_v4();
            diesel::insert_into(reviews::table)
                .values(&NewReviewRow {
                    id,
                    title: draft.title,
                    author_id,
                    content: draft.content,
                    score: draft.score,
                })
                .execute(conn)?;
            find_review(conn, id)?.ok_or(DomainError::NotFound("Review"))
        })
    }

    fn update_review(&self, id: Uuid, draft: ReviewDraft) -> Result<Review, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(reviews::table.find(id))
                .set(&ReviewChangeset {
                    title: draft.title,
                    content: draft.content,
                    score: draft.score,
                })
                .execute(conn)?;
            if updated == 0 {
                return Err(DomainError::NotFound("Review"));
            }
            find_review(conn, id)?.ok_or(DomainError::NotFound("Review"))
        })
    }

    fn delete_review(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::delete(reviews::table.find(id)).execute(&mut conn)?;
        Ok(())
    }

    fn review_stats(&self) -> Result<Vec<ReviewStat>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<(String, i64)> = accounts::table
            .left_join(reviews::table)
            .group_by((accounts::id, accounts::username))
            .select((accounts::username, count(reviews::id.nullable())))
            .order(accounts::username.asc())
            .load(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(|(username, review_count)| ReviewStat {
                username,
                review_count,
            })
            .collect())
    }
}
