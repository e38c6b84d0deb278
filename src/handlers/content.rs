//! Public pages (articles, FAQ, vacancies, about, privacy policy), client
//! reviews and the admin endpoints that publish them.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::content::{
    About, Article, ArticleDraft, Faq, PrivacyPolicy, Review, ReviewDraft, ReviewStat, Vacancy,
};
use crate::errors::AppError;
use crate::handlers::timestamp;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub img: Option<String>,
    pub summary: String,
    pub content: String,
    pub publication_date: String,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        ArticleResponse {
            id: a.id,
            title: a.title,
            author: a.author_name,
            img: a.img,
            summary: a.summary,
            content: a.content,
            publication_date: timestamp(a.publication_date),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ArticleRequest {
    pub title: String,
    pub img: Option<String>,
    pub summary: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FaqBody {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FaqResponse {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub answer_date: String,
}

impl From<Faq> for FaqResponse {
    fn from(f: Faq) -> Self {
        FaqResponse {
            id: f.id,
            question: f.question,
            answer: f.answer,
            answer_date: timestamp(f.answer_date),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VacancyRequest {
    pub job_title: String,
    pub job_description: String,
    /// Service type the job is about, if any.
    pub job_type_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub job_type_id: Option<Uuid>,
}

impl From<Vacancy> for VacancyResponse {
    fn from(v: Vacancy) -> Self {
        VacancyResponse {
            id: v.id,
            job_title: v.job_title,
            job_description: v.job_description,
            job_type_id: v.job_type_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AboutRequest {
    pub logo: Option<String>,
    pub history: Option<String>,
    pub contact_info: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AboutResponse {
    pub id: Uuid,
    pub logo: Option<String>,
    pub history: Option<String>,
    pub contact_info: String,
    pub created_at: String,
}

impl From<About> for AboutResponse {
    fn from(a: About) -> Self {
        AboutResponse {
            id: a.id,
            logo: a.logo,
            history: a.history,
            contact_info: a.contact_info,
            created_at: timestamp(a.created_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PrivacyPolicyRequest {
    pub policy_content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrivacyPolicyResponse {
    pub id: Uuid,
    pub policy_content: String,
    pub created_at: String,
}

impl From<PrivacyPolicy> for PrivacyPolicyResponse {
    fn from(p: PrivacyPolicy) -> Self {
        PrivacyPolicyResponse {
            id: p.id,
            policy_content: p.policy_content,
            created_at: timestamp(p.created_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub title: String,
    pub content: String,
    /// 1 to 5.
    pub score: i32,
}

impl From<ReviewRequest> for ReviewDraft {
    fn from(r: ReviewRequest) -> Self {
        ReviewDraft {
            title: r.title,
            content: r.content,
            score: r.score,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub author: String,
    pub content: String,
    pub score: i32,
    pub publication_date: String,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        ReviewResponse {
            id: r.id,
            title: r.title,
            author_id: r.author_id,
            author: r.author_name,
            content: r.content,
            score: r.score,
            publication_date: timestamp(r.publication_date),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewStatResponse {
    pub username: String,
    pub review_count: i64,
}

impl From<ReviewStat> for ReviewStatResponse {
    fn from(s: ReviewStat) -> Self {
        ReviewStatResponse {
            username: s.username,
            review_count: s.review_count,
        }
    }
}

fn json_list<T, R: From<T> + Serialize>(items: Vec<T>) -> HttpResponse {
    let body: Vec<R> = items.into_iter().map(R::from).collect();
    HttpResponse::Ok().json(body)
}

// ── Articles ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/articles",
    responses((status = 200, description = "Articles, newest first", body = [ArticleResponse])),
    tag = "content"
)]
pub async fn list_articles(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let articles = web::block(move || state.content.list_articles()).await??;
    Ok(json_list::<_, ArticleResponse>(articles))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    params(("id" = Uuid, Path, description = "Article UUID")),
    responses(
        (status = 200, description = "Article", body = ArticleResponse),
        (status = 404, description = "Article not found"),
    ),
    tag = "content"
)]
pub async fn get_article(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let article = web::block(move || state.content.get_article(id)).await??;
    Ok(HttpResponse::Ok().json(ArticleResponse::from(article)))
}

#[utoipa::path(
    post,
    path = "/articles",
    request_body = ArticleRequest,
    responses((status = 201, description = "Article published", body = ArticleResponse)),
    tag = "content"
)]
pub async fn create_article(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<ArticleRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let draft = ArticleDraft {
        title: body.title,
        img: body.img,
        summary: body.summary,
        content: body.content,
    };
    let article = web::block(move || state.content.create_article(&principal, draft)).await??;
    Ok(HttpResponse::Created().json(ArticleResponse::from(article)))
}

// ── Static pages ─────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/faq",
    responses((status = 200, description = "Questions and answers", body = [FaqResponse])),
    tag = "content"
)]
pub async fn list_faqs(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let faqs = web::block(move || state.content.list_faqs()).await??;
    Ok(json_list::<_, FaqResponse>(faqs))
}

#[utoipa::path(
    post,
    path = "/faq",
    request_body = FaqBody,
    responses((status = 201, description = "Entry added", body = FaqResponse)),
    tag = "content"
)]
pub async fn create_faq(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<FaqBody>,
) -> Result<HttpResponse, AppError> {
    let FaqBody { question, answer } = body.into_inner();
    let faq = web::block(move || state.content.create_faq(&principal, question, answer)).await??;
    Ok(HttpResponse::Created().json(FaqResponse::from(faq)))
}

#[utoipa::path(
    get,
    path = "/jobs",
    responses((status = 200, description = "Open vacancies", body = [VacancyResponse])),
    tag = "content"
)]
pub async fn list_vacancies(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let vacancies = web::block(move || state.content.list_vacancies()).await??;
    Ok(json_list::<_, VacancyResponse>(vacancies))
}

#[utoipa::path(
    post,
    path = "/jobs",
    request_body = VacancyRequest,
    responses((status = 201, description = "Vacancy posted", body = VacancyResponse)),
    tag = "content"
)]
pub async fn create_vacancy(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<VacancyRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let vacancy = web::block(move || {
        state.content.create_vacancy(
            &principal,
            body.job_title,
            body.job_description,
            body.job_type_id,
        )
    })
    .await??;
    Ok(HttpResponse::Created().json(VacancyResponse::from(vacancy)))
}

/// GET /about
///
/// The most recently published company page.
#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "Company page", body = AboutResponse),
        (status = 404, description = "Nothing published yet"),
    ),
    tag = "content"
)]
pub async fn about(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let about = web::block(move || state.content.about()).await??;
    match about {
        Some(about) => Ok(HttpResponse::Ok().json(AboutResponse::from(about))),
        None => Err(AppError::NotFound("About page".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/about",
    request_body = AboutRequest,
    responses((status = 201, description = "New version published", body = AboutResponse)),
    tag = "content"
)]
pub async fn publish_about(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<AboutRequest>,
) -> Result<HttpResponse, AppError> {
    let AboutRequest {
        logo,
        history,
        contact_info,
    } = body.into_inner();
    let about = web::block(move || {
        state
            .content
            .publish_about(&principal, logo, history, contact_info)
    })
    .await??;
    Ok(HttpResponse::Created().json(AboutResponse::from(about)))
}

#[utoipa::path(
    get,
    path = "/privacy_policy",
    responses(
        (status = 200, description = "Current policy", body = PrivacyPolicyResponse),
        (status = 404, description = "Nothing published yet"),
    ),
    tag = "content"
)]
pub async fn privacy_policy(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let policy = web::block(move || state.content.privacy_policy()).await??;
    match policy {
        Some(policy) => Ok(HttpResponse::Ok().json(PrivacyPolicyResponse::from(policy))),
        None => Err(AppError::NotFound("Privacy policy".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/privacy_policy",
    request_body = PrivacyPolicyRequest,
    responses((status = 201, description = "New version published", body = PrivacyPolicyResponse)),
    tag = "content"
)]
pub async fn publish_privacy_policy(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<PrivacyPolicyRequest>,
) -> Result<HttpResponse, AppError> {
    let content = body.into_inner().policy_content;
    let policy = web::block(move || state.content.publish_privacy_policy(&principal, content))
        .await??;
    Ok(HttpResponse::Created().json(PrivacyPolicyResponse::from(policy)))
}

// ── Reviews ──────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/reviews",
    responses((status = 200, description = "All reviews, newest first", body = [ReviewResponse])),
    tag = "content"
)]
pub async fn list_reviews(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reviews = web::block(move || state.content.list_reviews()).await??;
    Ok(json_list::<_, ReviewResponse>(reviews))
}

#[utoipa::path(
    post,
    path = "/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review posted", body = ReviewResponse),
        (status = 401, description = "Not logged in"),
        (status = 422, description = "Invalid review"),
    ),
    tag = "content"
)]
pub async fn create_review(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = ReviewDraft::from(body.into_inner());
    let review = web::block(move || state.content.create_review(&principal, draft)).await??;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

#[utoipa::path(
    put,
    path = "/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review UUID")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 403, description = "Not the author"),
    ),
    tag = "content"
)]
pub async fn update_review(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let draft = ReviewDraft::from(body.into_inner());
    let review = web::block(move || state.content.update_review(&principal, id, draft)).await??;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(review)))
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review UUID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Neither the author nor an admin"),
    ),
    tag = "content"
)]
pub async fn delete_review(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.content.delete_review(&principal, id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /stats/reviews
///
/// Review counts per account, staff and admins only.
#[utoipa::path(
    get,
    path = "/stats/reviews",
    responses((status = 200, description = "Reviews per account", body = [ReviewStatResponse])),
    tag = "content"
)]
pub async fn review_stats(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let stats = web::block(move || state.content.review_stats(&principal)).await??;
    Ok(json_list::<_, ReviewStatResponse>(stats))
}
