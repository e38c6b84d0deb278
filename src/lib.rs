pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

#[cfg(test)]
pub mod test_utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::account_service::AccountService;
use application::catalog_service::CatalogService;
use application::content_service::ContentService;
use application::order_service::OrderService;
use application::promo_service::PromoService;
use config::AppConfig;
use handlers::ApiDoc;
use infrastructure::catalog_repo::DieselCatalogRepository;
use infrastructure::content_repo::DieselContentRepository;
use infrastructure::identity_repo::DieselIdentityRepository;
use infrastructure::info_client::InfoClient;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::promo_repo::DieselPromoRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type Orders = OrderService<
    DieselOrderRepository,
    DieselCatalogRepository,
    DieselPromoRepository,
    DieselIdentityRepository,
>;

/// Services shared by every worker, wired to the Postgres repositories.
pub struct AppState {
    pub orders: Orders,
    pub catalog: CatalogService<DieselCatalogRepository>,
    pub promos: PromoService<DieselPromoRepository>,
    pub accounts: AccountService<DieselIdentityRepository>,
    pub content: ContentService<DieselContentRepository>,
    pub info: InfoClient,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig, info: InfoClient) -> Self {
        let catalog = DieselCatalogRepository::new(pool.clone());
        let promos = DieselPromoRepository::new(pool.clone());
        let identities = DieselIdentityRepository::new(pool.clone());

        AppState {
            orders: OrderService::new(
                DieselOrderRepository::new(pool.clone()),
                catalog.clone(),
                promos.clone(),
                identities.clone(),
            ),
            catalog: CatalogService::new(catalog),
            promos: PromoService::new(promos),
            accounts: AccountService::new(identities, config.session_ttl),
            content: ContentService::new(DieselContentRepository::new(pool)),
            info,
        }
    }
}

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migrations", applied.len());
    Ok(())
}

/// Registers every route. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{accounts, catalog, content, home, orders, promo};

    cfg.route("/", web::get().to(home::index))
        .route("/cat_fact", web::get().to(home::cat_fact))
        .route("/faq", web::get().to(content::list_faqs))
        .route("/faq", web::post().to(content::create_faq))
        .route("/jobs", web::get().to(content::list_vacancies))
        .route("/jobs", web::post().to(content::create_vacancy))
        .route("/about", web::get().to(content::about))
        .route("/about", web::post().to(content::publish_about))
        .route("/privacy_policy", web::get().to(content::privacy_policy))
        .route("/privacy_policy", web::post().to(content::publish_privacy_policy))
        .route("/stats/reviews", web::get().to(content::review_stats))
        .route("/promo", web::get().to(promo::list_promo_codes))
        .route("/promo", web::post().to(promo::create_promo_code))
        .route("/client", web::get().to(accounts::get_client))
        .route("/client", web::put().to(accounts::update_client))
        .route("/client", web::delete().to(accounts::delete_client))
        .service(
            web::scope("/articles")
                .route("", web::get().to(content::list_articles))
                .route("", web::post().to(content::create_article))
                .route("/{id}", web::get().to(content::get_article)),
        )
        .service(
            web::scope("/reviews")
                .route("", web::get().to(content::list_reviews))
                .route("", web::post().to(content::create_review))
                .route("/{id}", web::put().to(content::update_review))
                .route("/{id}", web::delete().to(content::delete_review)),
        )
        .service(
            web::scope("/service_types")
                .route("", web::get().to(catalog::list_service_types))
                .route("", web::post().to(catalog::create_service_type))
                .route("/{id}", web::delete().to(catalog::delete_service_type)),
        )
        .service(
            web::scope("/services")
                .route("", web::get().to(catalog::list_services))
                .route("", web::post().to(catalog::create_service))
                .route("/{id}", web::put().to(catalog::update_service))
                .route("/{id}", web::delete().to(catalog::delete_service)),
        )
        .service(
            web::scope("/auth")
                .route("/signup", web::post().to(accounts::signup))
                .route("/login", web::post().to(accounts::login))
                .route("/logout", web::post().to(accounts::logout)),
        )
        .service(
            web::scope("/staff")
                .route("", web::post().to(accounts::create_staff))
                .route("/{id}", web::delete().to(accounts::delete_staff))
                .route(
                    "/{id}/specializations",
                    web::post().to(accounts::add_specialization),
                )
                .route(
                    "/{id}/specializations/{service_id}",
                    web::delete().to(accounts::remove_specialization),
                ),
        )
        .service(
            web::scope("/orders")
                .route("", web::get().to(orders::list_orders))
                .route("", web::post().to(orders::create_order))
                .route("/mark_paid", web::post().to(orders::mark_paid))
                .route("/recalculate", web::post().to(orders::recalculate_totals))
                .route("/{id}", web::get().to(orders::get_order))
                .route("/{id}/status", web::post().to(orders::update_status))
                .route("/{id}/promo", web::post().to(orders::change_promo))
                .route("/{id}/staff", web::post().to(orders::assign_staff)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
