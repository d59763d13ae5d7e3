use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use waypoint::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Ensure data directory exists
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/waypoint.db".to_string());
    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);

    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    db::seed_admin(&pool, &admin_password);

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .route("/login", web::post().to(handlers::auth_handlers::login))
            .route("/logout", web::post().to(handlers::auth_handlers::logout))
            .service(
                web::scope("/api")
                    // Steps — fixed paths BEFORE /steps/{id} to avoid routing conflict
                    .route("/steps", web::get().to(handlers::step_handlers::list))
                    .route("/steps", web::post().to(handlers::step_handlers::create))
                    .route("/steps/orphans", web::get().to(handlers::step_handlers::orphans))
                    .route("/steps/initial", web::get().to(handlers::step_handlers::initial))
                    .route("/steps/{id}", web::get().to(handlers::step_handlers::get))
                    .route("/steps/{id}", web::put().to(handlers::step_handlers::update))
                    .route("/steps/{id}", web::delete().to(handlers::step_handlers::delete))
                    .route("/steps/{id}/answers", web::get().to(handlers::step_handlers::answers))
                    .route("/steps/{id}/pathway", web::get().to(handlers::step_handlers::pathway))
                    // Answers
                    .route("/answers", web::post().to(handlers::answer_handlers::create))
                    .route("/answers/{id}", web::get().to(handlers::answer_handlers::get))
                    .route("/answers/{id}", web::put().to(handlers::answer_handlers::update))
                    .route("/answers/{id}", web::delete().to(handlers::answer_handlers::delete))
                    .route("/answers/{id}/next", web::get().to(handlers::answer_handlers::next_step))
                    // Elements
                    .route("/elements", web::get().to(handlers::element_handlers::list))
                    .route("/elements", web::post().to(handlers::element_handlers::create))
                    .route("/elements/{id}", web::get().to(handlers::element_handlers::get))
                    .route("/elements/{id}", web::put().to(handlers::element_handlers::update))
                    .route("/elements/{id}", web::delete().to(handlers::element_handlers::delete)),
            )
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "not found" }))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
