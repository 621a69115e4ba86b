use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use quiz_simulator::{
    app_state::AppState,
    config::Config,
    handlers,
    middleware::RequestIdMiddleware,
    services::background_tasks::{spawn_legacy_migration, spawn_session_sweeper},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let state = AppState::new(config.clone())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    spawn_legacy_migration(state.question_repository.clone());
    if let Some(ttl) = config.session_ttl() {
        log::info!("Sessions expire after {} minutes", ttl.as_secs() / 60);
        spawn_session_sweeper(
            state.session_repository.clone(),
            config.session_sweep_interval(),
        );
    }

    log::info!(
        "Starting quiz server on http://{}:{} (questions in {}, model {})",
        config.web_server_host,
        config.web_server_port,
        config.questions_dir.display(),
        config.generator_model
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
