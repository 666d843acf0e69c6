use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use quizgen_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn cors_for(config: &Config) -> Cors {
    let cors = match config.cors_allowed_origin.as_deref() {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .expose_headers(vec![quizgen_server::middleware::REQUEST_ID_HEADER])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    config.warn_if_incomplete();

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let state = AppState::new(config);

    log::info!(
        "Starting quiz server on http://{}:{} (model '{}')",
        bind_address.0,
        bind_address.1,
        state.config.completion_model
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors_for(&state.config))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new("%a \"%r\" %s %b %Dms req=%{x-request-id}o"))
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
