use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use curiosity_quest_server::{
    app_state::AppState,
    config::Config,
    graphql::{create_schema, graphiql, graphql_handler},
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(e) = config.validate_for_production() {
        log::error!("{}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let allowed_origin = config.cors_allowed_origin.clone();

    let app_state = AppState::new(config).await.map_err(|e| {
        log::error!("Failed to initialize application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let schema = create_schema(app_state.clone());

    log::info!(
        "Starting HTTP server on http://{}:{}",
        bind_address.0,
        bind_address.1
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![
                header::HeaderName::from_static("x-request-id"),
                header::HeaderName::from_static("x-quest-stored"),
                header::HeaderName::from_static("x-quest-id"),
            ])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .service(handlers::health_check)
            .service(handlers::health_check_live)
            .service(handlers::health_check_ready)
            .service(handlers::generate_quest)
            .service(handlers::get_quest_details)
            .service(handlers::complete_quest)
            .service(handlers::get_history)
            .service(handlers::get_quest)
            .service(graphql_handler)
            .service(graphiql)
    })
    .bind(bind_address)?
    .run()
    .await
}
