use actix_web::{web, App, HttpServer};
use euchre_backend::config::AppConfig;
use euchre_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use euchre_backend::routes;
use euchre_backend::state::AppState;
use euchre_backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let (host, port) = (config.host.clone(), config.port);

    tracing::info!(
        host = %host,
        port,
        target_score = config.target_score,
        seeded = config.engine_seed.is_some(),
        "starting euchre backend"
    );

    let data = web::Data::new(AppState::new(config));

    // Registration order is inside-out: RequestTrace runs first so the span
    // and the logger both see the trace id.
    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
