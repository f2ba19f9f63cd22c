#![allow(dead_code)]

pub mod deal_driver;
pub mod decks;
pub mod http;

/// Builds the production app (routes plus middleware) around `$state` and
/// initializes it as a test service.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(euchre_backend::TraceSpan)
                .wrap(euchre_backend::StructuredLogger)
                .wrap(euchre_backend::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(euchre_backend::routes::configure),
        )
    };
}
pub(crate) use init_app;
