//! Server construction and route-group wiring.

mod config;

pub use config::{ServerConfig, ServiceGroup};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::modification::{add_quote, delete_quote, home, update_quote};
use crate::inbound::http::quotes::{list_quotes, search_quotes};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{list_users, login};
use crate::middleware::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Mount the routes of the selected service group.
///
/// Health probes are mounted for every group so orchestration works the same
/// however a process is sliced.
pub fn route_group(service: ServiceGroup) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |app: &mut web::ServiceConfig| {
        app.service(live).service(ready);
        if service.serves(ServiceGroup::Auth) {
            app.service(login).service(list_users);
        }
        if service.serves(ServiceGroup::Quotes) {
            app.service(list_quotes).service(search_quotes);
        }
        if service.serves(ServiceGroup::Modification) {
            app.service(home)
                .service(add_quote)
                .service(update_quote)
                .service(delete_quote);
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    service: ServiceGroup,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        service,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(route_group(service));

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an HTTP server for the configured service group.
///
/// Readiness flips once the listener is bound, so probes only pass when the
/// socket is accepting connections.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let service = config.service();
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            service,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, service = ?service, "server listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;

    use super::*;
    use crate::outbound::store::MemoryRecordStore;

    fn http_state() -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MemoryRecordStore::new()),
            "server-test-secret",
        ))
    }

    #[actix_web::test]
    async fn create_server_binds_and_marks_ready() {
        let health_state = web::Data::new(HealthState::new());
        let config = ServerConfig::new(ServiceGroup::All, "127.0.0.1:0".parse().expect("addr"));

        let server = create_server(health_state.clone(), http_state(), &config)
            .expect("bind ephemeral port");
        assert!(health_state.is_ready());

        let handle = server.handle();
        let run = actix_web::rt::spawn(server);
        handle.stop(true).await;
        run.await.expect("server task").expect("clean shutdown");
    }

    #[actix_web::test]
    async fn a_group_only_mounts_its_own_routes() {
        let app = test::init_service(
            App::new()
                .app_data(http_state())
                .configure(route_group(ServiceGroup::Quotes)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/quotes").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::post().uri("/login").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn every_group_serves_the_liveness_probe() {
        for service in [
            ServiceGroup::Auth,
            ServiceGroup::Quotes,
            ServiceGroup::Modification,
        ] {
            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(HealthState::new()))
                    .app_data(http_state())
                    .configure(route_group(service)),
            )
            .await;

            let req = test::TestRequest::get().uri("/health/live").to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
    }
}
