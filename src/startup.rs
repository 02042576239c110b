//! src/startup.rs
use crate::authentication::{AuthService, reject_anonymous_users};
use crate::configuration::{DatabaseSettings, Settings};
use crate::datasets::{PgDatasets, TabularSource};
use crate::routes::{
    about, contact, databases, health_check, home, login, login_form, logout, profile, register,
    register_form, show_database,
};
use crate::store::{CredentialStore, PgCredentialStore};
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use secrecy::ExposeSecret;
use secrecy::Secret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: &Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        sqlx::migrate!("./migrations")
            .run(&connection_pool)
            .await?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let store = Arc::new(PgCredentialStore::new(connection_pool.clone()));
        let datasets = Arc::new(PgDatasets::new(connection_pool));
        let server = run(
            listener,
            store,
            datasets,
            configuration.application.hmac_secret.clone(),
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(configuration.connection_options())
}

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn CredentialStore>,
    datasets: Arc<dyn TabularSource>,
    hmac_secret: Secret<String>,
) -> Result<Server, anyhow::Error> {
    let auth_service = web::Data::new(AuthService::new(store));
    let datasets: web::Data<dyn TabularSource> = web::Data::from(datasets);

    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(message_framework.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .route("/health_check", web::get().to(health_check))
            .route("/", web::get().to(home))
            .route("/about", web::get().to(about))
            .route("/contact", web::get().to(contact))
            .route("/databases", web::get().to(databases))
            .route("/databases/{name}", web::get().to(show_database))
            .route("/register", web::get().to(register_form))
            .route("/register", web::post().to(register))
            .route("/login", web::get().to(login_form))
            .route("/login", web::post().to(login))
            .route("/logout", web::get().to(logout))
            .service(
                web::scope("/profile")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("/{id}", web::get().to(profile)),
            )
            .app_data(auth_service.clone())
            .app_data(datasets.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
