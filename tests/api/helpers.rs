//! tests/api/helpers.rs
use argon2::password_hash::SaltString;
use argon2::{Argon2, Params, PasswordHasher};
use personal_site::datasets::InMemoryDatasets;
use personal_site::startup::run;
use personal_site::store::{CreateError, CredentialStore, Identity, InMemoryCredentialStore, StoreError};
use personal_site::telemetry::{get_subscriber, init_subscriber};
use secrecy::Secret;
use std::net::TcpListener;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber("test".into(), "debug".into(), std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    pub fn generate() -> Self {
        TestUser {
            user_id: Uuid::nil(),
            username: Uuid::new_v4().to_string(),
            email: format!("{}@example.com", Uuid::new_v4()),
            password: Uuid::new_v4().to_string(),
        }
    }

    async fn store(&mut self, store: &InMemoryCredentialStore) {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let password_hash = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            Params::new(15000, 2, 1, None).expect("Failed to build params."),
        )
        .hash_password(self.password.as_bytes(), &salt)
        .unwrap()
        .to_string();
        let identity = store
            .create(&self.username, &self.email, Secret::new(password_hash))
            .await
            .expect("Failed to create test user.");
        self.user_id = identity.id;
    }
}

pub struct TestApp {
    pub address: String,
    pub user: TestUser,
    pub store: Arc<InMemoryCredentialStore>,
    api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_login<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(format!("{}/login", self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_login(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/login", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_login_html(&self) -> String {
        self.get_login().await.text().await.unwrap()
    }

    pub async fn post_register<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(format!("{}/register", self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_register(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/register", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_register_html(&self) -> String {
        self.get_register().await.text().await.unwrap()
    }

    pub async fn api_get_html(&self, path: &str) -> String {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
            .text()
            .await
            .unwrap()
    }

    pub async fn get_profile(&self, user_id: Uuid) -> reqwest::Response {
        self.api_client
            .get(format!("{}/profile/{}", self.address, user_id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_profile_html(&self, user_id: Uuid) -> String {
        self.get_profile(user_id).await.text().await.unwrap()
    }

    pub async fn get_logout(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/logout", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_database(&self, name: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/databases/{}", self.address, name))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health_check(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/health_check", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Stores another identity directly, bypassing the HTTP surface.
    pub async fn seed_user(&self) -> TestUser {
        let mut user = TestUser::generate();
        user.store(&self.store).await;
        user
    }
}

/// A credential store standing in for a database outage: every operation
/// fails with an infrastructure error.
pub struct FailingCredentialStore;

#[async_trait::async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn create(
        &self,
        _username: &str,
        _email: &str,
        _password_hash: Secret<String>,
    ) -> Result<Identity, CreateError> {
        Err(CreateError::Store(StoreError(anyhow::anyhow!(
            "connection reset by peer"
        ))))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<Identity>, StoreError> {
        Err(StoreError(anyhow::anyhow!("connection reset by peer")))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Identity>, StoreError> {
        Err(StoreError(anyhow::anyhow!("connection reset by peer")))
    }
}

/// Spawns a server backed by the given store and returns its address.
#[allow(clippy::let_underscore_future)]
pub async fn spawn_bare_app(store: Arc<dyn CredentialStore>, hmac_secret: Secret<String>) -> String {
    LazyLock::force(&TRACING);

    let datasets = Arc::new(InMemoryDatasets::with_sample_rows());
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a random port.");
    let port = listener.local_addr().unwrap().port();

    let server = run(listener, store, datasets, hmac_secret)
        .await
        .expect("Failed to build application server.");
    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

pub async fn spawn_app_with_secret(hmac_secret: Secret<String>) -> TestApp {
    let store = Arc::new(InMemoryCredentialStore::new());
    let address = spawn_bare_app(store.clone(), hmac_secret).await;

    let mut user = TestUser::generate();
    user.store(&store).await;

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address,
        user,
        store,
        api_client,
    }
}

pub async fn spawn_app() -> TestApp {
    // Two UUIDs comfortably clear the 64-byte minimum for the signing key.
    spawn_app_with_secret(Secret::new(format!("{}{}", Uuid::new_v4(), Uuid::new_v4()))).await
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}
