use std::net::SocketAddr;
use std::sync::Arc;

use ::common::storage::{AssetStore, FilesystemAssetStore, InMemoryAssetStore};
use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use tubely::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageBackend,
    StorageConfig,
};
use tubely::repository::InMemoryVideoRepository;
use tubely::state::AppState;
use tubely::utils::jwt;

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";

pub mod routes {
    pub const VIDEOS: &str = "/api/videos";

    pub fn video(id: &str) -> String {
        format!("/api/videos/{id}")
    }

    pub fn thumbnail_upload(id: &str) -> String {
        format!("/api/thumbnail_upload/{id}")
    }

    pub fn thumbnail(id: &str) -> String {
        format!("/api/thumbnails/{id}")
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Assets root for the filesystem backend; removed on drop.
    pub assets_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(StorageBackend::Filesystem).await
    }

    pub async fn spawn_with(backend: StorageBackend) -> Self {
        let assets_dir = tempfile::tempdir().expect("Failed to create assets dir");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: addr.port(),
                base_url: Some(format!("http://{addr}")),
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url: String::new() },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
            },
            storage: StorageConfig {
                backend,
                assets_root: assets_dir.path().to_path_buf(),
                ..Default::default()
            },
        };

        let store: Arc<dyn AssetStore> = match backend {
            StorageBackend::Filesystem => Arc::new(
                FilesystemAssetStore::new(
                    app_config.storage.assets_root.clone(),
                    app_config.server.base_url(),
                )
                .await
                .expect("Failed to create filesystem store"),
            ),
            StorageBackend::Memory => Arc::new(InMemoryAssetStore::new()),
        };

        let state = AppState::new(app_config, Arc::new(InMemoryVideoRepository::new()), store)
            .expect("Failed to build app state");
        let app = tubely::build_router(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            assets_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Issue a token for a fresh user, returning `(user_id, token)`.
    pub fn new_user(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let token = jwt::sign(user_id, JWT_SECRET, chrono::Duration::hours(1))
            .expect("Failed to sign token");
        (user_id, token)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// GET returning the raw response, for byte and header assertions.
    pub async fn get_raw(&self, url: &str) -> reqwest::Response {
        self.client
            .get(url)
            .send()
            .await
            .expect("Failed to send GET request")
    }

    /// Create a video via the API and return its `id`.
    pub async fn create_video(&self, token: &str, title: &str) -> String {
        let res = self
            .post_with_token(
                routes::VIDEOS,
                &serde_json::json!({"title": title, "description": "test clip"}),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "Video creation failed: {}", res.text);
        res.body["id"]
            .as_str()
            .expect("response body should contain 'id'")
            .to_string()
    }

    /// Upload `file_bytes` as the `thumbnail` field.
    pub async fn upload_thumbnail(
        &self,
        video_id: &str,
        file_name: &str,
        mime: &str,
        file_bytes: Vec<u8>,
        token: Option<&str>,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("Failed to set MIME type");
        let form = reqwest::multipart::Form::new().part("thumbnail", part);

        self.send_upload(video_id, form, token).await
    }

    pub async fn send_upload(
        &self,
        video_id: &str,
        form: reqwest::multipart::Form,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = self
            .client
            .post(self.url(&routes::thumbnail_upload(video_id)))
            .multipart(form);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let res = req
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}
