use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use ark_booking::booking::pipeline::COLLECTION;
use ark_booking::config::{Config, DocumentStoreConfig, ObjectStoreConfig};
use ark_booking::models::Appointment;
use ark_booking::state::SharedState;
use ark_booking::store::local::LocalObjectStore;
use ark_booking::store::memory::{MemoryDocumentStore, MemoryObjectStore};
use ark_booking::store::{DocumentStore, ObjectStore, StoreError, StoredDocument};

pub const CDN: &str = "https://cdn.test";

/// A running test server backed by in-memory stores.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub documents: Arc<MemoryDocumentStore>,
    pub objects: Arc<MemoryObjectStore>,
    #[allow(dead_code)]
    pub state: SharedState,
}

/// A file to attach to the `image` input.
pub struct Upload<'a> {
    pub filename: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post the booking form as a browser would (multipart), return (html, status).
    pub async fn submit_form(
        &self,
        fields: &[(&str, &str)],
        upload: Option<Upload<'_>>,
    ) -> (String, StatusCode) {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.to_string(), value.to_string());
        }
        if let Some(upload) = upload {
            let part = Part::bytes(upload.bytes.to_vec())
                .file_name(upload.filename.to_string())
                .mime_str(upload.content_type)
                .unwrap();
            form = form.part("image", part);
        }

        let resp = self
            .client
            .post(self.url("/"))
            .multipart(form)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// Post the booking form urlencoded, return (html, status).
    #[allow(dead_code)]
    pub async fn submit_urlencoded(&self, fields: &[(&str, &str)]) -> (String, StatusCode) {
        let resp = self
            .client
            .post(self.url("/"))
            .form(fields)
            .send()
            .await
            .expect("submit urlencoded failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// Post a JSON booking to the API, return (body, status).
    #[allow(dead_code)]
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/requests"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_page(&self) -> (String, StatusCode) {
        let resp = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .expect("get page failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// Everything the document store holds for the requests collection.
    pub async fn stored(&self) -> Vec<Appointment> {
        self.documents
            .list(COLLECTION)
            .await
            .unwrap()
            .into_iter()
            .map(Appointment::from_document)
            .collect()
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_url: "http://localhost:0".to_string(),
        max_body_size: 1_048_576,
        trusted_proxies: vec![],
        log_level: "warn".to_string(),
        submit_rate_limit: 100,
        submit_rate_window_secs: 60,
        honeypot_field: Some("website".to_string()),
        document_store: DocumentStoreConfig::Memory,
        object_store: ObjectStoreConfig::Http {
            endpoint: "http://objects.test".to_string(),
            public_url: CDN.to_string(),
            token: None,
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Spawn a test app with the given config on a random port.
pub async fn spawn_app_with(config: Config) -> TestApp {
    let documents = Arc::new(MemoryDocumentStore::new());
    let objects = Arc::new(MemoryObjectStore::new(CDN));

    let (app, state) = ark_booking::build_app(config, documents.clone(), objects.clone());
    let (listener, addr) = bind().await;
    serve(listener, app);

    TestApp {
        addr,
        client: client(),
        documents,
        objects,
        state,
    }
}

/// A running test server whose stores the test supplied itself.
#[allow(dead_code)]
pub struct BareApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

#[allow(dead_code)]
impl BareApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn a test app over the given stores.
#[allow(dead_code)]
pub async fn spawn_app_with_stores(
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
) -> BareApp {
    let (app, state) = ark_booking::build_app(test_config(), documents, objects);
    let (listener, addr) = bind().await;
    serve(listener, app);

    BareApp {
        addr,
        client: client(),
        state,
    }
}

/// Spawn a test app that writes uploads to `dir` and serves them at `/uploads`.
#[allow(dead_code)]
pub async fn spawn_app_with_local_uploads(dir: PathBuf) -> BareApp {
    let (listener, addr) = bind().await;

    let mut config = test_config();
    config.base_url = format!("http://{addr}");
    config.object_store = ObjectStoreConfig::Local { dir: dir.clone() };

    let objects = Arc::new(LocalObjectStore::new(dir, &config.base_url));
    let (app, state) =
        ark_booking::build_app(config, Arc::new(MemoryDocumentStore::new()), objects);
    serve(listener, app);

    BareApp {
        addr,
        client: client(),
        state,
    }
}

async fn bind() -> (tokio::net::TcpListener, SocketAddr) {
    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

fn serve(listener: tokio::net::TcpListener, app: axum::Router) {
    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });
}

fn client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// A document store that refuses reads and/or writes.
#[allow(dead_code)]
pub struct FailingDocuments {
    pub fail_list: bool,
    pub fail_append: bool,
}

#[async_trait]
impl DocumentStore for FailingDocuments {
    async fn append(&self, _collection: &str, _document: Value) -> Result<String, StoreError> {
        if self.fail_append {
            return Err(StoreError::Unavailable("connection refused by db-7.internal".to_string()));
        }
        Ok("doc-1".to_string())
    }

    async fn list(&self, _collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        if self.fail_list {
            return Err(StoreError::Unavailable("connection refused by db-7.internal".to_string()));
        }
        Ok(Vec::new())
    }
}
