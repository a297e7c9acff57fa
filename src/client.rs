//! authenticated access to the spypoint rest api.

use chrono::Utc;
use futures::future::try_join_all;
use log::{debug, log_enabled, Level};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::cameras::model::models_from_json;
use crate::cameras::response::{camera_with_id, cameras_from_json, shared_camera_ids_from_json};
use crate::cameras::{Camera, CameraModel};
use crate::error::{Result, SpypointError};
use crate::media::response::media_response_from_json;
use crate::media::{MediaQuery, MediaResponse};
use crate::session::Session;

/// production endpoint of the vendor api
pub const BASE_URL: &str = "https://restapi.spypoint.com/api/v3";

/// client for the spypoint rest api.
///
/// one instance owns one login session. the first request logs in with the
/// stored credentials and later requests reuse the bearer token until it
/// expires. instances can be shared across tasks, the session state sits
/// behind a lock.
#[derive(Debug)]
pub struct SpypointApi {
    http: Client,
    base_url: String,
    session: Mutex<Session>,
}

impl SpypointApi {
    pub fn new(username: &str, password: &str, http: Client) -> Self {
        Self::with_base_url(username, password, http, BASE_URL)
    }

    /// point the client at a different base url, e.g. a test server
    pub fn with_base_url(username: &str, password: &str, http: Client, base_url: &str) -> Self {
        SpypointApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: Mutex::new(Session::new(username, password)),
        }
    }

    /// log in now if the session does not hold a valid token. requests do
    /// this on their own, calling it up front only checks the credentials
    /// earlier.
    pub async fn authenticate(&self) -> Result<()> {
        self.ensure_authenticated().await?;
        Ok(())
    }

    /// returns headers carrying a currently valid bearer token, logging in
    /// first when the stored token is missing or expired. the session lock
    /// is held across the login round trip so concurrent callers that all
    /// find the token expired produce one login, not one each.
    async fn ensure_authenticated(&self) -> Result<HeaderMap> {
        let mut session = self.session.lock().await;
        if session.is_valid(Utc::now()) {
            return Ok(session.headers().clone());
        }

        debug!("no valid token, logging in as {}", session.username());
        let login = session.login_body();
        if log_enabled!(Level::Debug) {
            debug!("POST {}/user/login {}", self.base_url, redact_credentials(&login));
        }

        let response = self
            .http
            .post(format!("{}/user/login", self.base_url))
            .headers(session.headers().clone())
            .json(&login)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(SpypointError::InvalidCredentials),
            status if !status.is_success() => return Err(api_error(status)),
            _ => {}
        }

        let body: Value = response.json().await?;
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .ok_or(SpypointError::MissingField("token"))?;
        session.store_token(token)?;

        Ok(session.headers().clone())
    }

    /// one authenticated GET, returning the raw response document
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    /// one authenticated POST, returning the raw response document
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::POST, path, body).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let headers = self.ensure_authenticated().await?;
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        if log_enabled!(Level::Debug) {
            match body {
                Some(body) => debug!("{} {} {}", method, url, body),
                None => debug!("{} {}", method, url),
            }
        }

        let mut request = self.http.request(method, url.as_str()).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                // the server stopped accepting a token the local clock still
                // considered valid. evict it, the next call logs in again.
                // no automatic retry here, persistently bad credentials
                // would loop forever.
                self.session.lock().await.invalidate();
                debug!("token rejected by {}, session invalidated", url);
                Err(SpypointError::InvalidCredentials)
            }
            status if !status.is_success() => Err(api_error(status)),
            status => {
                let body: Value = response.json().await?;
                if log_enabled!(Level::Debug) {
                    debug!("{} from {}: {}", status, url, body);
                }
                Ok(body)
            }
        }
    }

    /// every camera visible to the account, own and shared alike
    pub async fn get_cameras(&self) -> Result<Vec<Camera>> {
        let mut cameras = self.get_own_cameras().await?;
        cameras.extend(self.get_shared_cameras().await?);
        Ok(cameras)
    }

    /// cameras owned by the account
    pub async fn get_own_cameras(&self) -> Result<Vec<Camera>> {
        let body = self.get("/camera/all").await?;
        cameras_from_json(&body)
    }

    /// cameras other accounts have shared with this one. the vendor only
    /// serves an id list plus one detail document per camera, so the detail
    /// fetches fan out concurrently and the first failure fails the batch.
    pub async fn get_shared_cameras(&self) -> Result<Vec<Camera>> {
        let body = self.get("/shared-cameras/all").await?;
        let ids = shared_camera_ids_from_json(&body);
        try_join_all(ids.iter().map(|id| self.get_shared_camera(id))).await
    }

    async fn get_shared_camera(&self, camera_id: &str) -> Result<Camera> {
        let body = self.get(&format!("/shared-cameras/{}", camera_id)).await?;
        // the detail document carries no id of its own, it only exists in
        // the url we fetched it from
        Ok(camera_with_id(camera_id, &body))
    }

    /// the vendor's catalog of camera models
    pub async fn get_camera_models(&self) -> Result<Vec<CameraModel>> {
        let body = self.get("/camera/models").await?;
        models_from_json(&body)
    }

    /// search media across the account's cameras, newest first, filtered
    /// and paged by `query`
    pub async fn get_media(&self, query: &MediaQuery) -> Result<MediaResponse> {
        let body = serde_json::to_value(query)?;
        let response = self.post("/photo/all", Some(&body)).await?;
        media_response_from_json(&response)
    }
}

fn api_error(status: StatusCode) -> SpypointError {
    SpypointError::Api {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("unknown").to_string(),
    }
}

/// copy of `body` with the password masked, for request traces
fn redact_credentials(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(password) = body.get_mut("password") {
        *password = Value::String("<redacted>".to_string());
    }
    body
}
