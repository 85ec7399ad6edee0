// Authenticated async HTTP client shared by every console.
//
// One instance per backend base URL. Requests carry JSON headers and,
// once a session exists, `Authorization: Bearer <token>`. All responses
// pass through `intercept`, which ends the session on 401 and turns
// error bodies into `Error::Api` with the server text preserved.

use std::sync::Arc;

use arc_swap::ArcSwap;
use reqwest::StatusCode;
use reqwest::header::LOCATION;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::session::SessionStore;
use crate::transport::TransportConfig;

/// Route the front ends navigate to when a session ends.
pub const LOGIN_ROUTE: &str = "/login";

/// Callback fired after a 401 has cleared the session. Receives the
/// route to redirect to.
pub type UnauthorizedHook = Arc<dyn Fn(&str) + Send + Sync>;

// ── Wire shapes ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async REST client for one console backend.
pub struct ApiClient {
    http: ArcSwap<reqwest::Client>,
    base_url: Url,
    transport: TransportConfig,
    session: Arc<dyn SessionStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url`.
    ///
    /// The bearer header is taken from `session` at construction time;
    /// call [`set_jwt`](Self::set_jwt) after logging in.
    pub fn new(
        base_url: &str,
        transport: TransportConfig,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        let http = transport.build_client(session.token().as_deref())?;

        Ok(Self {
            http: ArcSwap::from_pointee(http),
            base_url,
            transport,
            session,
            on_unauthorized: None,
        })
    }

    /// Install the 401 hook. Only one hook is kept per client.
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    // ── Session rotation ─────────────────────────────────────────────

    /// Store `token` and rebuild the transport so later requests carry it.
    pub fn set_jwt(&self, token: &str) -> Result<(), Error> {
        self.session.set_token(token)?;
        self.rebuild()
    }

    /// Drop the stored token and rebuild without the bearer header.
    pub fn clear_jwt(&self) -> Result<(), Error> {
        self.session.clear()?;
        self.rebuild()
    }

    /// Rebuild from whatever the session store currently holds. Used
    /// when a sibling client sharing the store rotated the token.
    pub fn reload_session(&self) -> Result<(), Error> {
        self.rebuild()
    }

    fn rebuild(&self) -> Result<(), Error> {
        let http = self.transport.build_client(self.session.token().as_deref())?;
        self.http.store(Arc::new(http));
        Ok(())
    }

    /// Snapshot of the current transport. Owned so it can cross awaits.
    fn http(&self) -> Arc<reqwest::Client> {
        self.http.load_full()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an API path (e.g. `"/nodes/A"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.execute(self.http().get(url)).await?;
        self.handle_response(resp).await
    }

    /// GET that maps 404 to `None`, for resources that may not exist yet.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => {
                debug!("{path} not found, treating as absent");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.execute(self.http().post(url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        self.execute(self.http().post(url).json(body)).await?;
        Ok(())
    }

    /// POST that returns the `Location` header of the created resource.
    pub async fn post_location<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<String>, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.execute(self.http().post(url).json(body)).await?;
        Ok(resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned))
    }

    pub async fn put_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        self.execute(self.http().put(url).json(body)).await?;
        Ok(())
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.execute(self.http().patch(url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub async fn patch_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        self.execute(self.http().patch(url).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        self.execute(self.http().delete(url)).await?;
        Ok(())
    }

    /// DELETE that reports whether anything was there: 404 yields `false`.
    pub async fn delete_optional(&self, path: &str) -> Result<bool, Error> {
        match self.delete(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ── Authentication ───────────────────────────────────────────────

    /// `POST /auth`. Returns the token if the response carried one.
    ///
    /// Bypasses the 401 hook: bad credentials are a login failure, not
    /// an expired session.
    pub(crate) async fn request_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<String>, Error> {
        let url = self.url("/auth")?;
        debug!("logging in at {url}");

        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };
        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error(status, resp).await);
        }

        let token: Option<TokenResponse> = self.handle_response(resp).await?;
        Ok(token.and_then(|t| t.token).filter(|t| !t.is_empty()))
    }

    // ── Response handling ────────────────────────────────────────────

    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let resp = req.send().await.map_err(|e| self.transport_error(e))?;
        self.intercept(resp).await
    }

    async fn intercept(&self, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %resp.url(), "request rejected with 401, ending session");
            self.expire_session();
            return Err(Error::Unauthorized);
        }

        Err(parse_error(status, resp).await)
    }

    fn expire_session(&self) {
        if let Err(e) = self.clear_jwt() {
            warn!(error = %e, "failed to clear session after 401");
        }
        if let Some(hook) = &self.on_unauthorized {
            hook(LOGIN_ROUTE);
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_secs: self.transport.timeout.as_secs(),
            }
        } else {
            Error::Transport(e)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        let text = if body.trim().is_empty() {
            "null"
        } else {
            body.as_str()
        };

        serde_json::from_str(text).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            warn!(error = %e, body = %preview, "response did not match the expected shape");
            Error::Deserialization {
                message: e.to_string(),
                body,
            }
        })
    }
}

/// Flatten an error response into `Error::Api`, keeping whatever text
/// the server sent.
async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Error::Api {
            status: status.as_u16(),
            message: status.to_string(),
            body: None,
        };
    }

    let message = serde_json::from_str::<ErrorResponse>(trimmed)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .or_else(|| serde_json::from_str::<String>(trimmed).ok())
        .unwrap_or_else(|| trimmed.to_owned());

    Error::Api {
        status: status.as_u16(),
        message,
        body: Some(raw),
    }
}
