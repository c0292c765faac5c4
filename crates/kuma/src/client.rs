use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use eyre::{Result, WrapErr, bail};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::{
    api::KumaApi,
    models::{
        AddMaintenanceResponse, ErrorBody, IdRef, LoginOutcome, LoginResponse, Maintenance,
        Monitor, NewMaintenance, StatusPage,
    },
};

/// Per-request timeout for calls to the monitoring service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for interacting with the Uptime Kuma JSON API.
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    base_url: Url,
    token: Mutex<Option<String>>,
}

impl Client {
    /// Create a new client for the instance at `base_url`.
    pub fn new(mut base_url: Url) -> Result<Self> {
        // `Url::join` replaces the last path segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url, token: Mutex::new(None) })
    }

    /// The session token currently attached to requests, if any.
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).wrap_err_with(|| format!("invalid endpoint path {path}"))
    }

    /// Authenticate the request with the current session token.
    fn auth(&self, rb: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    /// Send the request and map non-2xx responses to errors carrying the service message.
    async fn send(&self, rb: RequestBuilder) -> Result<Response> {
        let resp = self.auth(rb).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        let msg = serde_json::from_str::<ErrorBody>(&text).map(|body| body.msg).unwrap_or(text);
        bail!("kuma api returned {}: {}", status, msg)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        Ok(self.send(self.http.get(url)).await?.json::<T>().await?)
    }
}

#[async_trait]
impl KumaApi for Client {
    async fn login(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<LoginOutcome> {
        let url = self.endpoint("api/login")?;
        let mut body = json!({ "username": username, "password": password });
        if let Some(code) = totp {
            body["token"] = json!(code);
        }
        let resp: LoginResponse = self.send(self.http.post(url).json(&body)).await?.json().await?;

        match resp.token {
            Some(token) => {
                self.set_token(Some(token.clone()));
                Ok(LoginOutcome::Token(token))
            }
            None if resp.token_required => Ok(LoginOutcome::TotpRequired),
            None => bail!("login response carried neither a token nor a 2FA request"),
        }
    }

    async fn login_by_token(&self, token: &str) -> Result<()> {
        let url = self.endpoint("api/login/token")?;
        self.send(self.http.post(url).json(&json!({ "token": token }))).await?;
        self.set_token(Some(token.to_owned()));
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let url = self.endpoint("api/logout")?;
        let result = self.send(self.http.post(url)).await.map(|_| ());
        self.set_token(None);
        result
    }

    async fn monitors(&self) -> Result<Vec<Monitor>> {
        self.get_json("api/monitors").await
    }

    async fn maintenances(&self) -> Result<Vec<Maintenance>> {
        self.get_json("api/maintenances").await
    }

    async fn add_maintenance(&self, maintenance: &NewMaintenance) -> Result<u64> {
        let url = self.endpoint("api/maintenances")?;
        let resp: AddMaintenanceResponse =
            self.send(self.http.post(url).json(maintenance)).await?.json().await?;
        debug!(maintenance_id = resp.maintenance_id, title = %maintenance.title, "Added maintenance");
        Ok(resp.maintenance_id)
    }

    async fn delete_maintenance(&self, id: u64) -> Result<()> {
        let url = self.endpoint(&format!("api/maintenances/{}", id))?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn add_monitor_maintenance(&self, id: u64, monitors: &[IdRef]) -> Result<()> {
        let url = self.endpoint(&format!("api/maintenances/{}/monitors", id))?;
        self.send(self.http.post(url).json(monitors)).await?;
        Ok(())
    }

    async fn status_pages(&self) -> Result<Vec<StatusPage>> {
        self.get_json("api/status-pages").await
    }

    async fn add_maintenance_status_page(&self, id: u64, pages: &[IdRef]) -> Result<()> {
        let url = self.endpoint(&format!("api/maintenances/{}/status-pages", id))?;
        self.send(self.http.post(url).json(pages)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{auth::is_unauthenticated, models::MaintenanceStrategy};

    use mockito::{Matcher, Server, ServerGuard};

    fn client_for(server: &ServerGuard) -> Client {
        Client::new(server.url().parse().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn login_stores_token_for_later_requests() {
        let mut server = Server::new_async().await;
        let login = server
            .mock("POST", "/api/login")
            .match_body(Matcher::Json(json!({ "username": "admin", "password": "pw" })))
            .with_status(200)
            .with_body(r#"{"token":"tok-1"}"#)
            .create_async()
            .await;
        let monitors = server
            .mock("GET", "/api/monitors")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_body(r#"[{"id":1,"name":"A","type":"http"},{"id":2,"name":"B"}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let outcome = client.login("admin", "pw", None).await.unwrap();
        assert_eq!(outcome, LoginOutcome::Token("tok-1".to_owned()));

        let list = client.monitors().await.unwrap();
        assert_eq!(
            list,
            vec![Monitor { id: 1, name: "A".to_owned() }, Monitor { id: 2, name: "B".to_owned() }]
        );

        login.assert_async().await;
        monitors.assert_async().await;
    }

    #[tokio::test]
    async fn login_reports_missing_one_time_code() {
        let mut server = Server::new_async().await;
        let _login = server
            .mock("POST", "/api/login")
            .with_status(200)
            .with_body(r#"{"tokenRequired":true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let outcome = client.login("admin", "pw", None).await.unwrap();
        assert_eq!(outcome, LoginOutcome::TotpRequired);
        assert_eq!(client.token(), None);
    }

    #[tokio::test]
    async fn login_sends_one_time_code() {
        let mut server = Server::new_async().await;
        let login = server
            .mock("POST", "/api/login")
            .match_body(Matcher::Json(json!({
                "username": "admin",
                "password": "pw",
                "token": "123456"
            })))
            .with_status(200)
            .with_body(r#"{"token":"tok-2fa"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let outcome = client.login("admin", "pw", Some("123456")).await.unwrap();
        assert_eq!(outcome, LoginOutcome::Token("tok-2fa".to_owned()));
        login.assert_async().await;
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/maintenances")
            .with_status(401)
            .with_body(r#"{"ok":false,"msg":"You are not logged in."}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.maintenances().await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401 Unauthorized"), "{msg}");
        assert!(msg.contains("You are not logged in."), "{msg}");
        assert!(is_unauthenticated(&err));
    }

    #[tokio::test]
    async fn server_error_is_not_unauthenticated() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/status-pages")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.status_pages().await.unwrap_err();
        assert!(err.to_string().contains("upstream exploded"));
        assert!(!is_unauthenticated(&err));
    }

    #[tokio::test]
    async fn add_maintenance_returns_new_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/maintenances")
            .match_body(Matcher::PartialJson(json!({
                "title": "Maintenance for A",
                "strategy": "single",
                "durationMinutes": 120
            })))
            .with_status(200)
            .with_body(r#"{"msg":"Added Successfully.","maintenanceID":17}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let payload = NewMaintenance {
            title: "Maintenance for A".to_owned(),
            description: String::new(),
            strategy: MaintenanceStrategy::Single,
            active: true,
            interval_day: 1,
            date_range: ["2025-01-01 00:00:00".to_owned(), "2025-01-01 02:00:00".to_owned()],
            weekdays: vec![],
            days_of_month: vec![],
            cron: None,
            duration_minutes: 120,
            timezone_option: "UTC".to_owned(),
        };
        assert_eq!(client.add_maintenance(&payload).await.unwrap(), 17);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn attach_and_delete_use_maintenance_paths() {
        let mut server = Server::new_async().await;
        let monitors = server
            .mock("POST", "/api/maintenances/17/monitors")
            .match_body(Matcher::Json(json!([{ "id": 7 }])))
            .with_status(200)
            .create_async()
            .await;
        let pages = server
            .mock("POST", "/api/maintenances/17/status-pages")
            .match_body(Matcher::Json(json!([{ "id": 1 }, { "id": 2 }])))
            .with_status(200)
            .create_async()
            .await;
        let delete =
            server.mock("DELETE", "/api/maintenances/17").with_status(200).create_async().await;

        let client = client_for(&server);
        client.add_monitor_maintenance(17, &[IdRef::from(7)]).await.unwrap();
        client.add_maintenance_status_page(17, &[IdRef::from(1), IdRef::from(2)]).await.unwrap();
        client.delete_maintenance(17).await.unwrap();

        monitors.assert_async().await;
        pages.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_kept() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/kuma/api/monitors")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let base: Url = format!("{}/kuma", server.url()).parse().unwrap();
        let client = Client::new(base).unwrap();
        assert!(client.monitors().await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn token_login_and_logout_manage_session() {
        let mut server = Server::new_async().await;
        let token_login = server
            .mock("POST", "/api/login/token")
            .match_body(Matcher::Json(json!({ "token": "cached" })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let logout = server
            .mock("POST", "/api/logout")
            .match_header("authorization", "Bearer cached")
            .with_status(200)
            .create_async()
            .await;

        let client = client_for(&server);
        client.login_by_token("cached").await.unwrap();
        assert_eq!(client.token().as_deref(), Some("cached"));
        client.logout().await.unwrap();
        assert_eq!(client.token(), None);

        token_login.assert_async().await;
        logout.assert_async().await;
    }
}
