//! Typed client for the GiftLink HTTP surface, with a session store standing
//! in for the browser's client-side token storage.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::auth::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateRequest, UpdateResponse,
};
use crate::error::ErrorResponse;

pub mod form;
pub mod session;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error payload.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never completed (connection refused, timeout, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let res = self
            .http
            .post(format!("{}/api/auth/register", self.base_url))
            .json(req)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let res = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(req)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn update_name(
        &self,
        authtoken: &str,
        name: &str,
    ) -> Result<UpdateResponse, ClientError> {
        let res = self
            .http
            .put(format!("{}/api/auth/update", self.base_url))
            .bearer_auth(authtoken)
            .json(&UpdateRequest { name: name.into() })
            .send()
            .await?;
        Self::parse(res).await
    }

    async fn parse<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res.json::<T>().await?);
        }
        let message = match res.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        Err(ClientError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use axum::{routing::post, routing::put, Json, Router};

    // Stub server with canned auth behavior: one known account
    // (a@x.com / p1), everything else rejected.
    async fn spawn_stub() -> String {
        let app = Router::new()
            .route(
                "/api/auth/register",
                post(|Json(req): Json<RegisterRequest>| async move {
                    if req.email == "taken@x.com" {
                        return (
                            StatusCode::CONFLICT,
                            Json(serde_json::json!({
                                "error": "conflict",
                                "message": "Email already exists",
                            })),
                        )
                            .into_response();
                    }
                    Json(serde_json::json!({
                        "authtoken": "tok-registered",
                        "email": req.email,
                    }))
                    .into_response()
                }),
            )
            .route(
                "/api/auth/login",
                post(|Json(req): Json<LoginRequest>| async move {
                    if req.email != "a@x.com" {
                        return (
                            StatusCode::NOT_FOUND,
                            Json(serde_json::json!({
                                "error": "not_found",
                                "message": "User not found",
                            })),
                        )
                            .into_response();
                    }
                    if req.password != "p1" {
                        return (
                            StatusCode::UNAUTHORIZED,
                            Json(serde_json::json!({
                                "error": "unauthorized",
                                "message": "Wrong password",
                            })),
                        )
                            .into_response();
                    }
                    Json(serde_json::json!({
                        "authtoken": "tok-logged-in",
                        "userName": "A",
                        "userEmail": "a@x.com",
                    }))
                    .into_response()
                }),
            )
            .route(
                "/api/auth/update",
                put(|headers: axum::http::HeaderMap| async move {
                    let authorized = headers
                        .get(axum::http::header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(|v| v.starts_with("Bearer tok-"))
                        .unwrap_or(false);
                    if !authorized {
                        return (
                            StatusCode::UNAUTHORIZED,
                            Json(serde_json::json!({
                                "error": "unauthorized",
                                "message": "Missing Authorization header",
                            })),
                        )
                            .into_response();
                    }
                    Json(serde_json::json!({ "authtoken": "tok-updated" })).into_response()
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn register_then_conflict_then_login_flow() {
        let base = spawn_stub().await;
        let client = ApiClient::new(&base);

        let res = client
            .register(&RegisterRequest {
                email: "a@x.com".into(),
                first_name: "A".into(),
                last_name: "B".into(),
                password: "p1".into(),
            })
            .await
            .expect("register should succeed");
        assert_eq!(res.authtoken, "tok-registered");
        assert_eq!(res.email, "a@x.com");

        let err = client
            .register(&RegisterRequest {
                email: "taken@x.com".into(),
                first_name: "A".into(),
                last_name: "B".into(),
                password: "p1".into(),
            })
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert_eq!(message, "Email already exists");
            }
            other => panic!("expected api error, got {other:?}"),
        }

        let res = client
            .login(&LoginRequest {
                email: "a@x.com".into(),
                password: "p1".into(),
            })
            .await
            .expect("login should succeed");
        assert_eq!(res.user_name, "A");
        assert_eq!(res.user_email, "a@x.com");

        let err = client
            .login(&LoginRequest {
                email: "a@x.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, .. } => assert_eq!(status, StatusCode::UNAUTHORIZED),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_requires_bearer_token() {
        let base = spawn_stub().await;
        let client = ApiClient::new(&base);

        let res = client
            .update_name("tok-logged-in", "NewName")
            .await
            .expect("update should succeed");
        assert_eq!(res.authtoken, "tok-updated");

        let err = client.update_name("bogus", "NewName").await.unwrap_err();
        match err {
            ClientError::Api { status, .. } => assert_eq!(status, StatusCode::UNAUTHORIZED),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_not_an_api_error() {
        // Nothing listens on this port.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client
            .login(&LoginRequest {
                email: "a@x.com".into(),
                password: "p1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
