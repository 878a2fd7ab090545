use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use crate::state::AppState;
use crate::{auth, profile, recipes};

pub fn build_app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(auth::router())
        .merge(profile::router())
        .merge(recipes::router())
        .route("/health", get(|| async { "ok" }))
        .fallback_service(static_files)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::StatusCode;
    use serde_json::{json, Value};

    use super::*;
    use crate::recipes::client::stub::StubRecipes;

    /// Serves the full router on an ephemeral port and returns its base URL.
    async fn spawn_app(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_app(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn stocked_recipes() -> Arc<StubRecipes> {
        Arc::new(StubRecipes {
            hits: serde_json::from_value(json!([{
                "id": 101, "title": "Chicken soup", "image": "https://img/101.jpg",
                "usedIngredients": [{ "name": "chicken" }],
                "missedIngredients": [{ "name": "leek" }]
            }]))
            .unwrap(),
            information: Some(
                serde_json::from_value(json!({ "id": 42, "title": "Stew", "readyInMinutes": 90 }))
                    .unwrap(),
            ),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let base = spawn_app(AppState::fake()).await;
        let body = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn search_route_is_not_shadowed_by_id_route() {
        let stub = stocked_recipes();
        let base = spawn_app(AppState::fake_with_recipes(stub.clone())).await;
        let client = reqwest::Client::new();

        let res = client
            .get(format!("{}/recipes/search?ingredients=chicken", base))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body[0]["id"], 101);
        assert_eq!(body[0]["usedIngredients"], json!(["chicken"]));

        let res = client
            .get(format!("{}/recipes/42", base))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["id"], 42);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn bad_query_and_bad_id_get_json_errors() {
        let stub = stocked_recipes();
        let base = spawn_app(AppState::fake_with_recipes(stub.clone())).await;
        let client = reqwest::Client::new();

        for path in [
            "/recipes/search?ingredients=a&ingredients=b",
            "/recipes/search",
            "/recipes/not-a-number",
        ] {
            let res = client.get(format!("{}{}", base, path)).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
            let body: Value = res.json().await.unwrap();
            assert!(body["error"].is_string(), "{}", path);
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn protected_routes_need_a_valid_bearer() {
        let base = spawn_app(AppState::fake()).await;
        let client = reqwest::Client::new();

        let res = client.get(format!("{}/profile", base)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Access denied" }));

        let res = client
            .put(format!("{}/password", base))
            .bearer_auth("not.a.jwt")
            .json(&json!({ "currentPassword": "a", "newPassword": "b" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Invalid token" }));
    }

    #[tokio::test]
    async fn account_lifecycle_through_router() {
        let base = spawn_app(AppState::fake()).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{}/register", base))
            .json(&json!({ "username": "ana", "email": "ana@example.com", "password": "pw1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let login = |password: &'static str| {
            client
                .post(format!("{}/login", base))
                .json(&json!({ "email": "ana@example.com", "password": password }))
                .send()
        };
        let body: Value = login("pw1").await.unwrap().json().await.unwrap();
        let token = body["token"].as_str().unwrap().to_string();

        let me: Value = client
            .get(format!("{}/profile", base))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(me["username"], "ana");
        assert!(me.get("password_hash").is_none());

        let res = client
            .put(format!("{}/profile", base))
            .bearer_auth(&token)
            .json(&json!({ "username": "ana2" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = client
            .put(format!("{}/profile", base))
            .bearer_auth(&token)
            .json(&json!({ "username": "ana2", "email": "ana@example.com" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = client
            .put(format!("{}/password", base))
            .bearer_auth(&token)
            .json(&json!({ "currentPassword": "wrong", "newPassword": "pw2" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "Current password incorrect");

        let res = client
            .put(format!("{}/password", base))
            .bearer_auth(&token)
            .json(&json!({ "currentPassword": "pw1", "newPassword": "pw2" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        assert_eq!(login("pw1").await.unwrap().status(), StatusCode::BAD_REQUEST);
        assert_eq!(login("pw2").await.unwrap().status(), StatusCode::OK);

        let me: Value = client
            .get(format!("{}/profile", base))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(me["username"], "ana2");
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_static_files() {
        let base = spawn_app(AppState::fake()).await;
        let res = reqwest::get(format!("{}/index.html", base)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.text().await.unwrap().contains("ingredientsInput"));
    }
}
