    use super::*;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    /// Serves `router` on an ephemeral port and returns a client pointed at it.
    async fn serve(router: Router) -> HttpRemote {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        HttpRemote::new(&RemoteConfig {
            base_url: format!("http://{}/", addr),
        })
        .expect("build client")
    }

    #[tokio::test]
    async fn fetch_drops_malformed_elements_and_keeps_the_rest() {
        let body = r#"[
            {"text": "ok", "category": "Life"},
            {"text": 42, "category": "Life"},
            {"text": null, "category": "Life"},
            {"category": "Life"},
            "just a string",
            {"text": "  padded  ", "category": " Zen "}
        ]"#;
        let remote = serve(Router::new().route(
            "/quotes",
            get(move || async move { ([("content-type", "application/json")], body) }),
        ))
        .await;

        let entries = remote.fetch().await.expect("fetch");
        assert_eq!(
            entries,
            vec![
                Entry {
                    text: "ok".to_string(),
                    category: "Life".to_string(),
                },
                Entry {
                    text: "padded".to_string(),
                    category: "Zen".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn fetch_of_non_array_body_is_a_transport_error() {
        let remote = serve(Router::new().route(
            "/quotes",
            get(|| async { ([("content-type", "application/json")], r#"{"quotes": []}"#) }),
        ))
        .await;

        let err = remote.fetch().await.unwrap_err();
        assert!(err.is_transport(), "{}", err);
    }

    #[tokio::test]
    async fn error_status_is_carried_in_the_transport_error() {
        let remote = serve(Router::new().route(
            "/quotes",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        ))
        .await;

        match remote.fetch().await {
            Err(QuoteError::Transport { status, .. }) => assert_eq!(status, Some(503)),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
