use std::sync::Arc;

#[tokio::main]
async fn main() {
    scrawl_observability::init();

    let addr = std::env::var("SCRAWL_ADDR").unwrap_or_else(|_| {
        tracing::info!("SCRAWL_ADDR not set; defaulting to 0.0.0.0:8080");
        "0.0.0.0:8080".to_string()
    });

    let services = Arc::new(scrawl_api::app::services::build_services());
    let app = scrawl_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
