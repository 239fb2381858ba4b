use mock_server::{Backend, DEFAULT_API_KEY};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let fixtures_dir = std::env::var("FIXTURES_DIR").unwrap_or_else(|_| "testdata".to_string());
    let api_keys = std::env::var("MOCK_API_KEYS").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());

    let backend = Backend::new(fixtures_dir)
        .with_api_keys(api_keys.split(',').map(str::trim).filter(|k| !k.is_empty()).map(str::to_string));

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, fixtures = %backend.fixtures_dir().display(), "listening");
    mock_server::run(listener, backend).await
}
