use anyhow::{Context, Result};
use clap::Parser;
use docsearch_core::{IndexBuilder, SearchEngine, StemmingTokenizer};
use docsearch_server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Record file produced by the parser
    #[arg(long, default_value = "./data/raw_input")]
    input: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8888)]
    port: u16,
    /// Directory of static files served at the web root
    #[arg(long, default_value = "./wwwroot")]
    static_dir: PathBuf,
    /// Index and query with the stemming, stop-word-filtering tokenizer
    #[arg(long, default_value_t = false)]
    stemming: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let builder = if args.stemming {
        IndexBuilder::with_tokenizer(Box::new(StemmingTokenizer::english()))
    } else {
        IndexBuilder::new()
    };
    let index = builder
        .build_from_path(&args.input)
        .context("building the search index")?;
    let engine = Arc::new(SearchEngine::new(index));

    let app = build_app(engine, Some(args.static_dir));
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
