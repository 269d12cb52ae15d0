use std::net::SocketAddr;

use clap::Parser;

use super::*;

#[derive(Parser)]
#[command(name = "quotebook-server")]
#[command(about = "Shared quote collection for quotebook sync (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Persist the collection to this JSON file and reload it on start
    #[arg(long)]
    data_file: Option<PathBuf>,
}

pub(super) async fn run() -> Result<()> {
    quotebook::logging::init("info");
    let args = Args::parse();

    let quotes = match &args.data_file {
        Some(path) => persistence::load(path)?,
        None => Vec::new(),
    };
    info!(quotes = quotes.len(), "collection loaded");

    let state = Arc::new(AppState {
        quotes: Arc::new(RwLock::new(quotes)),
        data_file: args.data_file.clone(),
    });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    info!(%local_addr, "quotebook-server listening");
    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl-c handler failed; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
