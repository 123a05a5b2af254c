use std::sync::Arc;

use tickerdesk_server::api::app_router;
use tickerdesk_server::config::Config;
use tickerdesk_server::dispatch::{run_once, serve_lines};
use tickerdesk_server::{build_tools, init_tracing};
use tokio::io::{AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let tools = build_tools(&config);

    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(command) if command == "serve" => {
            let router = app_router(Arc::new(tools));
            tracing::info!("Listening on {}", config.listen_addr);
            let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
            axum::serve(listener, router).await?;
        }
        Some(tool) => {
            let raw_arguments = args.next();
            let reply = run_once(&tools, &tool, raw_arguments.as_deref()).await;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        None => {
            tracing::info!("Reading tool requests from stdin");
            let stdin = BufReader::new(tokio::io::stdin());
            serve_lines(&tools, stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}
