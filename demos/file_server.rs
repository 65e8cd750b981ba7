//! A static file server built on filewire.
//!
//! Usage: `file_server <port> <root> [config.json]`
//!
//! Each accepted connection is handled on its own task. Files are read from
//! `<root>` and their content type is chosen from the extension.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use filewire::{Listener, Request, ServerConfig};
use log::{error, info, warn};
use tokio::net::TcpStream;

const NOT_FOUND_PAGE: &str = "<html><body><h1>404 Not Found</h1></body></html>";

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => "text/html",
        Some("gif") => "image/gif",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "text/plain",
    }
}

fn resolve(root: &Path, request_path: &str) -> PathBuf {
    let relative = request_path.trim_start_matches('/');
    if relative.is_empty() {
        root.join("index.html")
    } else {
        root.join(relative)
    }
}

async fn serve(request: Request<TcpStream>, root: &Path) {
    let file = resolve(root, request.path());
    let result = match tokio::fs::read(&file).await {
        Ok(contents) => {
            info!("{} -> {} bytes", request.path(), contents.len());
            request.return_result(content_type(&file), &contents).await
        }
        Err(e) => {
            warn!("Cannot read {}: {e}", file.display());
            request.return_error(NOT_FOUND_PAGE).await
        }
    };

    if let Err(e) = result {
        error!("Response failed: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(port), Some(root)) = (args.next(), args.next()) else {
        return Err("usage: file_server <port> <root> [config.json]".into());
    };

    let mut config = match args.next() {
        Some(path) => ServerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ServerConfig::default(),
    };
    config.port = port.parse()?;

    // Without a listening socket there is nothing to do; the error ends the process.
    let listener = Listener::bind(&config).await?;
    let root = Arc::new(PathBuf::from(root));

    loop {
        let connection = match listener.accept_connection().await {
            Ok(connection) => connection,
            Err(_) => continue,
        };

        let root = root.clone();
        tokio::spawn(async move {
            match connection.get_request().await {
                Ok(request) => serve(request, &root).await,
                // Bad requests get the same 404 page as missing files.
                Err(rejected) => {
                    if let Err(e) = rejected.return_error(NOT_FOUND_PAGE).await {
                        error!("Response failed: {e}");
                    }
                }
            }
        });
    }
}
