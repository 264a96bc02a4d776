//! Preview server.
//!
//! A lightweight `tiny_http` server over the output directory:
//!
//! - Static file serving with a small MIME table
//! - Automatic `index.html` resolution for directories
//! - The generated `404.html` as the not-found page, when present
//! - Graceful shutdown on Ctrl+C

use crate::config::BlogMetadata;
use crate::log;
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Port used when the site URL does not carry one.
const DEFAULT_PORT: u16 = 8080;

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Serve the output directory until Ctrl+C.
///
/// The port is taken from the configured site URL when it names one
/// (`http://localhost:8000`), [`DEFAULT_PORT`] otherwise.
pub fn serve_output(metadata: &BlogMetadata) -> Result<()> {
    let interface = IpAddr::V4(Ipv4Addr::LOCALHOST);
    let base_port = port_from_url(&metadata.settings.url).unwrap_or(DEFAULT_PORT);

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &metadata.paths.output) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Extract an explicit port from a site URL.
fn port_from_url(url: &str) -> Option<u16> {
    let authority = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = authority.split('/').next()?;
    let (_, port) = host.rsplit_once(':')?;
    port.parse().ok()
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => continue,
            Err(e) => {
                return Err(anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Handle a single HTTP request.
///
/// Resolution order: exact file → directory's `index.html` → 404.
fn handle_request(request: Request, serve_root: &Path) -> Result<()> {
    let url = request.url();
    let path_without_query = url.split('?').next().unwrap_or(url);
    let request_path = path_without_query.trim_matches('/').to_owned();
    let local_path = serve_root.join(&request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request, serve_root)
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve the generated 404 page, falling back to plain text.
fn serve_not_found(request: Request, serve_root: &Path) -> Result<()> {
    let body = fs::read_to_string(serve_root.join("404.html"))
        .unwrap_or_else(|_| "404 Not Found".to_owned());
    let length = body.len();

    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()],
        Cursor::new(body),
        Some(length),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_from_url() {
        assert_eq!(port_from_url("http://localhost:8000"), Some(8000));
        assert_eq!(port_from_url("http://localhost:8000/blog"), Some(8000));
        assert_eq!(port_from_url("https://example.com"), None);
        assert_eq!(port_from_url("https://example.com/path"), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(guess_content_type(Path::new("site.css")), "text/css; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("pic.png")), "image/png");
        assert_eq!(
            guess_content_type(Path::new("data.bin")),
            "application/octet-stream"
        );
    }
}
