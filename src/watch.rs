// ABOUTME: Watch module for monitoring document changes made outside the editor
// ABOUTME: Re-imports the document on change, re-renders the deck and serves a live preview

use log::{debug, error, info};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;
use tiny_http::{Header, Response, Server, StatusCode};

use crate::errors::{Result, SlideError};
use crate::html;
use crate::navigation::parse_slide_route;
use crate::render::ComrakRenderer;
use crate::utils;

/// Configuration for watch mode
pub struct WatchConfig {
    /// Path to the document file to watch
    pub document_path: PathBuf,

    /// Where to write the rendered deck after each change
    pub html_output: Option<PathBuf>,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,

    /// Whether to serve the deck using a local web server
    pub serve: bool,

    /// Port for local web server
    pub port: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::new(),
            html_output: None,
            debounce_ms: 500,
            serve: false,
            port: 8080,
        }
    }
}

/// The latest imported document, shared with the preview server.
pub type SharedDocument = Arc<RwLock<String>>;

/// Answer one preview request path with a status and an HTML body.
pub fn respond_to_path(url_path: &str, document: &str) -> (u16, String) {
    let renderer = ComrakRenderer::default();
    let path = url_path.split(['?', '#']).next().unwrap_or(url_path);
    if path == "/" || path.is_empty() {
        return (200, html::generate_deck(document, &renderer));
    }
    if path.starts_with("/slide/") {
        let number = parse_slide_route(path);
        return (200, html::generate_slide_page(document, number, &renderer));
    }
    (404, "404 Not Found".to_string())
}

/// Start a simple HTTP server rendering the shared document on each request
fn start_server(document: SharedDocument, port: u16) -> Result<()> {
    let server = Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| SlideError::WatchError(format!("Failed to start HTTP server: {}", e)))?;

    thread::spawn(move || {
        info!("HTTP server listening on http://localhost:{}", port);
        println!("HTTP server listening on http://localhost:{}", port);

        for request in server.incoming_requests() {
            let url_path = request.url().to_string();
            let (status, body) = {
                let text = document.read();
                respond_to_path(&url_path, &text)
            };
            debug!("Request for {:?} -> {}", url_path, status);

            let mut response = Response::from_string(body).with_status_code(StatusCode(status));
            if status == 200 {
                if let Ok(header) = Header::from_bytes("Content-Type", "text/html; charset=utf-8")
                {
                    response = response.with_header(header);
                }
            }
            if let Err(e) = request.respond(response) {
                error!("Failed to send response: {}", e);
            }
        }
    });

    Ok(())
}

/// Starts watching a document file and re-renders when it changes
pub fn watch_document(config: WatchConfig) -> Result<()> {
    // Validate input file exists
    utils::validate_file_exists(&config.document_path)?;

    if let Some(html_output) = &config.html_output {
        utils::ensure_parent_directory_exists(html_output)?;
    }

    let shared: SharedDocument = Arc::new(RwLock::new(String::new()));

    // Initial generation
    regenerate_outputs(&config, &shared)?;

    // Start local server if requested
    if config.serve {
        start_server(shared.clone(), config.port)?;
    }

    // Create a channel to receive file system events
    let (tx, rx) = mpsc::channel();

    // Create debouncer for file system events
    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| SlideError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    // Watch the containing directory; editors often replace the file on save
    let watch_path = match config.document_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let abs_watch_path = utils::get_absolute_path(watch_path)?;
    debug!("Watching absolute path: {:?}", abs_watch_path);

    debouncer
        .watcher()
        .watch(&abs_watch_path, RecursiveMode::NonRecursive)
        .map_err(|e| {
            SlideError::WatchError(format!(
                "Failed to start watching directory {:?}: {}",
                abs_watch_path, e
            ))
        })?;

    info!("Watching for changes in {:?}", config.document_path);
    println!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        config.document_path
    );

    for result in rx {
        match result {
            Ok(events) => {
                let relevant = events
                    .iter()
                    .flat_map(|event| event.paths.iter())
                    .any(|path| is_relevant_path(path, &config.document_path));

                if relevant {
                    match regenerate_outputs(&config, &shared) {
                        Ok(()) => info!("Regenerated outputs successfully"),
                        Err(e) => error!("Failed to regenerate outputs: {}", e),
                    }
                }
            }
            Err(errors) => {
                for e in errors {
                    error!("Watch error: {:?}", e);
                }
            }
        }
    }

    Ok(())
}

/// Checks if a changed path is the watched document
fn is_relevant_path(path: &Path, document_path: &Path) -> bool {
    if path == document_path {
        return true;
    }
    match (
        utils::get_absolute_path(path),
        utils::get_absolute_path(document_path),
    ) {
        (Ok(changed), Ok(watched)) => changed == watched,
        _ => false,
    }
}

/// Re-import the document and refresh every output
fn regenerate_outputs(config: &WatchConfig, shared: &SharedDocument) -> Result<()> {
    info!("Regenerating outputs...");

    let document = utils::import_document(&config.document_path)?;

    if let Some(html_output) = &config.html_output {
        let deck = html::generate_deck(&document, &ComrakRenderer::default());
        html::write_html_to_file(&deck, html_output)?;
        info!("HTML regenerated: {:?}", html_output);
    }

    *shared.write() = document;
    Ok(())
}
