//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::Generator;
use crate::Site;

/// Generate the static site
pub async fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(site)?;
    generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for (path, mode) in watched_paths(site) {
        if path.exists() {
            watcher.watch(&path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = run(site).await {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// The paths a rebuild depends on: posts, static assets, resume data
/// and the site configuration.
pub fn watched_paths(site: &Site) -> Vec<(std::path::PathBuf, notify::RecursiveMode)> {
    let mut paths = Vec::new();

    if let Some(blog_dir) = site.blog_dir() {
        paths.push((blog_dir, notify::RecursiveMode::Recursive));
    }
    paths.push((
        site.base_dir.join(&site.config.static_dir),
        notify::RecursiveMode::Recursive,
    ));
    paths.push((site.resume_path(), notify::RecursiveMode::NonRecursive));
    paths.push((
        site.base_dir.join("_config.yml"),
        notify::RecursiveMode::NonRecursive,
    ));

    paths
}
