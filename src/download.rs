//! Fetching the stats snapshot when it is not on disk yet.

use crate::error::ExplorerError;
use crate::stats::InstanceStats;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load the stats file, downloading it first if it is missing and a URL is known.
pub async fn load_stats(path: &Path, url: Option<&str>) -> Result<InstanceStats, ExplorerError> {
    if !path.exists() {
        if let Some(url) = url {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            eprintln!("Stats not found. Downloading from {}...", url);
            download_stats(url, path).await?;
        }
    }
    InstanceStats::load(path)
}

/// Removes the partial download unless disarmed.
struct PartialFile {
    path: PathBuf,
    armed: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = std::fs::remove_file(&self.path)
        {
            tracing::warn!(path = %self.path.display(), error = %e, "could not remove partial download");
        }
    }
}

pub async fn download_stats(url: &str, output: &Path) -> Result<(), ExplorerError> {
    tracing::info!(url, path = %output.display(), "downloading stats");
    let response = reqwest::get(url).await?.error_for_status()?;

    let pb = match response.content_length() {
        Some(total) => {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .map_err(|e| ExplorerError::Download { reason: e.to_string() })?
                .progress_chars("#>-");
            pb.set_style(style);
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    // Renamed into place once complete
    let partial_path = output.with_extension("part");
    let mut partial = PartialFile::new(partial_path.clone());
    let mut file = std::fs::File::create(&partial_path)?;
    let mut stream = response.bytes_stream();

    while let Some(item) = stream.next().await {
        let chunk = item?;
        file.write_all(&chunk)?;
        pb.inc(chunk.len() as u64);
    }
    file.flush()?;
    drop(file);
    std::fs::rename(&partial_path, output)?;
    partial.disarm();

    pb.finish_with_message("Download complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::{Shutdown, TcpListener, TcpStream};
    use std::thread;

    const STATS: &str = r#"{"stats":{"crawled_instances":1,"users_active_month":5,"instance_details":[
        {"domain":"a.example","site_info":{"site_view":{"site":{"description":"A"},"counts":{"users_active_month":5}}}}
    ]}}"#;

    /// Serve one canned response; `declared_len` may exceed the body to cut the stream short.
    fn serve_once(status: &'static str, body: &'static str, declared_len: usize) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {declared_len}\r\nConnection: close\r\n\r\n{body}"
            )
            .unwrap();
            stream.flush().unwrap();
            let _ = stream.shutdown(Shutdown::Both);
        });
        (format!("http://{addr}/stats.json"), handle)
    }

    fn read_request(stream: &mut TcpStream) {
        let mut buf = [0_u8; 1024];
        let mut request = Vec::new();
        while let Ok(read) = stream.read(&mut buf) {
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_missing_stats_are_downloaded() {
        let (url, handle) = serve_once("200 OK", STATS, STATS.len());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("instance_stats.json");

        let stats = load_stats(&path, Some(&url)).await.unwrap();
        handle.join().unwrap();

        assert_eq!(stats.instances.len(), 1);
        assert_eq!(stats.instances[0].domain, "a.example");
        assert!(path.exists());
        assert!(!path.with_extension("part").exists());
    }

    #[tokio::test]
    async fn test_truncated_download_leaves_nothing_behind() {
        let (url, handle) = serve_once("200 OK", "{\"stats\":", 4096);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instance_stats.json");

        let err = load_stats(&path, Some(&url)).await.unwrap_err();
        handle.join().unwrap();

        assert!(matches!(err, ExplorerError::Http(_)), "{err:?}");
        assert!(!path.exists());
        assert!(!path.with_extension("part").exists());
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let (url, handle) = serve_once("500 Internal Server Error", "", 0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instance_stats.json");

        let err = load_stats(&path, Some(&url)).await.unwrap_err();
        handle.join().unwrap();

        assert!(matches!(err, ExplorerError::Http(_)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_without_url_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instance_stats.json");
        let err = load_stats(&path, None).await.unwrap_err();
        assert!(matches!(err, ExplorerError::StatsNotFound(_)));
    }
}
