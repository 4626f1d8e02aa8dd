//! End to end download, save and list against a local HTTP server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use imgdrop::application::services::Executors;
use imgdrop::application::use_cases::{DownloadImageUseCase, ListSavedImagesUseCase};
use imgdrop::domain::entities::SavedFileName;
use imgdrop::domain::errors::{DownloadError, FetchError};
use imgdrop::infrastructure::image::encode_png;
use imgdrop::infrastructure::{FetcherConfig, HttpImageFetcher, PngImageStore};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone)]
enum Route {
    Respond {
        status: &'static str,
        content_type: &'static str,
        body: Vec<u8>,
    },
    Hang,
}

async fn serve(routes: HashMap<&'static str, Route>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move { handle_connection(stream, &routes).await });
        }
    });

    addr
}

async fn handle_connection(mut stream: TcpStream, routes: &HashMap<&'static str, Route>) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

    let (status, content_type, body) = match routes.get(path.as_str()) {
        Some(Route::Respond {
            status,
            content_type,
            body,
        }) => (*status, *content_type, body.clone()),
        Some(Route::Hang) => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return;
        }
        None => ("404 Not Found", "text/plain", b"not found".to_vec()),
    };

    let head = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&body).await;
    let _ = stream.shutdown().await;
}

fn red_png() -> Vec<u8> {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        10,
        10,
        image::Rgb([255, 0, 0]),
    ));
    encode_png(&image).unwrap()
}

fn png_route(body: Vec<u8>) -> Route {
    Route::Respond {
        status: "200 OK",
        content_type: "image/png",
        body,
    }
}

struct Harness {
    download: DownloadImageUseCase,
    list_saved: ListSavedImagesUseCase,
    dir: TempDir,
}

impl Harness {
    fn new(config: &FetcherConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(HttpImageFetcher::new(config).unwrap());
        let store = Arc::new(PngImageStore::new(dir.path().to_path_buf()));
        let executors = Arc::new(Executors::new().unwrap());

        Self {
            download: DownloadImageUseCase::new(fetcher, store.clone(), executors.clone()),
            list_saved: ListSavedImagesUseCase::new(store, executors),
            dir,
        }
    }

    fn file_names(&self) -> Vec<String> {
        file_names(self.dir.path())
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_downloaded_image_is_saved_and_listed() {
    let addr = serve(HashMap::from([("/red.png", png_route(red_png()))])).await;
    let harness = Harness::new(&FetcherConfig::default());

    let image = harness
        .download
        .fetch(&format!("http://{addr}/red.png"))
        .await
        .unwrap();
    assert_eq!((image.width(), image.height()), (10, 10));
    assert!(
        image
            .image()
            .to_rgb8()
            .pixels()
            .all(|p| *p == image::Rgb([255, 0, 0]))
    );

    let path = harness.download.persist(&image).await.unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(SavedFileName::parse(&name).is_some(), "unexpected name {name}");
    assert_eq!(harness.file_names(), vec![name]);

    let listed = harness.list_saved.execute().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].image().to_rgb8(), image.image().to_rgb8());
}

#[tokio::test]
async fn test_not_found_writes_nothing() {
    let addr = serve(HashMap::new()).await;
    let harness = Harness::new(&FetcherConfig::default());

    let result = harness
        .download
        .fetch(&format!("http://{addr}/missing.png"))
        .await;

    assert_eq!(
        result.unwrap_err(),
        DownloadError::Fetch(FetchError::HttpStatus { status: 404 })
    );
    assert!(harness.file_names().is_empty());
    assert!(harness.list_saved.execute().await.is_empty());
}

#[tokio::test]
async fn test_html_body_is_a_decode_error() {
    let addr = serve(HashMap::from([(
        "/page",
        Route::Respond {
            status: "200 OK",
            content_type: "text/html",
            body: b"<html><body>hello</body></html>".to_vec(),
        },
    )]))
    .await;
    let harness = Harness::new(&FetcherConfig::default());

    let result = harness.download.fetch(&format!("http://{addr}/page")).await;

    assert!(matches!(
        result,
        Err(DownloadError::Fetch(FetchError::Decode { .. }))
    ));
    assert!(harness.file_names().is_empty());
}

#[tokio::test]
async fn test_configured_timeout_ends_hung_request() {
    let addr = serve(HashMap::from([("/slow.png", Route::Hang)])).await;
    let harness = Harness::new(&FetcherConfig {
        timeout: Some(Duration::from_millis(300)),
        ..FetcherConfig::default()
    });

    let result = harness
        .download
        .fetch(&format!("http://{addr}/slow.png"))
        .await;

    assert!(matches!(
        result,
        Err(DownloadError::Fetch(FetchError::Network { .. }))
    ));
}

#[tokio::test]
async fn test_repeated_saves_never_overwrite() {
    let addr = serve(HashMap::from([("/red.png", png_route(red_png()))])).await;
    let harness = Harness::new(&FetcherConfig::default());
    let image = harness
        .download
        .fetch(&format!("http://{addr}/red.png"))
        .await
        .unwrap();

    for _ in 0..5 {
        harness.download.persist(&image).await.unwrap();
    }

    assert_eq!(harness.file_names().len(), 5);
    assert_eq!(harness.list_saved.execute().await.len(), 5);
}

#[tokio::test]
async fn test_listing_skips_foreign_files() {
    let harness = Harness::new(&FetcherConfig::default());
    std::fs::write(harness.dir.path().join("downloaded_image_1.png"), red_png()).unwrap();
    std::fs::write(harness.dir.path().join("note.txt"), b"hello").unwrap();

    let listed = harness.list_saved.execute().await;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].width(), 10);
}
