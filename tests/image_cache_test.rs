//! Image loading and cache behavior against a mock server.

use std::sync::Arc;

use async_trait::async_trait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chowder::error::TransportFailure;
use chowder::image::{ImageCache, ImageLoadError, ImageLoader, SCALE_UNIT};
use chowder::transport::{HttpTransport, ReqwestTransport, SignedRequest, TransportReply};

// PNG signature plus the start of an IHDR chunk; enough for sniffing.
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52,
];

fn loader() -> ImageLoader {
    ImageLoader::new(Arc::new(ReqwestTransport::new()))
}

async fn png_server(expected_fetches: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_BYTES))
        .expect(expected_fetches)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn load_fetches_and_caches() {
    let server = png_server(1).await;
    let loader = loader();
    let url = format!("{}/photo.png", server.uri());

    let reference = loader.reference(url.as_str());
    assert!(reference.cached_image().is_none());

    let image = reference.load(SCALE_UNIT).await.unwrap();
    assert_eq!(image.data(), PNG_BYTES);
    assert!(loader.cache().contains(&url));
    assert!(reference.cached_image().is_some());
}

#[tokio::test]
async fn two_references_share_one_fetch() {
    let server = png_server(1).await;
    let loader = loader();
    let url = format!("{}/photo.png", server.uri());

    let first = loader.reference(url.as_str());
    let second = loader.reference(url.as_str());

    let first_image = first.load(SCALE_UNIT).await.unwrap();
    let second_image = second.load(SCALE_UNIT).await.unwrap();

    // Both ended with byte-identical encoded data, off a single fetch
    // (the mock's expect(1) verifies the count on drop).
    assert_eq!(first_image.data(), second_image.data());
    assert_eq!(
        first.cached_image().unwrap().data(),
        second.cached_image().unwrap().data()
    );
}

#[tokio::test]
async fn cached_reads_return_independent_copies() {
    let server = png_server(1).await;
    let loader = loader();
    let url = format!("{}/photo.png", server.uri());

    let reference = loader.reference(url.as_str());
    reference.load(SCALE_UNIT).await.unwrap();

    let first = reference.cached_image().unwrap();
    let second = reference.cached_image().unwrap();
    assert_eq!(first, second);
    // Distinct backing allocations: neither read aliases the cache's copy.
    assert_ne!(first.data().as_ptr(), second.data().as_ptr());
}

#[tokio::test]
async fn second_load_reuses_cached_image_without_refetch() {
    let server = png_server(1).await;
    let loader = loader();
    let url = format!("{}/photo.png", server.uri());

    let reference = loader.reference(url.as_str());
    let first = reference.load(SCALE_UNIT).await.unwrap();
    let again = reference.load(2 * SCALE_UNIT).await.unwrap();
    assert_eq!(first.data(), again.data());
    assert_eq!(again.scale(), 2 * SCALE_UNIT);
}

#[tokio::test]
async fn flush_clears_every_entry() {
    let server = png_server(1).await;
    let loader = loader();
    let url = format!("{}/photo.png", server.uri());

    loader.reference(url.as_str()).load(SCALE_UNIT).await.unwrap();
    assert!(loader.cache().contains(&url));

    loader.cache().flush();
    assert!(!loader.cache().contains(&url));
}

#[tokio::test]
async fn non_image_bytes_fail_with_invalid_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not a photo</html>"))
        .mount(&server)
        .await;

    let loader = loader();
    let url = format!("{}/photo.png", server.uri());
    let err = loader.reference(url.as_str()).load(SCALE_UNIT).await.unwrap_err();
    assert_eq!(err, ImageLoadError::InvalidData);
    assert!(!loader.cache().contains(&url));
}

#[tokio::test]
async fn empty_body_fails_with_no_data_received() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let loader = loader();
    let url = format!("{}/photo.png", server.uri());
    let err = loader.reference(url.as_str()).load(SCALE_UNIT).await.unwrap_err();
    assert_eq!(err, ImageLoadError::NoDataReceived);
}

#[tokio::test]
async fn failed_load_leaves_reference_reusable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("nope"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_BYTES))
        .mount(&server)
        .await;

    let loader = loader();
    let url = format!("{}/photo.png", server.uri());
    let reference = loader.reference(url.as_str());

    assert_eq!(
        reference.load(SCALE_UNIT).await.unwrap_err(),
        ImageLoadError::InvalidData
    );
    // The guard reset the state; the retry succeeds.
    assert!(reference.load(SCALE_UNIT).await.is_ok());
}

/// Transport that parks until released, so a load can be held in flight.
struct ParkedTransport {
    release: tokio::sync::Notify,
}

#[async_trait]
impl HttpTransport for ParkedTransport {
    async fn send(&self, _request: SignedRequest) -> TransportReply {
        self.release.notified().await;
        TransportReply::success(200, PNG_BYTES.to_vec())
    }
}

#[tokio::test]
async fn load_while_loading_fails_fast_without_second_fetch() {
    let transport = Arc::new(ParkedTransport {
        release: tokio::sync::Notify::new(),
    });
    let loader = ImageLoader::new(transport.clone());
    let reference = loader.reference("https://images.example/photo.png");

    let in_flight = tokio::spawn({
        let reference = Arc::clone(&reference);
        async move { reference.load(SCALE_UNIT).await }
    });

    // Wait until the first load has parked inside the transport.
    tokio::task::yield_now().await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let second = reference.load(SCALE_UNIT).await;
    assert_eq!(second.unwrap_err(), ImageLoadError::LoadInProgress);

    transport.release.notify_one();
    let first = in_flight.await.unwrap();
    assert!(first.is_ok());
}

/// Transport that always fails with a connection error.
struct RefusingTransport;

#[async_trait]
impl HttpTransport for RefusingTransport {
    async fn send(&self, _request: SignedRequest) -> TransportReply {
        TransportReply::failure(TransportFailure::new("connect", "connection refused"))
    }
}

#[tokio::test]
async fn transport_failure_surfaces_as_request_error() {
    let loader = ImageLoader::new(Arc::new(RefusingTransport));
    let err = loader
        .reference("https://images.example/photo.png")
        .load(SCALE_UNIT)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ImageLoadError::Request(TransportFailure::new("connect", "connection refused"))
    );
}

#[tokio::test]
async fn isolated_caches_do_not_share_entries() {
    let server = png_server(2).await;
    let url = format!("{}/photo.png", server.uri());

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new());
    let first_loader =
        ImageLoader::new(Arc::clone(&transport)).with_cache(Arc::new(ImageCache::new()));
    let second_loader = ImageLoader::new(transport).with_cache(Arc::new(ImageCache::new()));

    first_loader.reference(url.as_str()).load(SCALE_UNIT).await.unwrap();
    assert!(first_loader.cache().contains(&url));
    assert!(!second_loader.cache().contains(&url));

    // The second loader's cache is cold, so it fetches again.
    second_loader.reference(url.as_str()).load(SCALE_UNIT).await.unwrap();
}
