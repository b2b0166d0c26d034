//! Network-backed images with a shared, deduplicating cache.
//!
//! An [`ImageReference`] loads the image behind one URL at most once; a
//! process-wide (but explicitly constructed and injectable) [`ImageCache`]
//! shares the decoded result between references created for the same URL.
//! Every read hands out an independent copy of the decoded image, never a
//! handle into the cache, so one caller scaling its copy in place cannot
//! corrupt another caller's copy or the cache itself.
//!
//! Actual pixel decoding is a capability: [`ImageDecoder`] turns raw bytes
//! into a [`DecodedImage`] or refuses. The shipped [`SniffDecoder`] validates
//! the bytes as a known image format by signature; applications wanting real
//! bitmap decoding wrap their codec of choice in the same trait.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use thiserror::Error;

use crate::error::TransportFailure;
use crate::transport::HttpTransport;

/// A decoded image plus the scale it was requested at.
///
/// `Clone` produces a deep, independent copy; mutating one copy never affects
/// another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    data: Vec<u8>,
    format: ImageFormat,
    scale: u32,
}

/// Scale is expressed in hundredths, so 100 is 1.0x.
pub const SCALE_UNIT: u32 = 100;

impl DecodedImage {
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        Self {
            data,
            format,
            scale: SCALE_UNIT,
        }
    }

    /// The encoded bytes backing this copy.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> &ImageFormat {
        &self.format
    }

    /// The scale this copy was requested at, in hundredths.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// An independent copy carrying the requested scale. Pixel resampling is
    /// the consuming codec's job; the copy records what was asked for.
    pub fn scaled(&self, scale: u32) -> Self {
        let mut copy = self.clone();
        copy.scale = scale;
        copy
    }
}

/// Recognized image container formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Other(String),
}

/// The injectable decode capability.
pub trait ImageDecoder: Send + Sync {
    /// Decodes raw bytes, or returns `None` when they are not an image.
    fn decode(&self, data: &[u8]) -> Option<DecodedImage>;
}

/// Signature-sniffing decoder.
///
/// Validates that the bytes carry a known image signature and keeps the
/// encoded bytes as the image backing. Sufficient for cache correctness and
/// for callers that feed bytes to a platform codec themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffDecoder;

impl ImageDecoder for SniffDecoder {
    fn decode(&self, data: &[u8]) -> Option<DecodedImage> {
        let kind = infer::get(data)?;
        if !kind.mime_type().starts_with("image/") {
            return None;
        }
        let format = match kind.extension() {
            "png" => ImageFormat::Png,
            "jpg" => ImageFormat::Jpeg,
            "gif" => ImageFormat::Gif,
            "webp" => ImageFormat::WebP,
            other => ImageFormat::Other(other.to_string()),
        };
        Some(DecodedImage::new(data.to_vec(), format))
    }
}

/// Why an image load failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageLoadError {
    /// The fetch failed at the transport level.
    #[error("failed to request the image ({0})")]
    Request(TransportFailure),
    /// The reply carried no bytes.
    #[error("no data was received when loading the image")]
    NoDataReceived,
    /// Bytes arrived but they are not an image.
    #[error("the data received was not an image")]
    InvalidData,
    /// A load on this reference is already in progress; wait for it.
    #[error("an image load is already in progress")]
    LoadInProgress,
}

/// Shared image store.
///
/// One cache is constructed at application setup and handed to every loader
/// that should share results. One read/write lock guards the map: lookups
/// take the shared side, insertion and flush the exclusive side.
#[derive(Default)]
pub struct ImageCache {
    entries: RwLock<HashMap<String, Arc<ImageReference>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, url: &str) -> Option<Arc<ImageReference>> {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Inserts atomically unless an entry for the URL already exists, and
    /// returns the entry that ended up cached. Racing loaders of the same URL
    /// therefore converge on a single winner instead of clobbering each other.
    pub(crate) fn insert_if_absent(&self, reference: Arc<ImageReference>) -> Arc<ImageReference> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries
            .entry(reference.url.clone())
            .or_insert(reference)
            .clone()
    }

    /// Whether an image for the URL is cached.
    pub fn contains(&self, url: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(url)
    }

    /// Removes every entry, atomically with respect to readers.
    pub fn flush(&self) {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }
}

/// An image identified by its source URL.
///
/// Two references constructed with the same URL against the same cache are
/// interchangeable: after either loads successfully they share one cache
/// entry. The decoded image, once set, is never replaced — the first
/// successful load wins and later loads reuse it without another fetch.
pub struct ImageReference {
    url: String,
    loading: AtomicBool,
    image: OnceLock<DecodedImage>,
    transport: Arc<dyn HttpTransport>,
    decoder: Arc<dyn ImageDecoder>,
    cache: Arc<ImageCache>,
}

/// Resets the loading flag on every exit path.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ImageReference {
    /// The source URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// A copy of the already-loaded image, or `None` before the first
    /// successful load. Each call returns a fresh independent copy.
    pub fn cached_image(&self) -> Option<DecodedImage> {
        self.image.get().cloned()
    }

    /// Loads the image, at most one attempt in flight per reference.
    ///
    /// A cache hit (this reference's own earlier load, or another reference's
    /// load of the same URL) resolves without a network call. A second call
    /// while one is outstanding fails fast with
    /// [`ImageLoadError::LoadInProgress`]; nothing is queued.
    ///
    /// `scale` is carried on the returned copy, in hundredths ([`SCALE_UNIT`]
    /// is 1.0x).
    pub async fn load(self: &Arc<Self>, scale: u32) -> Result<DecodedImage, ImageLoadError> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(ImageLoadError::LoadInProgress);
        }
        let _guard = LoadingGuard(&self.loading);

        // Another reference may have loaded this URL already; adopt its
        // image. OnceLock keeps the first write, so an already-set image is
        // never replaced.
        if self.image.get().is_none() {
            if let Some(cached) = self.cache.get(&self.url) {
                if let Some(image) = cached.cached_image() {
                    let _ = self.image.set(image);
                }
            }
        }
        if let Some(image) = self.image.get() {
            return Ok(image.scaled(scale));
        }

        let reply = self.transport.fetch(&self.url).await;
        if let Some(failure) = reply.error {
            tracing::warn!(url = %self.url, failure = %failure, "image fetch failed");
            return Err(ImageLoadError::Request(failure));
        }
        let data = match reply.body {
            Some(data) if !data.is_empty() => data,
            _ => return Err(ImageLoadError::NoDataReceived),
        };
        let image = self.decoder.decode(&data).ok_or(ImageLoadError::InvalidData)?;

        // First write wins: if a concurrent adopt beat us to the cell, the
        // incumbent image is the one every caller must see.
        let stored = self.image.get_or_init(|| image).scaled(scale);
        self.cache.insert_if_absent(Arc::clone(self));
        Ok(stored)
    }
}

/// Factory wiring references to one shared cache, transport, and decoder.
///
/// Owned by application setup; there is deliberately no global instance, so
/// tests and embedders can run isolated caches side by side.
#[derive(Clone)]
pub struct ImageLoader {
    transport: Arc<dyn HttpTransport>,
    decoder: Arc<dyn ImageDecoder>,
    cache: Arc<ImageCache>,
}

impl ImageLoader {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            decoder: Arc::new(SniffDecoder),
            cache: Arc::new(ImageCache::new()),
        }
    }

    pub fn with_decoder(mut self, decoder: impl ImageDecoder + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    pub fn with_cache(mut self, cache: Arc<ImageCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The cache shared by this loader's references.
    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }

    /// Creates a reference for the URL. References for equal URLs share one
    /// cache entry once either has loaded.
    pub fn reference(&self, url: impl Into<String>) -> Arc<ImageReference> {
        Arc::new(ImageReference {
            url: url.into(),
            loading: AtomicBool::new(false),
            image: OnceLock::new(),
            transport: Arc::clone(&self.transport),
            decoder: Arc::clone(&self.decoder),
            cache: Arc::clone(&self.cache),
        })
    }
}
