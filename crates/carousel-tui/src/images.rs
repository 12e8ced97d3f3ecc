//! Slide image loading, caching and halfblock rendering

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use carousel_core::ViewSource;
use image::{DynamicImage, GenericImageView};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use tokio::sync::mpsc;

use crate::event::ImageLoadResult;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) carousel";
const ACCEPT_IMAGES: &str = "image/png,image/jpeg,image/gif,image/*;q=0.8";

/// Local disk cache for downloaded images
#[derive(Debug)]
pub struct ImageDiskCache {
    cache_dir: PathBuf,
}

impl ImageDiskCache {
    pub fn new(cache_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(cache_dir)?;
        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// Cache filename for a URL: hash plus a known image extension
    fn url_to_filename(url: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        let hash = hasher.finish();

        let ext = url
            .rsplit('.')
            .next()
            .map(|e| e.split('?').next().unwrap_or(e).to_lowercase())
            .filter(|e| ["jpg", "jpeg", "png", "gif", "webp"].contains(&e.as_str()))
            .unwrap_or_else(|| "bin".to_string());

        format!("{:016x}.{}", hash, ext)
    }

    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(Self::url_to_filename(url))
    }

    pub fn load(&self, url: &str) -> Option<DynamicImage> {
        let path = self.cache_path(url);
        if path.exists() {
            image::open(&path).ok()
        } else {
            None
        }
    }

    pub fn save(&self, url: &str, data: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.cache_path(url), data)
    }
}

#[derive(Debug, Clone)]
pub enum ImageState {
    Loading,
    Loaded(Arc<DynamicImage>),
    Failed(String),
}

/// In-memory image states keyed by source
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<ViewSource, ImageState>,
    disk_cache: Option<ImageDiskCache>,
}

impl ImageCache {
    pub fn new(cache_dir: Option<&Path>) -> Self {
        let disk_cache = cache_dir.and_then(|d| match ImageDiskCache::new(d) {
            Ok(cache) => Some(cache),
            Err(e) => {
                tracing::warn!("Image disk cache unavailable at {}: {}", d.display(), e);
                None
            }
        });
        Self {
            images: HashMap::new(),
            disk_cache,
        }
    }

    pub fn state(&self, source: &ViewSource) -> Option<&ImageState> {
        self.images.get(source)
    }

    pub fn is_known(&self, source: &ViewSource) -> bool {
        self.images.contains_key(source)
    }

    /// Mark a source as loading. Returns false if it is already known.
    pub fn start_loading(&mut self, source: &ViewSource) -> bool {
        if self.images.contains_key(source) {
            return false;
        }
        self.images.insert(source.clone(), ImageState::Loading);
        true
    }

    /// Try the disk cache for a remote source
    pub fn try_load_from_disk(&mut self, source: &ViewSource) -> bool {
        let (ViewSource::Url(url), Some(disk)) = (source, self.disk_cache.as_ref()) else {
            return false;
        };
        match disk.load(url.as_str()) {
            Some(image) => {
                self.images
                    .insert(source.clone(), ImageState::Loaded(Arc::new(image)));
                true
            }
            None => false,
        }
    }

    /// Record a finished load, persisting downloaded bytes
    pub fn apply(&mut self, result: ImageLoadResult) {
        match result {
            ImageLoadResult::Success {
                source,
                image,
                bytes,
            } => {
                if let (ViewSource::Url(url), Some(bytes), Some(disk)) =
                    (&source, bytes.as_ref(), self.disk_cache.as_ref())
                {
                    if let Err(e) = disk.save(url.as_str(), bytes) {
                        tracing::warn!("Failed to cache {}: {}", url, e);
                    }
                }
                self.images.insert(source, ImageState::Loaded(Arc::new(image)));
            }
            ImageLoadResult::Failure { source, error } => {
                tracing::error!("Failed to load {}: {}", source, error);
                self.images.insert(source, ImageState::Failed(error));
            }
        }
    }
}

/// Load a source on a tokio task and send the result back over `tx`
pub fn spawn_load(source: ViewSource, tx: mpsc::UnboundedSender<ImageLoadResult>) {
    tokio::spawn(async move {
        let result = match load_source(&source).await {
            Ok((image, bytes)) => ImageLoadResult::Success {
                source,
                image,
                bytes,
            },
            Err(error) => ImageLoadResult::Failure { source, error },
        };
        let _ = tx.send(result);
    });
}

/// Read and decode a source. Downloaded bytes are returned for the disk cache.
pub async fn load_source(source: &ViewSource) -> Result<(DynamicImage, Option<Vec<u8>>), String> {
    match source {
        ViewSource::Path(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            let image = decode_image_bytes(&bytes)?;
            Ok((image, None))
        }
        ViewSource::Url(url) => {
            let bytes = download(url.as_str()).await?;
            let image = decode_image_bytes(&bytes)?;
            Ok((image, Some(bytes)))
        }
    }
}

async fn download(url: &str) -> Result<Vec<u8>, String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| format!("Client error: {}", e))?;

    let response = client
        .get(url)
        .header("Accept", ACCEPT_IMAGES)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| format!("Read error: {}", e))
}

/// Decode image bytes, falling back to magic-byte format detection
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, String> {
    if bytes.is_empty() {
        return Err("Empty data".to_string());
    }

    if let Ok(img) = image::load_from_memory(bytes) {
        return Ok(img);
    }

    let format = if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(image::ImageFormat::Png)
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        Some(image::ImageFormat::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(image::ImageFormat::Gif)
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some(image::ImageFormat::WebP)
    } else {
        None
    };

    match format {
        Some(format) => image::load_from_memory_with_format(bytes, format)
            .map_err(|e| format!("{:?}: {}", format, e)),
        None => Err(format!("Unknown format ({}B)", bytes.len())),
    }
}

/// Halfblock rows for an image fitted into `width` x `height` cells,
/// two vertical pixels per cell, aspect ratio kept, centered
pub fn halfblock_lines(img: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    let target_width = width as u32;
    let target_height = height as u32 * 2;
    let (img_width, img_height) = img.dimensions();
    if target_width == 0 || target_height == 0 || img_width == 0 || img_height == 0 {
        return Vec::new();
    }

    let scale = (target_width as f32 / img_width as f32).min(target_height as f32 / img_height as f32);
    let new_width = ((img_width as f32 * scale) as u32).clamp(1, target_width);
    let new_height = ((img_height as f32 * scale) as u32).clamp(1, target_height);

    let resized = img.resize_exact(new_width, new_height, image::imageops::FilterType::Triangle);
    let rgba = resized.to_rgba8();

    let x_offset = (target_width - new_width) / 2;
    let rows = new_height.div_ceil(2);
    let y_offset = (height as u32).saturating_sub(rows) / 2;

    let mut lines: Vec<Line<'static>> = (0..y_offset).map(|_| Line::default()).collect();
    for row in 0..rows {
        let y = row * 2;
        let mut spans: Vec<Span<'static>> = Vec::with_capacity(new_width as usize + 1);
        if x_offset > 0 {
            spans.push(Span::raw(" ".repeat(x_offset as usize)));
        }
        for x in 0..new_width {
            let top = rgba.get_pixel(x, y);
            let bottom = if y + 1 < new_height {
                rgba.get_pixel(x, y + 1)
            } else {
                top
            };
            spans.push(Span::styled(
                "▀",
                Style::default()
                    .fg(Color::Rgb(top[0], top[1], top[2]))
                    .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgba};

    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            width,
            height,
            Rgba([rgb[0], rgb[1], rgb[2], 255]),
        ))
    }

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(&solid(4, 2, [10, 20, 30]));
        let decoded = decode_image_bytes(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (4, 2));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image_bytes(&[]).is_err());
        assert!(decode_image_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn test_halfblocks_fit_and_center() {
        let img = solid(10, 10, [255, 0, 0]);
        let lines = halfblock_lines(&img, 20, 5);

        // 10x10 scaled into 20x10 pixels -> 10x10, five rows, five columns of left padding
        assert_eq!(lines.len(), 5);
        let first = &lines[0];
        assert_eq!(first.spans[0].content, "     ");
        assert_eq!(first.spans.len(), 11);
        assert_eq!(first.spans[1].style.fg, Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn test_halfblocks_empty_area() {
        let img = solid(4, 4, [0, 0, 0]);
        assert!(halfblock_lines(&img, 0, 3).is_empty());
    }

    #[test]
    fn test_url_cache_filename() {
        let name = ImageDiskCache::url_to_filename("https://example.com/a.PNG?x=1");
        assert!(name.ends_with(".png"));
        let name = ImageDiskCache::url_to_filename("https://example.com/image");
        assert!(name.ends_with(".bin"));
    }

    #[test]
    fn test_cache_tracks_load_states() {
        let mut cache = ImageCache::new(None);
        let source = ViewSource::parse("/tmp/a.png").unwrap();

        assert!(cache.start_loading(&source));
        assert!(!cache.start_loading(&source));
        assert!(matches!(cache.state(&source), Some(ImageState::Loading)));

        cache.apply(ImageLoadResult::Failure {
            source: source.clone(),
            error: "missing".to_string(),
        });
        assert!(matches!(cache.state(&source), Some(ImageState::Failed(e)) if e == "missing"));
    }

    #[tokio::test]
    async fn test_load_local_source() {
        let path = std::env::temp_dir().join(format!("carousel-img-{}.png", std::process::id()));
        std::fs::write(&path, png_bytes(&solid(3, 3, [1, 2, 3]))).unwrap();

        let source = ViewSource::Path(path.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_load(source.clone(), tx);
        let result = rx.recv().await.unwrap();
        std::fs::remove_file(&path).ok();

        let mut cache = ImageCache::new(None);
        cache.apply(result);
        assert!(matches!(cache.state(&source), Some(ImageState::Loaded(img)) if img.dimensions() == (3, 3)));
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let source = ViewSource::Path(PathBuf::from("/definitely/not/here.png"));
        assert!(load_source(&source).await.is_err());
    }
}
