use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// Where the image behind a slide comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ViewSource {
    Path(PathBuf),
    Url(Url),
}

impl ViewSource {
    /// Parse a local path, `file://` URL or http(s) URL
    pub fn parse(input: &str) -> crate::Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(crate::Error::InvalidSource("empty source".to_string()));
        }

        if !input.contains("://") {
            return Ok(Self::Path(PathBuf::from(input)));
        }

        let url = Url::parse(input)?;
        match url.scheme() {
            "http" | "https" => Ok(Self::Url(url)),
            "file" => url
                .to_file_path()
                .map(Self::Path)
                .map_err(|_| crate::Error::InvalidSource(input.to_string())),
            scheme => Err(crate::Error::InvalidSource(format!(
                "unsupported scheme '{}' in {}",
                scheme, input
            ))),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Last path segment, used when a slide has no title
    pub fn file_name(&self) -> Option<String> {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Self::Url(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        }
    }
}

impl fmt::Display for ViewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

impl FromStr for ViewSource {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ViewSource {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::parse(&value)
    }
}

impl From<ViewSource> for String {
    fn from(source: ViewSource) -> Self {
        source.to_string()
    }
}

/// One view of the terminal carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub source: ViewSource,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Slide {
    pub fn new(source: ViewSource) -> Self {
        Self {
            source,
            title: None,
            caption: None,
        }
    }

    /// Title, falling back to the source's file name
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.source.file_name())
            .unwrap_or_else(|| self.source.to_string())
    }
}

/// Read a JSON manifest: an array of `{ "source", "title"?, "caption"? }` objects.
/// Relative paths resolve against the manifest's directory.
pub fn load_manifest(path: &Path) -> crate::Result<Vec<Slide>> {
    let content = std::fs::read_to_string(path)?;
    let mut slides: Vec<Slide> = serde_json::from_str(&content)?;

    if let Some(base) = path.parent() {
        for slide in &mut slides {
            if let ViewSource::Path(ref mut p) = slide.source {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
    }

    tracing::debug!(count = slides.len(), path = %path.display(), "Loaded manifest");
    Ok(slides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_path() {
        let source = ViewSource::parse("photos/a.png").unwrap();
        assert_eq!(source, ViewSource::Path(PathBuf::from("photos/a.png")));
        assert!(!source.is_remote());
        assert_eq!(source.file_name().as_deref(), Some("a.png"));
    }

    #[test]
    fn test_parse_http_url() {
        let source = ViewSource::parse("https://example.com/img/cat.jpg").unwrap();
        assert!(source.is_remote());
        assert_eq!(source.file_name().as_deref(), Some("cat.jpg"));
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        assert!(matches!(
            ViewSource::parse("ftp://example.com/a.png"),
            Err(crate::Error::InvalidSource(_))
        ));
        assert!(matches!(
            ViewSource::parse("   "),
            Err(crate::Error::InvalidSource(_))
        ));
    }

    #[test]
    fn test_display_title_falls_back_to_file_name() {
        let mut slide = Slide::new(ViewSource::parse("/tmp/beach.png").unwrap());
        assert_eq!(slide.display_title(), "beach.png");
        slide.title = Some("Beach".to_string());
        assert_eq!(slide.display_title(), "Beach");
    }

    #[test]
    fn test_load_manifest_resolves_relative_paths() {
        let dir = std::env::temp_dir().join(format!("carousel-manifest-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let manifest = dir.join("slides.json");
        std::fs::write(
            &manifest,
            r#"[
                { "source": "one.png", "caption": "First" },
                { "source": "https://example.com/two.png", "title": "Two" }
            ]"#,
        )
        .unwrap();

        let slides = load_manifest(&manifest).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].source, ViewSource::Path(dir.join("one.png")));
        assert_eq!(slides[0].caption.as_deref(), Some("First"));
        assert!(slides[1].source.is_remote());
        assert_eq!(slides[1].display_title(), "Two");
    }

    #[test]
    fn test_load_manifest_bad_json() {
        let path = std::env::temp_dir().join(format!("carousel-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_manifest(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }
}
