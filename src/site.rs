//! Static assets of the Pokemon index site.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Every HTML page the site ships, relative to the site root.
pub const PAGES: [&str; 4] = [
    "index.html",
    "pages/pokedex.html",
    "pages/calculator.html",
    "pages/contact.html",
];

const EMBEDDED: [(&str, &str); 5] = [
    ("index.html", include_str!("../site/index.html")),
    ("pages/pokedex.html", include_str!("../site/pages/pokedex.html")),
    (
        "pages/calculator.html",
        include_str!("../site/pages/calculator.html"),
    ),
    ("pages/contact.html", include_str!("../site/pages/contact.html")),
    ("css/style.css", include_str!("../site/css/style.css")),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

#[derive(Debug, Clone)]
enum Source {
    Embedded,
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Site {
    source: Source,
}

impl Default for Site {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Site {
    /// The assets compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Assets read from `root` on every request.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(root.into()),
        }
    }

    /// Looks up the asset at a request path. `None` for unknown or rejected
    /// paths.
    pub async fn asset(&self, request_path: &str) -> Result<Option<Asset>> {
        let Some(relative) = normalize_request_path(request_path) else {
            tracing::debug!(path = request_path, "rejected asset path");
            return Ok(None);
        };
        let content_type = content_type_for(&relative);

        match &self.source {
            Source::Embedded => {
                let key = relative.to_string_lossy().replace('\\', "/");
                Ok(embedded_asset(&key).map(|body| Asset {
                    body: body.as_bytes().to_vec(),
                    content_type,
                }))
            }
            Source::Directory(root) => {
                let path = root.join(&relative);
                match tokio::fs::metadata(&path).await {
                    Ok(meta) if meta.is_file() => {}
                    Ok(_) => return Ok(None),
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                    Err(err) => return Err(Error::from(err)),
                }
                let body = tokio::fs::read(&path).await?;
                Ok(Some(Asset { body, content_type }))
            }
        }
    }
}

pub(crate) fn embedded_asset(path: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(embedded, _)| *embedded == path)
        .map(|(_, body)| *body)
}

/// Maps a request path onto a relative file path. Directory paths resolve to
/// their `index.html`; any `..`, root or prefix component is refused.
pub(crate) fn normalize_request_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let mut path = if trimmed.is_empty() || trimmed.ends_with('/') {
        format!("{trimmed}index.html")
    } else {
        trimmed.to_string()
    };
    if path.contains('\\') {
        path = path.replace('\\', "/");
    }

    let mut relative = PathBuf::new();
    for component in Path::new(&path).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(relative)
}

pub(crate) fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
