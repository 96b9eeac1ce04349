//! Input loading: local files, http(s) URLs and the external stylesheet.

use std::fmt;
use std::path::{Path, PathBuf};

use html2css_extract::stylesheet_links;
use reqwest::Url;

use crate::error::CliError;

/// Hosted stylesheet used by `--default-style`.
pub const DEFAULT_STYLE_URL: &str = "https://raw.githubusercontent.com/playsetco/template/main/styles.css";

/// Local stylesheet picked up from the first input's directory.
pub const DEFAULT_CSS_FILE: &str = "default.css";

/// Where a document or stylesheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(Url),
    Path(PathBuf),
}

impl Location {
    /// `http://` and `https://` arguments are URLs, anything else a path.
    pub fn parse(input: &str) -> Result<Self, CliError> {
        if is_remote(input) {
            Url::parse(input)
                .map(Location::Url)
                .map_err(|e| CliError::InvalidUrl {
                    url: input.to_string(),
                    reason: e.to_string(),
                })
        } else {
            Ok(Location::Path(PathBuf::from(input)))
        }
    }

    /// Resolve an `href` found in the document at this location.
    pub fn resolve(&self, href: &str) -> Result<Self, CliError> {
        let href = href.trim();
        if is_remote(href) {
            return Location::parse(href);
        }
        if let Some(rest) = href.strip_prefix("//") {
            return Location::parse(&format!("https://{rest}"));
        }
        match self {
            Location::Url(base) => base
                .join(href)
                .map(Location::Url)
                .map_err(|e| CliError::InvalidUrl {
                    url: href.to_string(),
                    reason: e.to_string(),
                }),
            Location::Path(path) => Ok(Location::Path(parent_dir(path).join(href))),
        }
    }

    /// Read the text at this location.
    pub fn read(&self) -> Result<String, CliError> {
        match self {
            Location::Url(url) => fetch(url),
            Location::Path(path) => {
                if !path.is_file() {
                    return Err(CliError::NotFound { path: path.clone() });
                }
                std::fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    /// Base name for generated files.
    pub fn stem(&self) -> String {
        let name = match self {
            Location::Url(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(str::to_string)
                .unwrap_or_default(),
            Location::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let stem = Path::new(&name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if stem.is_empty() {
            "index".to_string()
        } else {
            stem
        }
    }

    /// Directory generated files are written to by default.
    pub fn output_dir(&self) -> PathBuf {
        match self {
            Location::Url(_) => PathBuf::from("."),
            Location::Path(path) => parent_dir(path).to_path_buf(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => write!(f, "{url}"),
            Location::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A loaded HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    pub location: Location,
    pub html: String,
}

impl Document {
    pub fn load(input: &str) -> Result<Self, CliError> {
        let location = Location::parse(input)?;
        let html = location.read()?;
        tracing::info!(%location, bytes = html.len(), "loaded document");
        Ok(Self { location, html })
    }
}

/// Which external stylesheets to consult.
#[derive(Debug, Clone, Default)]
pub struct StyleSources {
    /// `--css`: a URL, a path, or `none`.
    pub explicit: Option<String>,
    pub default_style: bool,
    pub follow_links: bool,
}

impl StyleSources {
    pub fn disabled(&self) -> bool {
        self.explicit
            .as_deref()
            .is_some_and(|css| css.eq_ignore_ascii_case("none"))
    }

    /// Gather the external CSS text for a batch of documents.
    ///
    /// Sources that cannot be read are skipped with a warning; the result is
    /// empty when nothing could be read.
    pub fn collect(&self, documents: &[Document]) -> String {
        if self.disabled() {
            return String::new();
        }

        let mut locations = Vec::new();
        if let Some(css) = &self.explicit {
            push_parsed(&mut locations, Location::parse(css));
        } else if self.default_style {
            push_parsed(&mut locations, Location::parse(DEFAULT_STYLE_URL));
        } else if let Some(Location::Path(path)) = documents.first().map(|d| &d.location) {
            let local = parent_dir(path).join(DEFAULT_CSS_FILE);
            if local.is_file() {
                locations.push(Location::Path(local));
            }
        }

        if self.follow_links {
            for doc in documents {
                for href in stylesheet_links(&doc.html) {
                    push_parsed(&mut locations, doc.location.resolve(&href));
                }
            }
        }

        let mut texts = Vec::new();
        for location in locations {
            match location.read() {
                Ok(css) => {
                    tracing::info!(%location, bytes = css.len(), "loaded stylesheet");
                    texts.push(css);
                }
                Err(e) => tracing::warn!("{e}; continuing without it"),
            }
        }
        texts.join("\n")
    }
}

fn push_parsed(locations: &mut Vec<Location>, location: Result<Location, CliError>) {
    match location {
        Ok(location) if !locations.contains(&location) => locations.push(location),
        Ok(_) => {}
        Err(e) => tracing::warn!("{e}; continuing without it"),
    }
}

/// Blocking client with the transport's default timeouts.
fn http_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("html2css/", env!("CARGO_PKG_VERSION")))
        .build()
}

fn fetch(url: &Url) -> Result<String, CliError> {
    let failed = |source| CliError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = http_client()
        .and_then(|client| client.get(url.clone()).send())
        .map_err(failed)?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().map_err(failed)
}

fn is_remote(input: &str) -> bool {
    let lower = input.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
