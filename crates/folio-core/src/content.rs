//! Content kinds, slugs and source paths.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Project case studies.
    Projects,
    /// Journey timeline entries.
    Journey,
    /// Tool and stack groups for the uses page.
    Uses,
    /// Testimonials from colleagues and clients.
    Testimonials,
}

impl ContentKind {
    /// All content kinds.
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Projects,
        ContentKind::Journey,
        ContentKind::Uses,
        ContentKind::Testimonials,
    ];

    /// Name of the collection directory under the content root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Journey => "journey",
            Self::Uses => "uses",
            Self::Testimonials => "testimonials",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.dir_name() == s)
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))
    }
}

/// Identity of a content record, derived from its location in the store.
///
/// Slugs are lowercase, so `Beacon.md` and a `relatedProjects: [Beacon]`
/// reference name the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Normalize a slug string.
    pub fn new(slug: impl AsRef<str>) -> Self {
        Self(slug.as_ref().to_lowercase())
    }

    /// Slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// File format of a content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Markdown with YAML frontmatter (.md, .mdx).
    Markdown,
    /// YAML data file (.yaml, .yml).
    Yaml,
    /// JSON data file (.json).
    Json,
}

impl SourceFormat {
    /// Determine the source format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "mdx" | "markdown" => Some(Self::Markdown),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Location of a content record within its collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    /// Path relative to the collection directory.
    pub path: PathBuf,

    /// Slug derived from the path.
    pub slug: Slug,

    /// Source format based on extension.
    pub format: SourceFormat,
}

impl ContentPath {
    /// Derive the slug of a file relative to its collection directory.
    ///
    /// - `atlas.md` → `atlas`
    /// - `2023/atlas.yaml` → `2023/atlas`
    /// - `atlas/index.md` → `atlas`
    ///
    /// Returns `None` for unsupported extensions and for a bare `index` file
    /// at the collection root.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let format = SourceFormat::from_extension(extension)?;
        let stem = path.file_stem()?.to_str()?;

        let parent = path.parent().unwrap_or(Path::new(""));
        let slug = if stem == "index" {
            parent.to_string_lossy().replace('\\', "/")
        } else if parent.as_os_str().is_empty() {
            stem.to_string()
        } else {
            format!("{}/{stem}", parent.to_string_lossy().replace('\\', "/"))
        };

        let slug = slug.trim_matches('/');
        if slug.is_empty() {
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
            slug: Slug::new(slug),
            format,
        })
    }
}
