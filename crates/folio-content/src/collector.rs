//! Content collection from the content store.
//!
//! Walks one directory per content kind, turns every supported file into a
//! raw record and validates it against the kind's schema.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use folio_core::{
    Config, ContentKind, ContentPath, CoreError, InvalidPolicy, Slug, frontmatter,
};
use folio_schema::{JourneyEntry, ProjectRecord, Schema, Testimonial, UsesGroup, ValidationError};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::collections::{Collections, Entry};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// One or more records could not be loaded under the `fail` policy.
    #[error("{} content record(s) failed to load:\n{}", .0.len(), list(.0))]
    Invalid(Vec<RecordFailure>),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Why a single content file was rejected.
#[derive(Debug)]
pub enum Problem {
    /// The file could not be read or its frontmatter could not be parsed.
    Source(CoreError),
    /// The record does not match its schema.
    Invalid(ValidationError),
    /// Another file in the same collection resolves to the same slug.
    DuplicateSlug(Slug),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Invalid(err) => {
                write!(f, "{} invalid field(s)", err.violations.len())?;
                for violation in &err.violations {
                    write!(f, "\n    - {violation}")?;
                }
                Ok(())
            }
            Self::DuplicateSlug(slug) => write!(f, "duplicate slug '{slug}'"),
        }
    }
}

/// A content file that was rejected.
#[derive(Debug)]
pub struct RecordFailure {
    /// Collection the file belongs to.
    pub kind: ContentKind,

    /// Path of the file on disk.
    pub path: PathBuf,

    /// What was wrong with it.
    pub problem: Problem,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path.display(), self.kind, self.problem)
    }
}

fn list(failures: &[RecordFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("  {failure}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collection statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Records validated and kept.
    pub loaded: usize,

    /// Records dropped under the `skip` policy.
    pub skipped: usize,
}

/// Content collector that walks the content store and validates records.
#[derive(Debug, Clone)]
pub struct ContentCollector {
    content_dir: PathBuf,
    policy: InvalidPolicy,
}

impl ContentCollector {
    /// Create a collector for a content directory.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>, policy: InvalidPolicy) -> Self {
        Self {
            content_dir: content_dir.into(),
            policy,
        }
    }

    /// Create a collector from site configuration, resolving the content
    /// directory against `root`.
    #[must_use]
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(config.content_dir(root), config.content.on_invalid)
    }

    /// Collect and validate every content kind.
    pub fn collect(&self) -> Result<(Collections, CollectStats)> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let mut failures = Vec::new();
        let collections = Collections {
            projects: self.load_kind::<ProjectRecord>(&mut failures)?,
            journey: self.load_kind::<JourneyEntry>(&mut failures)?,
            uses: self.load_kind::<UsesGroup>(&mut failures)?,
            testimonials: self.load_kind::<Testimonial>(&mut failures)?,
        };

        let stats = CollectStats {
            loaded: collections.len(),
            skipped: failures.len(),
        };

        if !failures.is_empty() {
            match self.policy {
                InvalidPolicy::Fail => return Err(CollectorError::Invalid(failures)),
                InvalidPolicy::Skip => {
                    for failure in &failures {
                        warn!(
                            kind = %failure.kind,
                            path = %failure.path.display(),
                            problem = %failure.problem,
                            "skipping content record"
                        );
                    }
                }
            }
        }

        info!(
            projects = collections.projects.len(),
            journey = collections.journey.len(),
            uses = collections.uses.len(),
            testimonials = collections.testimonials.len(),
            skipped = stats.skipped,
            "content collection complete"
        );

        Ok((collections, stats))
    }

    /// Collect a single content kind, applying the invalid-record policy.
    pub fn collect_kind<T: Schema + Send>(&self) -> Result<Vec<Entry<T>>> {
        let mut failures = Vec::new();
        let entries = self.load_kind::<T>(&mut failures)?;

        if !failures.is_empty() {
            if self.policy == InvalidPolicy::Fail {
                return Err(CollectorError::Invalid(failures));
            }
            for failure in &failures {
                warn!(
                    path = %failure.path.display(),
                    problem = %failure.problem,
                    "skipping content record"
                );
            }
        }

        Ok(entries)
    }

    /// Load and validate every file of one kind, sorted by slug.
    fn load_kind<T: Schema + Send>(
        &self,
        failures: &mut Vec<RecordFailure>,
    ) -> Result<Vec<Entry<T>>> {
        let kind = T::KIND;
        let dir = self.content_dir.join(kind.dir_name());
        let files = find_content_files(&dir)?;
        debug!(%kind, count = files.len(), "found content files");

        let results: Vec<_> = files
            .par_iter()
            .map(|(path, content_path)| load_entry::<T>(path, content_path))
            .collect();

        let mut entries: Vec<Entry<T>> = Vec::with_capacity(results.len());
        for (result, (path, _)) in results.into_iter().zip(&files) {
            match result {
                Ok(entry) => entries.push(entry),
                Err(problem) => failures.push(RecordFailure {
                    kind,
                    path: path.clone(),
                    problem,
                }),
            }
        }

        entries.sort_by(|a, b| a.slug.cmp(&b.slug).then_with(|| a.path.cmp(&b.path)));

        // Keep the first file for a slug, reject the rest.
        let mut unique: Vec<Entry<T>> = Vec::with_capacity(entries.len());
        for entry in entries {
            match unique.last() {
                Some(previous) if previous.slug == entry.slug => failures.push(RecordFailure {
                    kind,
                    path: entry.path,
                    problem: Problem::DuplicateSlug(entry.slug),
                }),
                _ => unique.push(entry),
            }
        }

        Ok(unique)
    }
}

/// Find content files below a collection directory, sorted by path.
fn find_content_files(dir: &Path) -> Result<Vec<(PathBuf, ContentPath)>> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "collection directory missing");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(dir).unwrap_or(path);
        match ContentPath::from_path(relative) {
            Some(content_path) => files.push((path.to_path_buf(), content_path)),
            None => debug!(path = %path.display(), "skipping non-content file"),
        }
    }

    Ok(files)
}

/// Read, parse and validate a single content file.
fn load_entry<T: Schema>(
    path: &Path,
    content_path: &ContentPath,
) -> std::result::Result<Entry<T>, Problem> {
    debug!(path = %path.display(), "loading content file");

    let source = fs::read_to_string(path).map_err(|e| Problem::Source(e.into()))?;
    let raw = frontmatter::parse_source(&source, content_path.format, path)
        .map_err(Problem::Source)?;
    let data = T::validate(&raw.data).map_err(Problem::Invalid)?;

    Ok(Entry {
        slug: content_path.slug.clone(),
        path: path.to_path_buf(),
        data,
        body: raw.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, content).expect("write file");
    }

    const TESTIMONIAL: &str = r#"{
        "name": "Grace Hopper",
        "role": "Director",
        "company": "Acme",
        "relationship": "Manager",
        "quote": "Great engineer.",
        "date": "2024"
    }"#;

    #[test]
    fn test_find_content_files_skips_hidden_and_unknown() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(dir.path(), "a.json", "{}");
        write(dir.path(), "nested/b.md", "---\n---\n");
        write(dir.path(), ".drafts/c.md", "---\n---\n");
        write(dir.path(), "notes.txt", "ignored");

        let files = find_content_files(dir.path()).expect("find files");
        let slugs: Vec<&str> = files.iter().map(|(_, cp)| cp.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "nested/b"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let files = find_content_files(Path::new("/nonexistent/content/projects")).expect("find");
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_kind_duplicate_slug() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(dir.path(), "testimonials/grace.json", TESTIMONIAL);
        write(dir.path(), "testimonials/grace/index.json", TESTIMONIAL);

        let collector = ContentCollector::new(dir.path(), InvalidPolicy::Fail);
        let err = collector.collect_kind::<Testimonial>().unwrap_err();

        let CollectorError::Invalid(failures) = err else {
            panic!("expected invalid records");
        };
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            &failures[0].problem,
            Problem::DuplicateSlug(slug) if slug.as_str() == "grace"
        ));
    }

    #[test]
    fn test_collect_kind_skip_policy() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(dir.path(), "testimonials/grace.json", TESTIMONIAL);
        write(dir.path(), "testimonials/broken.json", r#"{ "name": "Anon" }"#);

        let collector = ContentCollector::new(dir.path(), InvalidPolicy::Skip);
        let entries = collector.collect_kind::<Testimonial>().expect("collect");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug.as_str(), "grace");
        assert!(entries[0].body.is_none());
    }

    #[test]
    fn test_failure_display_lists_violations() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(
            dir.path(),
            "testimonials/broken.json",
            r#"{ "name": "Anon", "linkedin": "not-a-url" }"#,
        );

        let collector = ContentCollector::new(dir.path(), InvalidPolicy::Fail);
        let message = collector
            .collect_kind::<Testimonial>()
            .unwrap_err()
            .to_string();

        assert!(message.starts_with("1 content record(s) failed to load"));
        assert!(message.contains("broken.json (testimonials)"));
        assert!(message.contains("- role: missing required field"));
        assert!(message.contains("- linkedin: invalid format"));
    }
}
