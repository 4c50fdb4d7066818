//! Validated collections and the orderings the pages display them in.

use std::{cmp::Ordering, path::PathBuf};

use folio_core::Slug;
use folio_schema::{JourneyEntry, ProjectRecord, Testimonial, UsesCategory, UsesGroup};
use tracing::debug;

/// A validated record together with its identity in the content store.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    /// Identity derived from the file location.
    pub slug: Slug,

    /// Source file path.
    pub path: PathBuf,

    /// The typed record.
    pub data: T,

    /// Markdown body for markdown sources.
    pub body: Option<String>,
}

/// Every validated content record, each collection sorted by slug.
#[derive(Debug, Default)]
pub struct Collections {
    pub projects: Vec<Entry<ProjectRecord>>,
    pub journey: Vec<Entry<JourneyEntry>>,
    pub uses: Vec<Entry<UsesGroup>>,
    pub testimonials: Vec<Entry<Testimonial>>,
}

impl Collections {
    /// Total number of records.
    pub fn len(&self) -> usize {
        self.projects.len() + self.journey.len() + self.uses.len() + self.testimonials.len()
    }

    /// Whether no records were collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a project by slug, ignoring case.
    pub fn project(&self, slug: &str) -> Option<&Entry<ProjectRecord>> {
        let slug = Slug::new(slug);
        self.projects.iter().find(|entry| entry.slug == slug)
    }

    /// Projects in display order: explicit `order` first (ascending), then
    /// newest year, then slug.
    pub fn projects_in_order(&self) -> Vec<&Entry<ProjectRecord>> {
        let mut projects: Vec<_> = self.projects.iter().collect();
        projects.sort_by(|a, b| {
            compare_projects(&a.data, &b.data).then_with(|| a.slug.cmp(&b.slug))
        });
        projects
    }

    /// Featured projects in display order.
    pub fn featured_projects(&self) -> Vec<&Entry<ProjectRecord>> {
        self.projects_in_order()
            .into_iter()
            .filter(|entry| entry.data.featured)
            .collect()
    }

    /// Resolve a project's related slugs, in authored order. Slugs with no
    /// matching project are left out.
    pub fn related_projects(&self, project: &Entry<ProjectRecord>) -> Vec<&Entry<ProjectRecord>> {
        let Some(related) = &project.data.related_projects else {
            return Vec::new();
        };

        related
            .iter()
            .filter_map(|slug| {
                let found = self.project(slug.as_str());
                if found.is_none() {
                    debug!(project = %project.slug, related = %slug, "related project not found");
                }
                found
            })
            .collect()
    }

    /// Journey entries, newest first.
    pub fn journey_timeline(&self) -> Vec<&Entry<JourneyEntry>> {
        let mut entries: Vec<_> = self.journey.iter().collect();
        entries.sort_by(|a, b| b.data.date.cmp(&a.data.date).then_with(|| a.slug.cmp(&b.slug)));
        entries
    }

    /// Uses groups of a category, by `order`.
    pub fn uses_groups(&self, category: UsesCategory) -> Vec<&Entry<UsesGroup>> {
        let mut groups: Vec<_> = self
            .uses
            .iter()
            .filter(|entry| entry.data.category == category)
            .collect();
        groups.sort_by(|a, b| a.data.order.cmp(&b.data.order).then_with(|| a.slug.cmp(&b.slug)));
        groups
    }

    /// Featured testimonials, by slug.
    pub fn featured_testimonials(&self) -> Vec<&Entry<Testimonial>> {
        self.testimonials
            .iter()
            .filter(|entry| entry.data.featured)
            .collect()
    }
}

fn compare_projects(a: &ProjectRecord, b: &ProjectRecord) -> Ordering {
    let by_order = match (a.order, b.order) {
        (Some(a_order), Some(b_order)) => a_order.cmp(&b_order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_order.then_with(|| b.year.cmp(&a.year))
}
