//! Project case study schema.

use folio_core::{ContentKind, Slug};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    Schema,
    fields::{Choice, Fields, Mismatch, absolute_url, boolean, choice, count, integer, text},
    report::{FieldPath, Report, ValidationError},
};

const KNOWN_FIELDS: &[&str] = &[
    "title",
    "role",
    "year",
    "duration",
    "teamSize",
    "outcomeSummary",
    "overview",
    "problem",
    "constraints",
    "approach",
    "techStack",
    "impact",
    "learnings",
    "featured",
    "status",
    "order",
    "relatedProjects",
    "githubUrl",
];

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Completed,
    Ongoing,
    Archived,
}

impl Choice for ProjectStatus {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("completed", Self::Completed),
        ("ongoing", Self::Ongoing),
        ("archived", Self::Archived),
    ];
}

/// A labelled measurement of a project's impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// Outcome of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Impact {
    /// Narrative description of the outcome.
    pub qualitative: String,

    /// Headline numbers, in display order.
    pub metrics: Option<Vec<Metric>>,
}

/// A validated project case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub role: String,
    pub year: i32,
    pub duration: Option<String>,
    pub team_size: Option<u32>,
    /// One-line result shown on project cards.
    pub outcome_summary: String,
    pub overview: String,
    pub problem: String,
    pub constraints: Vec<String>,
    pub approach: String,
    pub tech_stack: Vec<String>,
    pub impact: Impact,
    pub learnings: Vec<String>,
    pub featured: bool,
    pub status: ProjectStatus,
    /// Manual sort position on the projects page.
    pub order: Option<i32>,
    /// Slugs of other projects. Not checked against the collection.
    pub related_projects: Option<Vec<Slug>>,
    pub github_url: Option<Url>,
}

fn slug(value: &Value) -> Result<Slug, Mismatch> {
    text(value).map(Slug::new)
}

fn check_metric(fields: Fields<'_>, report: &mut Report) -> Option<Metric> {
    let label = fields.required("label", "string", text, report);
    let value = fields.required("value", "string", text, report);
    Some(Metric {
        label: label?,
        value: value?,
    })
}

fn check_impact(fields: Fields<'_>, report: &mut Report) -> Option<Impact> {
    let qualitative = fields.required("qualitative", "string", text, report);
    let metrics = fields.optional_objects("metrics", report, check_metric);
    Some(Impact {
        qualitative: qualitative?,
        metrics,
    })
}

impl Schema for ProjectRecord {
    const KIND: ContentKind = ContentKind::Projects;

    fn validate(raw: &Value) -> Result<Self, ValidationError> {
        let root = FieldPath::root();
        let mut report = Report::default();
        let Some(fields) = Fields::object(raw, &root, &mut report) else {
            return Err(report.into_error());
        };
        fields.note_unknown(KNOWN_FIELDS);

        let r = &mut report;
        let title = fields.required("title", "string", text, r);
        let role = fields.required("role", "string", text, r);
        let year = fields.required("year", "integer", integer, r);
        let duration = fields.optional("duration", text, r);
        let team_size = fields.optional("teamSize", count, r);
        let outcome_summary = fields.required("outcomeSummary", "string", text, r);
        let overview = fields.required("overview", "string", text, r);
        let problem = fields.required("problem", "string", text, r);
        let constraints = fields.required_list("constraints", "string", text, r);
        let approach = fields.required("approach", "string", text, r);
        let tech_stack = fields.required_list("techStack", "string", text, r);
        let impact = fields.required_object("impact", r, check_impact);
        let learnings = fields.required_list("learnings", "string", text, r);
        let featured = fields.defaulted("featured", boolean, false, r);
        let status = fields.defaulted(
            "status",
            choice::<ProjectStatus>,
            ProjectStatus::default(),
            r,
        );
        let order = fields.optional("order", integer, r);
        let related_projects = fields.optional_list("relatedProjects", "slug string", slug, r);
        let github_url = fields.optional("githubUrl", absolute_url, r);

        match (
            title,
            role,
            year,
            outcome_summary,
            overview,
            problem,
            constraints,
            approach,
            tech_stack,
            impact,
            learnings,
        ) {
            (
                Some(title),
                Some(role),
                Some(year),
                Some(outcome_summary),
                Some(overview),
                Some(problem),
                Some(constraints),
                Some(approach),
                Some(tech_stack),
                Some(impact),
                Some(learnings),
            ) if report.is_clean() => Ok(Self {
                title,
                role,
                year,
                duration,
                team_size,
                outcome_summary,
                overview,
                problem,
                constraints,
                approach,
                tech_stack,
                impact,
                learnings,
                featured,
                status,
                order,
                related_projects,
                github_url,
            }),
            _ => Err(report.into_error()),
        }
    }
}
