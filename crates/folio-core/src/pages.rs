//! Page metadata registry.
//!
//! Every static page of the site has a fixed SEO record. The set of pages is
//! closed: [`PageId`] enumerates it and [`lookup`] is total over it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of a static page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    Projects,
    Journey,
    Uses,
    Contact,
}

/// SEO metadata for a static page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Document title.
    pub title: &'static str,

    /// Meta description.
    pub description: &'static str,

    /// Visible page heading. Renderers fall back to `title` when absent.
    pub heading: Option<&'static str>,

    /// Lead paragraph shown under the heading.
    pub intro: Option<&'static str>,
}

impl PageMeta {
    /// Heading to render, falling back to the title.
    pub fn heading_or_title(&self) -> &'static str {
        self.heading.unwrap_or(self.title)
    }
}

// Indexed by `PageId as usize`.
static PAGES: [PageMeta; 5] = [
    PageMeta {
        title: "Home",
        description: "Software engineer building reliable systems and the tools around them.",
        heading: Some("Hi, I build dependable software."),
        intro: Some(
            "Backend and platform work, from data pipelines to developer tooling. \
             Here are the projects, the path that led to them, and the gear I use.",
        ),
    },
    PageMeta {
        title: "Projects",
        description: "Case studies covering the problem, constraints, approach and measured impact of selected work.",
        heading: Some("Selected Projects"),
        intro: Some("Each case study walks through what was hard, what I tried and what changed as a result."),
    },
    PageMeta {
        title: "Journey",
        description: "Milestones, lessons and transitions along my path as an engineer.",
        heading: Some("The Journey So Far"),
        intro: None,
    },
    PageMeta {
        title: "Uses",
        description: "The tools, hardware and technology stack I rely on day to day.",
        heading: Some("What I Use"),
        intro: Some("A living list of the editors, utilities and stack choices behind my work."),
    },
    PageMeta {
        title: "Contact",
        description: "Get in touch about roles, collaborations or speaking.",
        heading: None,
        intro: Some("The fastest way to reach me is email. I read everything."),
    },
];

impl PageId {
    /// All pages, in navigation order.
    pub const ALL: [PageId; 5] = [
        PageId::Home,
        PageId::Projects,
        PageId::Journey,
        PageId::Uses,
        PageId::Contact,
    ];

    /// Identifier as used in routes and templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Projects => "projects",
            Self::Journey => "journey",
            Self::Uses => "uses",
            Self::Contact => "contact",
        }
    }

    /// Route path of the page.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Projects => "/projects",
            Self::Journey => "/journey",
            Self::Uses => "/uses",
            Self::Contact => "/contact",
        }
    }

    /// Metadata record of the page.
    pub fn meta(self) -> &'static PageMeta {
        lookup(self)
    }
}

/// Look up the metadata of a page.
pub fn lookup(page: PageId) -> &'static PageMeta {
    &PAGES[page as usize]
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPage(s.to_string()))
    }
}
