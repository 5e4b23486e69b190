//! The template-merge engine: fills the settings skeleton from the run's
//! inputs, one section at a time.

pub mod mirror;
pub mod profile;
pub mod proxy;
pub mod record;
pub mod repository;
pub mod server;

use std::fmt;

use crate::error::Result;
use crate::input::Inputs;
use crate::report::Reporter;
use crate::template::{names, TemplateLibrary};
use crate::xml::{Document, Element};

pub use profile::{activate_profile, find_profile, find_profile_mut, FixedProfile};
pub use record::{InvalidRecord, RecordKind};

/// Counts of what a merge put into the document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub proxies: usize,
    pub mirrors: usize,
    pub servers: usize,
    pub properties: usize,
    pub profiles: Vec<&'static str>,
    /// `None` when no repositories input was given.
    pub repositories: Option<usize>,
    pub rejected: usize,
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} servers, {} mirrors, {} proxies, {} properties, {} repositories",
            self.servers,
            self.mirrors,
            self.proxies,
            self.properties,
            self.repositories.unwrap_or(0)
        )?;
        if !self.profiles.is_empty() {
            write!(f, ", profiles: {}", self.profiles.join(" "))?;
        }
        if self.rejected > 0 {
            write!(f, " ({} rejected)", self.rejected)?;
        }
        Ok(())
    }
}

pub struct MergedSettings {
    pub document: Document,
    pub summary: MergeSummary,
}

/// Holds what every section needs: where templates come from and where
/// rejected records are reported.
pub struct Merger<'a> {
    templates: &'a TemplateLibrary,
    reporter: &'a mut dyn Reporter,
    rejected: usize,
}

impl<'a> Merger<'a> {
    pub fn new(templates: &'a TemplateLibrary, reporter: &'a mut dyn Reporter) -> Self {
        Self {
            templates,
            reporter,
            rejected: 0,
        }
    }

    /// Number of records rejected so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    fn reject(&mut self, invalid: &InvalidRecord) {
        self.rejected += 1;
        self.reporter.invalid_record(invalid);
    }

    /// Load the skeleton and fill every section in order: proxies, mirrors,
    /// servers, oracle servers, the github server, properties, the fixed
    /// profiles and finally custom repositories.
    pub fn merge(&mut self, inputs: &Inputs) -> Result<MergedSettings> {
        let mut document = self.templates.load(names::SETTINGS)?;
        let root = &mut document.root;
        let mut summary = MergeSummary {
            proxies: self.fill_proxies(root, inputs)?,
            mirrors: self.fill_mirrors(root, inputs)?,
            servers: self.fill_servers(root, inputs, RecordKind::Server)?,
            ..MergeSummary::default()
        };
        summary.servers += self.fill_servers(root, inputs, RecordKind::OracleServer)?;
        if self.fill_github_server(root, inputs)? {
            summary.servers += 1;
        }

        summary.properties = self.fill_properties(root, inputs)?;
        if summary.properties > 0 {
            summary.profiles.push(profile::PROPERTIES_PROFILE_ID);
        }
        for fixed in FixedProfile::ALL {
            if self.enable_profile(root, inputs, fixed)? {
                summary.profiles.push(fixed.id());
            }
        }

        summary.repositories = self.fill_repositories(root, inputs)?;
        summary.rejected = self.rejected;

        Ok(MergedSettings { document, summary })
    }
}

/// Build the settings document for `inputs`.
pub fn build_settings(
    templates: &TemplateLibrary,
    inputs: &Inputs,
    reporter: &mut dyn Reporter,
) -> Result<MergedSettings> {
    Merger::new(templates, reporter).merge(inputs)
}

/// The first element called `name` in the document, created directly under
/// the root when the skeleton lacks it.
pub(crate) fn container<'e>(root: &'e mut Element, name: &str) -> &'e mut Element {
    if root.find(name).is_some() {
        return root.find_mut(name).expect("container was just found");
    }
    root.child_or_insert(name)
}
