mod embedded;

use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::{M2genError, Result};
use crate::xml::{Document, Element};

/// File names of the skeleton and the fragment templates.
pub mod names {
    pub const SETTINGS: &str = "settings.xml";
    pub const SERVER: &str = "servers.xml";
    pub const ORACLE_SERVER: &str = "oracleServers.xml";
    pub const MIRROR: &str = "mirrors.xml";
    pub const PROXY: &str = "proxy.xml";
    pub const REPOSITORY: &str = "repositories.xml";
    pub const CUSTOM_REPOSITORIES: &str = "custom-repositories.xml";
    pub const APACHE_SNAPSHOTS: &str = "apache-snapshots.xml";
    pub const SONATYPE_SNAPSHOTS: &str = "sonatype-snapshots.xml";
    pub const ORACLE_REPO: &str = "oracle-repo.xml";
}

/// Where template text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The templates built into the binary.
    Embedded,
    /// A directory holding files with the same names as the built-in set.
    Directory(PathBuf),
}

/// Loads the skeleton and fragments by name. Every call parses a fresh tree,
/// so callers may mutate what they get back.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    source: TemplateSource,
}

impl TemplateLibrary {
    pub fn embedded() -> Self {
        Self {
            source: TemplateSource::Embedded,
        }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: TemplateSource::Directory(dir.into()),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Raw text of a template.
    pub fn text(&self, name: &str) -> Result<Cow<'static, str>> {
        match &self.source {
            TemplateSource::Embedded => embedded::lookup(name)
                .map(Cow::Borrowed)
                .ok_or_else(|| M2genError::TemplateNotFound {
                    name: name.to_string(),
                }),
            TemplateSource::Directory(dir) => {
                let path = dir.join(name);
                if !path.is_file() {
                    return Err(M2genError::TemplateNotFound {
                        name: path.display().to_string(),
                    });
                }
                let content = std::fs::read_to_string(&path).map_err(|e| M2genError::Io {
                    context: format!("reading template {}", path.display()),
                    source: e,
                })?;
                Ok(Cow::Owned(content))
            }
        }
    }

    /// Parse a template into a full document (used for the skeleton).
    pub fn load(&self, name: &str) -> Result<Document> {
        let text = self.text(name)?;
        Document::parse(&text).map_err(|e| M2genError::TemplateParse {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a fragment template and hand back its root element.
    pub fn fragment(&self, name: &str) -> Result<Element> {
        self.load(name).map(|doc| doc.root)
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::embedded()
    }
}
