use std::fmt;

use crate::input::value::{append_field, field_elements};
use crate::input::{keys, Value};
use crate::xml::Element;

/// The kinds of input record that are validated before insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Server,
    OracleServer,
    Mirror,
    Proxy,
    Property,
    Repository,
}

impl RecordKind {
    /// Name of the input the records come from.
    pub fn input(self) -> &'static str {
        match self {
            RecordKind::Server => keys::SERVERS,
            RecordKind::OracleServer => keys::ORACLE_SERVERS,
            RecordKind::Mirror => keys::MIRRORS,
            RecordKind::Proxy => keys::PROXIES,
            RecordKind::Property => keys::PROPERTIES,
            RecordKind::Repository => keys::REPOSITORIES,
        }
    }

    pub fn requirement(self) -> &'static str {
        match self {
            RecordKind::Server | RecordKind::OracleServer => "id, and username or configuration",
            RecordKind::Mirror => "id, name, mirrorOf and url",
            RecordKind::Proxy => "id, active, protocol, host, port and nonProxyHosts",
            RecordKind::Property => "name: value pairs",
            RecordKind::Repository => "id and url",
        }
    }

    /// Fields copied from a record into its element. Property records are
    /// free-form, so every key is written.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::Server | RecordKind::OracleServer => &[
                "id",
                "username",
                "password",
                "privateKey",
                "passphrase",
                "filePermissions",
                "directoryPermissions",
                "configuration",
            ],
            RecordKind::Mirror => &["id", "name", "mirrorOf", "url"],
            RecordKind::Proxy => &["id", "active", "protocol", "host", "port", "nonProxyHosts"],
            RecordKind::Property => &[],
            RecordKind::Repository => &["id", "name", "url", "layout", "releases", "snapshots"],
        }
    }

    /// Keys of the record that would end up as element names but are not
    /// valid ones.
    pub fn invalid_names(self, record: &Value) -> Vec<String> {
        match self {
            RecordKind::Property => record.invalid_names(),
            _ => self
                .fields()
                .iter()
                .filter_map(|field| record.field(field))
                .flat_map(Value::invalid_names)
                .collect(),
        }
    }

    /// Check a record and list what is missing. An empty list means valid.
    pub fn missing_fields(self, record: &Value) -> Vec<&'static str> {
        match self {
            RecordKind::Server | RecordKind::OracleServer => {
                let mut missing = missing_of(record, &["id"]);
                if record.field("username").is_none() && record.field("configuration").is_none() {
                    missing.push("username or configuration");
                }
                missing
            }
            RecordKind::Mirror => missing_of(record, &["id", "name", "mirrorOf", "url"]),
            RecordKind::Proxy => missing_of(
                record,
                &["id", "active", "protocol", "host", "port", "nonProxyHosts"],
            ),
            RecordKind::Property => match record {
                Value::Object(entries) if !entries.is_empty() => Vec::new(),
                _ => vec!["name: value pairs"],
            },
            RecordKind::Repository => missing_of(record, &["id", "url"]),
        }
    }

    /// Validate, producing the error to report when the record is rejected.
    pub fn validate(self, position: usize, record: &Value) -> Result<(), InvalidRecord> {
        let missing = self.missing_fields(record);
        let invalid_names = self.invalid_names(record);
        if missing.is_empty() && invalid_names.is_empty() {
            Ok(())
        } else {
            Err(InvalidRecord {
                kind: self,
                position,
                missing,
                invalid_names,
            })
        }
    }
}

fn missing_of(record: &Value, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| record.field(field).is_none())
        .collect()
}

/// A rejected input record. Reported, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRecord {
    pub kind: RecordKind,
    /// Zero-based index of the record in its input array.
    pub position: usize,
    pub missing: Vec<&'static str>,
    /// Keys that cannot be used as element names.
    pub invalid_names: Vec<String>,
}

impl fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.missing.is_empty() {
            return write!(
                f,
                "{} must contain {} (entry {})",
                self.kind.input(),
                self.kind.requirement(),
                self.position + 1
            );
        }
        let names: Vec<String> = self.invalid_names.iter().map(|n| format!("{n:?}")).collect();
        write!(
            f,
            "{} keys must be valid XML element names, got {} (entry {})",
            self.kind.input(),
            names.join(", "),
            self.position + 1
        )
    }
}

impl std::error::Error for InvalidRecord {}

/// Copy `fields` from `record` into `fragment`. Present fields take the
/// place of the fragment's placeholder element, one element per list item
/// (or are appended when the template has none); absent fields have their
/// placeholder removed.
pub(crate) fn fill_fields(fragment: &mut Element, record: &Value, fields: &[&str]) {
    for &field in fields {
        match record.field(field) {
            Some(value) => {
                if !fragment.replace_child(field, field_elements(field, value)) {
                    append_field(fragment, field, value);
                }
            }
            None => {
                fragment.remove_child(field);
            }
        }
    }
}
