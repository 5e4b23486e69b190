use super::record::{fill_fields, RecordKind};
use super::{container, Merger};
use crate::error::Result;
use crate::input::{keys, Inputs};
use crate::template::names;
use crate::xml::Element;

impl Merger<'_> {
    /// Append the custom repositories profile holding one `<repository>` per
    /// valid record. The profile is added whenever the input is given, even
    /// if every record is rejected and its `<repositories>` stays empty.
    /// Returns `None` when the input is absent.
    pub fn fill_repositories(&mut self, root: &mut Element, inputs: &Inputs) -> Result<Option<usize>> {
        if inputs.get(keys::REPOSITORIES).is_none() {
            return Ok(None);
        }

        let kind = RecordKind::Repository;
        let records = inputs.records(kind.input())?;
        let mut profile = self.templates.fragment(names::CUSTOM_REPOSITORIES)?;
        let mut appended = 0;
        {
            let repositories = profile.child_or_insert("repositories");
            for (position, record) in records.iter().enumerate() {
                if let Err(invalid) = kind.validate(position, record) {
                    self.reject(&invalid);
                    continue;
                }
                let mut repository = self.templates.fragment(names::REPOSITORY)?;
                fill_fields(&mut repository, record, kind.fields());
                repositories.append(repository);
                appended += 1;
            }
        }

        container(root, "profiles").append(profile);
        Ok(Some(appended))
    }
}
