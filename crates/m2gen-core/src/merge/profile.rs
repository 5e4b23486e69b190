use super::record::RecordKind;
use super::{container, Merger};
use crate::error::Result;
use crate::input::value::append_field;
use crate::input::{keys, Inputs, Value};
use crate::template::names;
use crate::xml::Element;

/// Id of the skeleton profile that carries the `properties` input.
pub const PROPERTIES_PROFILE_ID: &str = "_properties_";

/// Static repository profiles switched on by a boolean input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedProfile {
    ApacheSnapshots,
    SonatypeSnapshots,
    OracleRepo,
}

impl FixedProfile {
    pub const ALL: [FixedProfile; 3] = [
        FixedProfile::ApacheSnapshots,
        FixedProfile::SonatypeSnapshots,
        FixedProfile::OracleRepo,
    ];

    pub fn input(self) -> &'static str {
        match self {
            FixedProfile::ApacheSnapshots => keys::APACHE_SNAPSHOTS,
            FixedProfile::SonatypeSnapshots => keys::SONATYPE_SNAPSHOTS,
            FixedProfile::OracleRepo => keys::ORACLE_REPO,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            FixedProfile::ApacheSnapshots => names::APACHE_SNAPSHOTS,
            FixedProfile::SonatypeSnapshots => names::SONATYPE_SNAPSHOTS,
            FixedProfile::OracleRepo => names::ORACLE_REPO,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            FixedProfile::ApacheSnapshots => "_apache-snapshots_",
            FixedProfile::SonatypeSnapshots => "_sonatype-snapshots_",
            FixedProfile::OracleRepo => "_oracle-repo_",
        }
    }
}

/// The `<profile>` under the first `<profiles>` whose `<id>` text is `id`.
pub fn find_profile<'e>(root: &'e Element, id: &str) -> Option<&'e Element> {
    root.find("profiles")?
        .elements()
        .filter(|el| el.name == "profile")
        .find(|profile| has_id(profile, id))
}

pub fn find_profile_mut<'e>(root: &'e mut Element, id: &str) -> Option<&'e mut Element> {
    root.find_mut("profiles")?
        .elements_mut()
        .filter(|el| el.name == "profile")
        .find(|profile| has_id(profile, id))
}

fn has_id(profile: &Element, id: &str) -> bool {
    profile.child("id").is_some_and(|el| el.text() == id)
}

/// Set `activation/activeByDefault` of the profile to `true`. Returns false,
/// changing nothing, when no profile has that id.
pub fn activate_profile(root: &mut Element, id: &str) -> bool {
    let Some(profile) = find_profile_mut(root, id) else {
        return false;
    };
    profile
        .child_or_insert("activation")
        .child_or_insert("activeByDefault")
        .set_text("true");
    true
}

impl Merger<'_> {
    /// Put every `name: value` pair of the `properties` input under the
    /// `_properties_` profile and activate it.
    pub fn fill_properties(&mut self, root: &mut Element, inputs: &Inputs) -> Result<usize> {
        let kind = RecordKind::Property;
        let mut collected = Element::new("properties");
        for (position, record) in inputs.records(kind.input())?.iter().enumerate() {
            if let Err(invalid) = kind.validate(position, record) {
                self.reject(&invalid);
                continue;
            }
            if let Value::Object(pairs) = record {
                for (name, value) in pairs {
                    append_field(&mut collected, name, value);
                }
            }
        }

        let count = collected.elements().count();
        if count == 0 {
            return Ok(0);
        }
        let Some(profile) = find_profile_mut(root, PROPERTIES_PROFILE_ID) else {
            return Ok(0);
        };
        profile
            .child_or_insert("properties")
            .children
            .extend(collected.children);
        activate_profile(root, PROPERTIES_PROFILE_ID);
        Ok(count)
    }

    /// Switch a fixed profile on: activate it when the document already
    /// declares it, append it from its template otherwise.
    pub fn enable_profile(
        &mut self,
        root: &mut Element,
        inputs: &Inputs,
        profile: FixedProfile,
    ) -> Result<bool> {
        if !inputs.is_true(profile.input()) {
            return Ok(false);
        }
        if activate_profile(root, profile.id()) {
            return Ok(true);
        }
        let fragment = self.templates.fragment(profile.template())?;
        container(root, "profiles").append(fragment);
        Ok(true)
    }
}
