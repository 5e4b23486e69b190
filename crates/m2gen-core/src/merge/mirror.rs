use super::record::{fill_fields, RecordKind};
use super::{container, Merger};
use crate::error::Result;
use crate::input::Inputs;
use crate::template::names;
use crate::xml::Element;

impl Merger<'_> {
    pub fn fill_mirrors(&mut self, root: &mut Element, inputs: &Inputs) -> Result<usize> {
        let kind = RecordKind::Mirror;
        let mut appended = 0;
        for (position, record) in inputs.records(kind.input())?.iter().enumerate() {
            if let Err(invalid) = kind.validate(position, record) {
                self.reject(&invalid);
                continue;
            }
            let mut mirror = self.templates.fragment(names::MIRROR)?;
            fill_fields(&mut mirror, record, kind.fields());
            container(root, "mirrors").append(mirror);
            appended += 1;
        }
        Ok(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use crate::template::TemplateLibrary;
    use crate::xml::Document;

    #[test]
    fn mirrors_are_appended_in_order() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = Document::parse("<settings><mirrors/></settings>").unwrap().root;
        let inputs = Inputs::new().with(
            "mirrors",
            r#"[{"id": "m1", "name": "Mirror 1", "mirrorOf": "central", "url": "https://m1"},
                {"id": "m2", "name": "Mirror 2", "mirrorOf": "*", "url": "https://m2"}]"#,
        );

        let count = Merger::new(&templates, &mut reporter)
            .fill_mirrors(&mut root, &inputs)
            .unwrap();

        assert_eq!(count, 2);
        let out = Document {
            declaration: None,
            root,
        }
        .to_xml_string()
        .unwrap();
        assert_eq!(
            out,
            "<settings><mirrors>\
             <mirror><id>m1</id><name>Mirror 1</name><mirrorOf>central</mirrorOf><url>https://m1</url></mirror>\
             <mirror><id>m2</id><name>Mirror 2</name><mirrorOf>*</mirrorOf><url>https://m2</url></mirror>\
             </mirrors></settings>\n"
        );
    }

    #[test]
    fn mirror_missing_url_is_rejected() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = Document::parse("<settings><mirrors/></settings>").unwrap().root;
        let inputs = Inputs::new().with(
            "mirrors",
            r#"[{"id": "m1", "name": "Mirror 1", "mirrorOf": "central"}]"#,
        );

        let count = Merger::new(&templates, &mut reporter)
            .fill_mirrors(&mut root, &inputs)
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(reporter.invalid_records.len(), 1);
        assert_eq!(reporter.invalid_records[0].missing, ["url"]);
        assert!(!root.child("mirrors").unwrap().has_element_children());
    }

    #[test]
    fn missing_container_is_created() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = Document::parse("<settings/>").unwrap().root;
        let inputs = Inputs::new().with(
            "mirrors",
            r#"[{"id": "m", "name": "n", "mirrorOf": "*", "url": "u"}]"#,
        );

        Merger::new(&templates, &mut reporter)
            .fill_mirrors(&mut root, &inputs)
            .unwrap();

        assert_eq!(root.child("mirrors").unwrap().elements().count(), 1);
    }
}
