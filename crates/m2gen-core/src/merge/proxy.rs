use super::record::{fill_fields, RecordKind};
use super::{container, Merger};
use crate::error::Result;
use crate::input::Inputs;
use crate::template::names;
use crate::xml::Element;

impl Merger<'_> {
    pub fn fill_proxies(&mut self, root: &mut Element, inputs: &Inputs) -> Result<usize> {
        let kind = RecordKind::Proxy;
        let mut appended = 0;
        for (position, record) in inputs.records(kind.input())?.iter().enumerate() {
            if let Err(invalid) = kind.validate(position, record) {
                self.reject(&invalid);
                continue;
            }
            let mut proxy = self.templates.fragment(names::PROXY)?;
            fill_fields(&mut proxy, record, kind.fields());
            container(root, "proxies").append(proxy);
            appended += 1;
        }
        Ok(appended)
    }
}
