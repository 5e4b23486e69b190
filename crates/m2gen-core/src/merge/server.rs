use super::record::{fill_fields, RecordKind};
use super::{container, Merger};
use crate::error::Result;
use crate::input::{keys, Inputs, Value};
use crate::template::names;
use crate::xml::Element;

const SERVER_FIELDS: &[&str] = &[
    "id",
    "username",
    "password",
    "privateKey",
    "passphrase",
    "filePermissions",
    "directoryPermissions",
];

const GITHUB_SERVER_ID: &str = "github";
// Resolved by Maven itself from the job environment, never by us.
const GITHUB_USERNAME: &str = "${env.GITHUB_ACTOR}";
const GITHUB_PASSWORD: &str = "${env.GITHUB_TOKEN}";

impl Merger<'_> {
    /// Append one `<server>` per valid record of the `servers` or
    /// `oracleServers` input. Returns how many were appended.
    pub fn fill_servers(
        &mut self,
        root: &mut Element,
        inputs: &Inputs,
        kind: RecordKind,
    ) -> Result<usize> {
        let records = inputs.records(kind.input())?;
        let mut appended = 0;
        for (position, record) in records.iter().enumerate() {
            if self.fill_server(root, kind, position, record)? {
                appended += 1;
            }
        }
        Ok(appended)
    }

    /// Add the `github` server whose credentials are left for Maven to
    /// resolve from the environment.
    pub fn fill_github_server(&mut self, root: &mut Element, inputs: &Inputs) -> Result<bool> {
        if !inputs.is_true(keys::GITHUB_SERVER) {
            return Ok(false);
        }
        let record = Value::Object(vec![
            ("id".to_string(), Value::Scalar(GITHUB_SERVER_ID.to_string())),
            ("username".to_string(), Value::Scalar(GITHUB_USERNAME.to_string())),
            ("password".to_string(), Value::Scalar(GITHUB_PASSWORD.to_string())),
        ]);
        self.fill_server(root, RecordKind::Server, 0, &record)
    }

    fn fill_server(
        &mut self,
        root: &mut Element,
        kind: RecordKind,
        position: usize,
        record: &Value,
    ) -> Result<bool> {
        if let Err(invalid) = kind.validate(position, record) {
            self.reject(&invalid);
            return Ok(false);
        }

        let template = match kind {
            RecordKind::OracleServer => names::ORACLE_SERVER,
            _ => names::SERVER,
        };
        let mut server = self.templates.fragment(template)?;
        fill_fields(&mut server, record, SERVER_FIELDS);

        // Oracle's template ships a pre-filled configuration that must
        // survive even when the record brings none of its own.
        match record.field("configuration") {
            Some(configuration) => configuration.write_into(server.child_or_insert("configuration")),
            None => {
                if server
                    .child("configuration")
                    .is_some_and(|c| !c.has_element_children())
                {
                    server.remove_child("configuration");
                }
            }
        }

        container(root, "servers").append(server);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use crate::template::TemplateLibrary;
    use crate::xml::Document;

    fn servers_only() -> Element {
        Document::parse("<servers/>").unwrap().root
    }

    fn render(root: &Element) -> String {
        Document {
            declaration: None,
            root: root.clone(),
        }
        .to_xml_string()
        .unwrap()
    }

    #[test]
    fn no_input_leaves_servers_untouched() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();

        let count = Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &Inputs::new(), RecordKind::Server)
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(render(&root), "<servers/>\n");
    }

    #[test]
    fn one_server() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "servers",
            r#"[{"id": "id1", "username": "username1", "password":"password1"}]"#,
        );

        Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::Server)
            .unwrap();

        assert_eq!(
            render(&root),
            "<servers><server><id>id1</id><username>username1</username><password>password1</password></server></servers>\n"
        );
    }

    #[test]
    fn two_servers_keep_input_order() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "servers",
            r#"[{"id": "id1", "username": "username1", "password":"password1"},
                {"id": "id2", "username": "username2", "password":"password2"}]"#,
        );

        let count = Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::Server)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            render(&root),
            "<servers>\
             <server><id>id1</id><username>username1</username><password>password1</password></server>\
             <server><id>id2</id><username>username2</username><password>password2</password></server>\
             </servers>\n"
        );
    }

    #[test]
    fn all_optional_fields_in_template_order() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "servers",
            r#"[{"directoryPermissions": "775", "filePermissions": "664", "passphrase": "pp",
                 "privateKey": "~/.ssh/id", "password": "p", "username": "u", "id": "s"}]"#,
        );

        Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::Server)
            .unwrap();

        assert_eq!(
            render(&root),
            "<servers><server><id>s</id><username>u</username><password>p</password>\
             <privateKey>~/.ssh/id</privateKey><passphrase>pp</passphrase>\
             <filePermissions>664</filePermissions><directoryPermissions>775</directoryPermissions>\
             </server></servers>\n"
        );
    }

    #[test]
    fn configuration_only_server_is_valid() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "servers",
            r#"[{"id": "s", "configuration": {"httpHeaders": {"property": {"name": "X-Auth", "value": "t"}}}}]"#,
        );

        let count = Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::Server)
            .unwrap();

        assert_eq!(count, 1);
        assert!(reporter.errors().is_empty());
        assert_eq!(
            render(&root),
            "<servers><server><id>s</id><configuration><httpHeaders><property>\
             <name>X-Auth</name><value>t</value></property></httpHeaders></configuration>\
             </server></servers>\n"
        );
    }

    #[test]
    fn invalid_server_is_skipped_and_reported() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "servers",
            r#"[{"id": "bad", "password": "p"}, {"id": "good", "username": "u"}]"#,
        );

        let count = Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::Server)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(reporter.invalid_records.len(), 1);
        assert_eq!(reporter.invalid_records[0].kind, RecordKind::Server);
        assert_eq!(reporter.invalid_records[0].position, 0);
        assert_eq!(
            reporter.errors(),
            ["servers must contain id, and username or configuration (entry 1)"]
        );
        assert_eq!(root.elements().count(), 1);
        assert_eq!(root.find("id").unwrap().text(), "good");
    }

    #[test]
    fn oracle_server_keeps_its_configuration() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "oracleServers",
            r#"[{"id": "maven.oracle.com", "username": "u", "password": "p"}]"#,
        );

        Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::OracleServer)
            .unwrap();

        let server = root.child("server").unwrap();
        let configuration = server.child("configuration").unwrap();
        assert_eq!(
            configuration.find("realm").unwrap().text(),
            "OAM 11g"
        );
        assert!(server.child("privateKey").is_none());
    }

    #[test]
    fn oracle_server_configuration_is_extended() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "oracleServers",
            r#"[{"id": "o", "username": "u", "configuration": {"timeout": 5000}}]"#,
        );

        Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::OracleServer)
            .unwrap();

        let configuration = root.find("configuration").unwrap();
        assert!(configuration.child("basicAuthScope").is_some());
        assert_eq!(configuration.child("timeout").unwrap().text(), "5000");
    }

    #[test]
    fn github_server_uses_unexpanded_placeholders() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with("githubServer", "TRUE");

        let added = Merger::new(&templates, &mut reporter)
            .fill_github_server(&mut root, &inputs)
            .unwrap();

        assert!(added);
        assert_eq!(
            render(&root),
            "<servers><server><id>github</id><username>${env.GITHUB_ACTOR}</username>\
             <password>${env.GITHUB_TOKEN}</password></server></servers>\n"
        );
    }

    #[test]
    fn github_server_off_by_default() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();

        let added = Merger::new(&templates, &mut reporter)
            .fill_github_server(&mut root, &Inputs::new().with("githubServer", "false"))
            .unwrap();

        assert!(!added);
        assert!(!root.has_element_children());
    }

    #[test]
    fn configuration_keys_must_be_element_names() {
        let templates = TemplateLibrary::embedded();
        let mut reporter = MemoryReporter::new();
        let mut root = servers_only();
        let inputs = Inputs::new().with(
            "servers",
            r#"[{"id": "bad", "configuration": {"http headers": {"x": 1}}},
                {"id": "good", "configuration": {"timeout": 10}}]"#,
        );

        let count = Merger::new(&templates, &mut reporter)
            .fill_servers(&mut root, &inputs, RecordKind::Server)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(reporter.invalid_records.len(), 1);
        assert_eq!(reporter.invalid_records[0].invalid_names, ["http headers"]);
        assert_eq!(
            render(&root),
            "<servers><server><id>good</id><configuration><timeout>10</timeout></configuration></server></servers>\n"
        );
    }
}
