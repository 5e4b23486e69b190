use super::names;

/// Templates compiled into the binary, keyed by file name.
pub(super) const EMBEDDED: &[(&str, &str)] = &[
    (names::SETTINGS, include_str!("../../templates/settings.xml")),
    (names::SERVER, include_str!("../../templates/servers.xml")),
    (
        names::ORACLE_SERVER,
        include_str!("../../templates/oracleServers.xml"),
    ),
    (names::MIRROR, include_str!("../../templates/mirrors.xml")),
    (names::PROXY, include_str!("../../templates/proxy.xml")),
    (
        names::REPOSITORY,
        include_str!("../../templates/repositories.xml"),
    ),
    (
        names::CUSTOM_REPOSITORIES,
        include_str!("../../templates/custom-repositories.xml"),
    ),
    (
        names::APACHE_SNAPSHOTS,
        include_str!("../../templates/apache-snapshots.xml"),
    ),
    (
        names::SONATYPE_SNAPSHOTS,
        include_str!("../../templates/sonatype-snapshots.xml"),
    ),
    (
        names::ORACLE_REPO,
        include_str!("../../templates/oracle-repo.xml"),
    ),
];

pub(super) fn lookup(name: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, text)| *text)
}
