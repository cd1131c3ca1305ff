//! Runtime configuration for the HTTP server.

use std::net::SocketAddr;

/// Route group a process serves.
///
/// Deployments run authentication, quote reads, and quote modification as
/// separate processes sharing one store. One binary covers all three; this
/// selects which group of routes a given instance mounts. Health probes are
/// mounted regardless of the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ServiceGroup {
    /// Login and the protected user listing.
    Auth,
    /// Quote listing and search.
    Quotes,
    /// Quote creation, update, and deletion.
    Modification,
    /// Every route group in one process.
    All,
}

impl ServiceGroup {
    /// Whether this instance mounts the routes of `group`.
    #[must_use]
    pub fn serves(self, group: Self) -> bool {
        self == Self::All || self == group
    }
}

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) service: ServiceGroup,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Configuration for a process serving `service` on `bind_addr`.
    #[must_use]
    pub fn new(service: ServiceGroup, bind_addr: SocketAddr) -> Self {
        Self { service, bind_addr }
    }

    /// The socket address the server will bind to.
    #[must_use]
    #[rustfmt::skip]
    pub fn bind_addr(&self) -> SocketAddr { self.bind_addr }

    /// The route group this instance serves.
    #[must_use]
    #[rustfmt::skip]
    pub fn service(&self) -> ServiceGroup { self.service }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use clap::ValueEnum;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ServiceGroup::All, ServiceGroup::Auth, true)]
    #[case(ServiceGroup::All, ServiceGroup::Quotes, true)]
    #[case(ServiceGroup::All, ServiceGroup::Modification, true)]
    #[case(ServiceGroup::Auth, ServiceGroup::Auth, true)]
    #[case(ServiceGroup::Auth, ServiceGroup::Quotes, false)]
    #[case(ServiceGroup::Quotes, ServiceGroup::Modification, false)]
    #[case(ServiceGroup::Modification, ServiceGroup::Modification, true)]
    fn serves_gates_on_the_selected_group(
        #[case] selected: ServiceGroup,
        #[case] group: ServiceGroup,
        #[case] expected: bool,
    ) {
        assert_eq!(selected.serves(group), expected);
    }

    #[rstest]
    #[case("auth", ServiceGroup::Auth)]
    #[case("quotes", ServiceGroup::Quotes)]
    #[case("modification", ServiceGroup::Modification)]
    #[case("all", ServiceGroup::All)]
    fn cli_names_parse_to_their_group(#[case] name: &str, #[case] expected: ServiceGroup) {
        assert_eq!(
            ServiceGroup::from_str(name, false).expect("known value"),
            expected
        );
    }
}
