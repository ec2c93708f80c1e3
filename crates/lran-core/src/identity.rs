//! # Caller Identity and Roles
//!
//! A [`CallerIdentity`] is what the identity resolver extracts from an
//! invocation: the member organization, the common name of the certificate
//! issuer, and the common name of the certificate subject. The first two
//! decide authorization; the subject is recorded as the acting party in
//! history and status entries.
//!
//! Identities are passed explicitly to every registry operation, including
//! chained calls, so a downstream check is always evaluated against the
//! caller of the top-level operation.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// The four roles recognized by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Initiates transfer requests.
    Citizen,
    /// Legal representative; first custodian of a request.
    Lawyer,
    /// Registry clerk; second custodian.
    RegistryOfficer,
    /// Issuing land-records authority; approves requests and owns parcels.
    Authority,
}

impl Role {
    /// Every role, in custody order.
    pub const ALL: [Role; 4] = [
        Role::Citizen,
        Role::Lawyer,
        Role::RegistryOfficer,
        Role::Authority,
    ];

    /// The role that hands work off to this role.
    ///
    /// Only the upstream role may register a case on a party of this role,
    /// which encodes chain of custody. `Citizen` has no upstream.
    pub fn handoff_from(&self) -> Option<Role> {
        match self {
            Self::Citizen => None,
            Self::Lawyer => Some(Self::Citizen),
            Self::RegistryOfficer => Some(Self::Lawyer),
            Self::Authority => Some(Self::RegistryOfficer),
        }
    }

    /// Stable name used in configuration files and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "Citizen",
            Self::Lawyer => "Lawyer",
            Self::RegistryOfficer => "RegistryOfficer",
            Self::Authority => "Authority",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LedgerError::Argument(format!("unknown role: {s:?}")))
    }
}

/// Resolved identity of the party invoking an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Member organization id (MSP id).
    pub org: String,
    /// Common name of the certificate issuer.
    pub issuer: String,
    /// Common name of the certificate subject.
    pub subject: String,
}

impl CallerIdentity {
    /// Build an identity from its three parts.
    pub fn new(
        org: impl Into<String>,
        issuer: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            issuer: issuer.into(),
            subject: subject.into(),
        }
    }
}

impl std::fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}/{}", self.subject, self.org, self.issuer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_chain_runs_citizen_to_authority() {
        assert_eq!(Role::Lawyer.handoff_from(), Some(Role::Citizen));
        assert_eq!(Role::RegistryOfficer.handoff_from(), Some(Role::Lawyer));
        assert_eq!(Role::Authority.handoff_from(), Some(Role::RegistryOfficer));
        assert_eq!(Role::Citizen.handoff_from(), None);
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("authority".parse::<Role>().unwrap(), Role::Authority);
        assert_eq!("RegistryOfficer".parse::<Role>().unwrap(), Role::RegistryOfficer);
        assert!("clerk".parse::<Role>().is_err());
    }

    #[test]
    fn identity_display() {
        let id = CallerIdentity::new("LawyerMSP", "ca.lawyer.lran.com", "LW1");
        assert_eq!(id.to_string(), "LW1@LawyerMSP/ca.lawyer.lran.com");
    }
}
