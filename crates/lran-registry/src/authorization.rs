//! # Authorization Gate
//!
//! Each role is bound to exactly one (organization, certificate issuer) pair.
//! A caller acts in a role only if it presents that exact pair; there is no
//! role hierarchy. The binding is a [`RoleTable`], loaded once at startup
//! and consulted by a single [`AuthorizationGate`].
//!
//! Read-only operations never call the gate.

use std::sync::Arc;

use lran_core::{CallerIdentity, LedgerError, LedgerResult, Role};
use serde::{Deserialize, Serialize};

/// The credential pair a role must present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCredential {
    /// Member organization (MSP) id.
    pub org: String,
    /// Certificate issuer common name.
    pub issuer: String,
}

impl RoleCredential {
    /// Build a credential pair.
    pub fn new(org: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            issuer: issuer.into(),
        }
    }
}

/// Role → credential binding. Every role must be bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RoleTable {
    citizen: RoleCredential,
    lawyer: RoleCredential,
    registry_officer: RoleCredential,
    authority: RoleCredential,
}

impl RoleTable {
    /// The credential bound to `role`.
    pub fn credential(&self, role: Role) -> &RoleCredential {
        match role {
            Role::Citizen => &self.citizen,
            Role::Lawyer => &self.lawyer,
            Role::RegistryOfficer => &self.registry_officer,
            Role::Authority => &self.authority,
        }
    }

    /// Rebind `role` to `credential`.
    pub fn with(mut self, role: Role, credential: RoleCredential) -> Self {
        let slot = match role {
            Role::Citizen => &mut self.citizen,
            Role::Lawyer => &mut self.lawyer,
            Role::RegistryOfficer => &mut self.registry_officer,
            Role::Authority => &mut self.authority,
        };
        *slot = credential;
        self
    }

    /// Iterate `(role, credential)` in custody order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &RoleCredential)> {
        Role::ALL.into_iter().map(move |r| (r, self.credential(r)))
    }
}

impl Default for RoleTable {
    /// The bindings of the production network.
    fn default() -> Self {
        Self {
            citizen: RoleCredential::new("CitizenMSP", "ca.citizen.lran.com"),
            lawyer: RoleCredential::new("LawyerMSP", "ca.lawyer.lran.com"),
            registry_officer: RoleCredential::new("RegistryOfficeMSP", "ca.registryoffice.lran.com"),
            authority: RoleCredential::new("BLROMSP", "ca.blro.lran.com"),
        }
    }
}

/// Checks callers against the role table. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    table: Arc<RoleTable>,
}

impl AuthorizationGate {
    /// Gate over `table`.
    pub fn new(table: RoleTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// The table this gate consults.
    pub fn table(&self) -> &RoleTable {
        &self.table
    }

    /// Whether `(org, issuer)` is exactly the pair bound to `required`.
    pub fn authorize(&self, required: Role, org: &str, issuer: &str) -> bool {
        let cred = self.table.credential(required);
        cred.org == org && cred.issuer == issuer
    }

    /// Fail with [`LedgerError::AccessDenied`] unless `caller` acts as `required`.
    pub fn require(&self, required: Role, caller: &CallerIdentity) -> LedgerResult<()> {
        if self.authorize(required, &caller.org, &caller.issuer) {
            return Ok(());
        }
        tracing::warn!(
            required = %required,
            org = %caller.org,
            issuer = %caller.issuer,
            subject = %caller.subject,
            "access denied"
        );
        Err(LedgerError::AccessDenied {
            required: required.to_string(),
            org: caller.org.clone(),
            issuer: caller.issuer.clone(),
        })
    }

    /// The role `caller` acts as, if any.
    pub fn role_of(&self, caller: &CallerIdentity) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|r| self.authorize(*r, &caller.org, &caller.issuer))
    }
}

impl Default for AuthorizationGate {
    fn default() -> Self {
        Self::new(RoleTable::default())
    }
}
