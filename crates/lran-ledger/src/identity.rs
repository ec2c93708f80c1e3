//! # Invocation Identity
//!
//! An [`InvocationContext`] is what arrives with a request: the member
//! organization the client authenticated under and the subject/issuer names
//! of its client certificate. An [`IdentityResolver`] turns it into a
//! [`CallerIdentity`] or refuses.

use lran_core::{CallerIdentity, LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Client certificate names relevant to authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// Issuer common name.
    pub issuer_cn: String,
    /// Subject common name.
    pub subject_cn: String,
}

/// Raw, unauthenticated context of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Member organization (MSP) id.
    pub msp_id: Option<String>,
    /// Client certificate, if one was presented.
    pub certificate: Option<CertificateInfo>,
}

impl InvocationContext {
    /// Context for a client presenting a certificate under `msp_id`.
    pub fn new(
        msp_id: impl Into<String>,
        issuer_cn: impl Into<String>,
        subject_cn: impl Into<String>,
    ) -> Self {
        Self {
            msp_id: Some(msp_id.into()),
            certificate: Some(CertificateInfo {
                issuer_cn: issuer_cn.into(),
                subject_cn: subject_cn.into(),
            }),
        }
    }

    /// Context with no credentials at all.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Maps an invocation context to the caller's identity.
pub trait IdentityResolver: Send + Sync {
    /// Resolve `ctx`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Identity`] if the context is unauthenticated or malformed.
    fn resolve(&self, ctx: &InvocationContext) -> LedgerResult<CallerIdentity>;
}

/// Resolver that reads the identity straight from the certificate context.
///
/// Rejects contexts with no MSP id, no certificate, or blank names.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateResolver;

impl IdentityResolver for CertificateResolver {
    fn resolve(&self, ctx: &InvocationContext) -> LedgerResult<CallerIdentity> {
        let org = ctx
            .msp_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| LedgerError::Identity("invocation carries no MSP id".into()))?;
        let cert = ctx
            .certificate
            .as_ref()
            .ok_or_else(|| LedgerError::Identity("invocation carries no client certificate".into()))?;
        if cert.issuer_cn.trim().is_empty() {
            return Err(LedgerError::Identity("certificate has no issuer common name".into()));
        }
        if cert.subject_cn.trim().is_empty() {
            return Err(LedgerError::Identity("certificate has no subject common name".into()));
        }
        Ok(CallerIdentity::new(org, &cert.issuer_cn, &cert.subject_cn))
    }
}
