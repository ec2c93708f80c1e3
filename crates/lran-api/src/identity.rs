//! # Caller Context Extraction
//!
//! The caller's organization and certificate names arrive in request
//! headers, as set by the TLS-terminating gateway in front of the service:
//!
//! | Header | Field |
//! |---|---|
//! | `x-lran-msp` | member organization id |
//! | `x-lran-issuer` | certificate issuer CN |
//! | `x-lran-subject` | certificate subject CN |
//!
//! Extraction never fails. Missing headers produce an incomplete
//! [`InvocationContext`], which the network's identity resolver rejects on
//! any operation that needs a caller.

use std::convert::Infallible;

use axum::http::request::Parts;
use axum::http::HeaderMap;
use lran_ledger::{CertificateInfo, InvocationContext};

pub const MSP_HEADER: &str = "x-lran-msp";
pub const ISSUER_HEADER: &str = "x-lran-issuer";
pub const SUBJECT_HEADER: &str = "x-lran-subject";

/// The invocation context of the current request.
#[derive(Debug, Clone)]
pub struct Invoker(pub InvocationContext);

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Build an invocation context from request headers.
pub fn context_from_headers(headers: &HeaderMap) -> InvocationContext {
    let issuer = header(headers, ISSUER_HEADER);
    let subject = header(headers, SUBJECT_HEADER);
    let certificate = match (issuer, subject) {
        (None, None) => None,
        (issuer, subject) => Some(CertificateInfo {
            issuer_cn: issuer.unwrap_or_default(),
            subject_cn: subject.unwrap_or_default(),
        }),
    };
    InvocationContext {
        msp_id: header(headers, MSP_HEADER),
        certificate,
    }
}

impl<S: Send + Sync> axum::extract::FromRequestParts<S> for Invoker {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(context_from_headers(&parts.headers)))
    }
}
