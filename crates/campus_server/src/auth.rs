//! Caller extraction with the required capability declared in the type.
//!
//! # Invariants
//! - A handler taking `Authorized<C>` never runs for a caller lacking `C`.
//! - The check happens before any query or body extraction.

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use campus_core::{authorize, AccessError, Capability, Principal};

use crate::{error::ApiError, state::AppState};

pub trait AccessLevel: Send + Sync + 'static {
    const CAPABILITY: Capability;
}

/// Read access to every resource.
pub struct UserAccess;

/// Create, update and delete access.
pub struct AdminAccess;

impl AccessLevel for UserAccess {
    const CAPABILITY: Capability = Capability::User;
}

impl AccessLevel for AdminAccess {
    const CAPABILITY: Capability = Capability::Admin;
}

/// Authenticated caller holding capability `C`.
pub struct Authorized<C: AccessLevel> {
    pub principal: Principal,
    _level: PhantomData<fn() -> C>,
}

impl<C: AccessLevel> FromRequestParts<AppState> for Authorized<C> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let caller = bearer_token(&parts.headers).and_then(|token| state.principals().resolve(token));
        authorize(caller, C::CAPABILITY)?;

        let principal = caller.cloned().ok_or(AccessError::Unauthenticated)?;
        Ok(Self {
            principal,
            _level: PhantomData,
        })
    }
}

/// Extracts the credential of a `Bearer` authorization header; the scheme is
/// matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
