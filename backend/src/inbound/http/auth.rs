//! HTTP Basic authentication and role checks.
//!
//! Handlers take an [`AuthenticatedUser`] argument; the extractor resolves
//! the `Authorization` header against the [`AccountDirectory`] held in
//! [`HttpState`]. Missing or wrong credentials yield `401`, a valid account
//! without the required role yields `403`.

use std::fmt;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{Ready, ready};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// Roles recognised by the cake API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full read and write access.
    Admin,
    /// Read-only access.
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Customer => f.write_str("customer"),
        }
    }
}

/// A configured login.
#[derive(Clone)]
pub struct Account {
    username: String,
    password: String,
    role: Role,
}

impl Account {
    /// Create an account.
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Set of accounts allowed to call the API.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    /// Build a directory from accounts. Accounts with an empty password are
    /// dropped, which disables them.
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .filter(|account| {
                let enabled = !account.password.is_empty();
                if !enabled {
                    warn!(username = %account.username, role = %account.role, "account disabled: no password configured");
                }
                enabled
            })
            .collect();
        Self { accounts }
    }

    /// Role of the account matching the supplied credentials.
    ///
    /// Every configured account is compared in constant time, so timing
    /// does not reveal whether the username exists.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        self.accounts.iter().fold(None, |matched, account| {
            let same = account.username.as_bytes().ct_eq(username.as_bytes())
                & account.password.as_bytes().ct_eq(password.as_bytes());
            if bool::from(same) {
                Some(account.role)
            } else {
                matched
            }
        })
    }
}

/// Caller identity resolved from HTTP Basic credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
    role: Role,
}

impl AuthenticatedUser {
    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Granted role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Require one of `allowed`, otherwise `403 Forbidden`.
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), Error> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            debug!(username = %self.username, role = %self.role, "role not permitted");
            Err(Error::forbidden("Access denied"))
        }
    }

    /// Require the admin role.
    pub fn require_admin(&self) -> Result<(), Error> {
        self.require_any(&[Role::Admin])
    }
}

fn unauthorized() -> Error {
    Error::unauthorized("Full authentication is required to access this resource")
}

fn parse_basic_credentials(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(unauthorized)?;
    let (username, password) = parse_basic_credentials(value).ok_or_else(unauthorized)?;
    let role = state
        .accounts
        .authenticate(&username, &password)
        .ok_or_else(|| {
            debug!(%username, "rejected credentials");
            unauthorized()
        })?;
    Ok(AuthenticatedUser { username, role })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}

/// Caller holding the admin role.
///
/// Resolved before the request body is read, so a customer posting an
/// invalid body still receives `403` rather than a validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser(AuthenticatedUser);

impl AdminUser {
    /// Underlying authenticated identity.
    pub fn user(&self) -> &AuthenticatedUser {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req).and_then(|user| {
            user.require_admin()?;
            Ok(Self(user))
        }))
    }
}
