//! Test helpers for inbound HTTP components.

use actix_web::http::header;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::inbound::http::auth::{Account, AccountDirectory, Role};

pub const ADMIN: (&str, &str) = ("cakemanager", "admin-secret");
pub const CUSTOMER: (&str, &str) = ("cakeuser", "customer-secret");

/// Directory holding the [`ADMIN`] and [`CUSTOMER`] accounts.
pub fn test_accounts() -> AccountDirectory {
    AccountDirectory::new([
        Account::new(ADMIN.0, ADMIN.1, Role::Admin),
        Account::new(CUSTOMER.0, CUSTOMER.1, Role::Customer),
    ])
}

/// `Authorization` header carrying Basic credentials.
pub fn basic_auth((username, password): (&str, &str)) -> (header::HeaderName, String) {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    (header::AUTHORIZATION, format!("Basic {encoded}"))
}
