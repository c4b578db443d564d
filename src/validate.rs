// SPDX-License-Identifier: MPL-2.0
//! Pre-network input validation.
//!
//! Screens run these checks before building a request; input that fails
//! them is reported through the feedback layer and never costs a network
//! round-trip.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Whether `email` has the shape of an address worth sending to the
/// service. Format check only; deliverability is the server's problem.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Whether every value is non-empty.
#[must_use]
pub fn all_present(values: &[&str]) -> bool {
    values.iter().all(|value| !value.is_empty())
}

/// Whether the password and its confirmation agree.
#[must_use]
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}
