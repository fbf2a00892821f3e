//! Pre-flight checks expressed as composable specifications.

use regex::Regex;
use std::sync::LazyLock;

/// A predicate over candidates of type `T`.
///
/// Any `Fn(&T) -> bool` is a specification, so [`and`], [`or`] and [`not`]
/// can combine closures and named specifications freely.
pub trait Specification<T: ?Sized> {
    /// Returns `true` when `candidate` satisfies the specification.
    fn is_satisfied_by(&self, candidate: &T) -> bool;
}

impl<T: ?Sized, F> Specification<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self(candidate)
    }
}

/// Satisfied when both specifications are.
pub fn and<T: ?Sized>(
    left: impl Specification<T>,
    right: impl Specification<T>,
) -> impl Fn(&T) -> bool {
    move |candidate: &T| left.is_satisfied_by(candidate) && right.is_satisfied_by(candidate)
}

/// Satisfied when either specification is.
pub fn or<T: ?Sized>(
    left: impl Specification<T>,
    right: impl Specification<T>,
) -> impl Fn(&T) -> bool {
    move |candidate: &T| left.is_satisfied_by(candidate) || right.is_satisfied_by(candidate)
}

/// Satisfied when `inner` is not.
pub fn not<T: ?Sized>(inner: impl Specification<T>) -> impl Fn(&T) -> bool {
    move |candidate: &T| !inner.is_satisfied_by(candidate)
}

const BARE_ADDRESS: &str = concat!(
    r"[A-Za-z0-9_\-+]+(?:\.[A-Za-z0-9_\-+]+)*",
    "@",
    r"(?:(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,6}",
    r"|\[?[0-9]{1,3}(?:\.[0-9]{1,3}){3}\]?)",
    r"(?::[0-9]{1,5})?",
);

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^(?:{BARE_ADDRESS}|[^<>]*<{BARE_ADDRESS}>)$");
    Regex::new(&pattern).expect("email address pattern is valid")
});

/// Email-address shape check.
///
/// Accepts `local@domain.tld` (TLD of 2–6 letters, or a dotted-quad IP
/// literal, optionally followed by `:port`) and the same address wrapped as
/// `Display Name <local@domain.tld>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailAddressSpecification;

impl EmailAddressSpecification {
    pub fn new() -> Self {
        Self
    }
}

impl Specification<str> for EmailAddressSpecification {
    fn is_satisfied_by(&self, candidate: &str) -> bool {
        EMAIL_RE.is_match(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(address: &str) -> bool {
        EmailAddressSpecification.is_satisfied_by(address)
    }

    #[test]
    fn accepts_conventional_addresses() {
        for address in [
            "someone@example.com",
            "first.last@mail.example.co.uk",
            "user+tag@example.museum",
            "under_score-dash@sub-domain.example.org",
            "ops@10.0.0.1",
            "ops@[192.168.1.20]",
            "ops@example.com:2525",
            "Jane Doe <jane@example.com>",
            "\"Doe, Jane\" <jane@example.com>",
        ] {
            assert!(valid(address), "expected {address} to be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for address in [
            "",
            " someone@example.com",
            "someone@example.com ",
            "some one@example.com",
            "someone@exa mple.com",
            "someone@example.com/",
            "someone@example.com\\",
            "someone@example.com'",
            "someone@example",
            "someone@example.c",
            "someone@example.toolongtld",
            "someone@-example.com",
            "someone@example..com",
            ".someone@example.com",
            "someone.@example.com",
            "someone@@example.com",
            "Jane <jane@example.com",
        ] {
            assert!(!valid(address), "expected {address:?} to be invalid");
        }
    }

    #[test]
    fn combinators_compose_specifications() {
        let is_email = EmailAddressSpecification::new();
        let company = |s: &str| s.ends_with("@example.com");

        let company_email = and(is_email, company);
        assert!(company_email.is_satisfied_by("a@example.com"));
        assert!(!company_email.is_satisfied_by("a@other.org"));

        let external = and(is_email, not(company));
        assert!(external.is_satisfied_by("a@other.org"));
        assert!(!external.is_satisfied_by("a@example.com"));

        let either = or(|s: &str| s.is_empty(), is_email);
        assert!(either.is_satisfied_by(""));
        assert!(either.is_satisfied_by("a@other.org"));
        assert!(!either.is_satisfied_by("nope"));
    }
}
