//! The administrative gate.
//!
//! Catalog changes and officer hiring/firing sit behind one shared password
//! compiled into the binary. This is not real credential handling: anyone
//! with the binary can read it. Deployments that need more must replace it.
//!
//! A successful check yields an [`AdminGrant`], which the gated
//! [`LibraryApi`](crate::api::LibraryApi) methods take as a parameter.

use crate::error::{LibraryError, Result};

const ADMIN_PASSWORD: &str = "micky";

/// Proof that the administrative password was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGrant {
    _private: (),
}

pub fn verify_admin_password(candidate: &str) -> Result<AdminGrant> {
    if candidate == ADMIN_PASSWORD {
        Ok(AdminGrant { _private: () })
    } else {
        tracing::debug!("administrative password rejected");
        Err(LibraryError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_exact_password() {
        assert!(verify_admin_password("micky").is_ok());
        assert!(matches!(
            verify_admin_password("Micky"),
            Err(LibraryError::AccessDenied)
        ));
        assert!(verify_admin_password(" micky").is_err());
        assert!(verify_admin_password("").is_err());
    }
}
