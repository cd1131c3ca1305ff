//! Login credentials as submitted by clients.

use zeroize::Zeroizing;

/// Credentials presented to the login endpoint.
///
/// No validation or normalisation happens here: comparison against stored
/// users is exact, so an empty or whitespace-padded value simply never
/// matches and surfaces as an ordinary authentication failure. The password
/// is wrapped in [`Zeroizing`] so the buffer is wiped on drop.
#[derive(Clone)]
pub struct LoginCredentials {
    name: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Capture credentials exactly as presented.
    #[must_use]
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Login name, untrimmed.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Presented password.
    #[must_use]
    #[rustfmt::skip]
    pub fn password(&self) -> &str { &self.password }
}

impl std::fmt::Debug for LoginCredentials {
    // Keeps the password out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}
