/// Authentication failure codes and user-facing messages
///
/// Every sign-in, sign-up, and provider flow classifies backend failures
/// through this single table. The backend collaborator reports a wire code;
/// `user_message` maps it to the fixed notice shown to the user, falling back
/// to a generic message for anything unrecognized.
///
/// # Example
///
/// ```
/// use tasksync_shared::auth::AuthCode;
///
/// let code = AuthCode::from_code("user-not-found");
/// assert_eq!(code, AuthCode::UserNotFound);
/// assert_eq!(code.user_message(), "No account found with this email");
/// ```

use std::fmt;

/// Classified authentication failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCode {
    /// No account registered for the email
    UserNotFound,

    /// Password does not match the account
    WrongPassword,

    /// Email address is malformed
    InvalidEmail,

    /// An account already exists for the email
    EmailInUse,

    /// Password rejected as too weak
    WeakPassword,

    /// The email is registered through a different sign-in method
    CredentialConflict,

    /// Provider token exchange produced an unusable credential
    InvalidCredential,

    /// Provider sign-in is disabled for this project
    ProviderDisabled,

    /// The user backed out of the provider flow
    Cancelled,

    /// The provider service is not reachable on this device
    ProviderUnavailable,

    /// Anything the table does not recognize
    Unknown,
}

impl AuthCode {
    /// Converts the code to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthCode::UserNotFound => "user-not-found",
            AuthCode::WrongPassword => "wrong-password",
            AuthCode::InvalidEmail => "invalid-email",
            AuthCode::EmailInUse => "email-already-in-use",
            AuthCode::WeakPassword => "weak-password",
            AuthCode::CredentialConflict => "account-exists-with-different-credential",
            AuthCode::InvalidCredential => "invalid-credential",
            AuthCode::ProviderDisabled => "operation-not-allowed",
            AuthCode::Cancelled => "sign-in-cancelled",
            AuthCode::ProviderUnavailable => "provider-unavailable",
            AuthCode::Unknown => "unknown",
        }
    }

    /// Classifies a backend wire code; unrecognized codes become `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "user-not-found" => AuthCode::UserNotFound,
            "wrong-password" => AuthCode::WrongPassword,
            "invalid-email" => AuthCode::InvalidEmail,
            "email-already-in-use" => AuthCode::EmailInUse,
            "weak-password" => AuthCode::WeakPassword,
            "account-exists-with-different-credential" => AuthCode::CredentialConflict,
            "invalid-credential" => AuthCode::InvalidCredential,
            "operation-not-allowed" => AuthCode::ProviderDisabled,
            "sign-in-cancelled" => AuthCode::Cancelled,
            "provider-unavailable" => AuthCode::ProviderUnavailable,
            _ => AuthCode::Unknown,
        }
    }

    /// The fixed user-facing notice for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthCode::UserNotFound => "No account found with this email",
            AuthCode::WrongPassword => "Incorrect password",
            AuthCode::InvalidEmail => "Invalid email address",
            AuthCode::EmailInUse => "An account with this email already exists",
            AuthCode::WeakPassword => "Password is too weak",
            AuthCode::CredentialConflict => {
                "An account already exists with this email using a different sign-in method"
            }
            AuthCode::InvalidCredential => "Invalid provider credentials",
            AuthCode::ProviderDisabled => "Provider sign-in is not enabled for this app",
            AuthCode::Cancelled => "Sign-in was cancelled",
            AuthCode::ProviderUnavailable => "Provider sign-in is currently unavailable",
            AuthCode::Unknown => "Authentication failed",
        }
    }
}

impl fmt::Display for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
