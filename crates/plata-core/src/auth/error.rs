//! Provider error taxonomy.
//!
//! The remote identity service reports failures as opaque string codes.
//! The adapter boundary maps them into this closed enumeration so
//! downstream code handles known kinds exhaustively and falls back
//! explicitly for unknown ones.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("email already in use")]
    EmailAlreadyInUse,
    #[error("invalid email")]
    InvalidEmail,
    #[error("weak password")]
    WeakPassword,
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("too many requests")]
    TooManyRequests,
    #[error("operation not allowed")]
    OperationNotAllowed,
    /// The operation needs an authenticated principal and none is held.
    #[error("no current user")]
    NoCurrentUser,
    /// A code outside the known vocabulary.
    #[error("unknown provider code: {code}")]
    Unknown { code: String },
    /// Transport-level failure before any provider code was produced.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ProviderError {
    /// Map a wire code onto the closed vocabulary.
    pub fn from_code(code: &str) -> Self {
        match code {
            "email-already-in-use" => Self::EmailAlreadyInUse,
            "invalid-email" => Self::InvalidEmail,
            "weak-password" => Self::WeakPassword,
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "invalid-credential" => Self::InvalidCredential,
            "too-many-requests" => Self::TooManyRequests,
            "operation-not-allowed" => Self::OperationNotAllowed,
            other => Self::Unknown {
                code: other.to_string(),
            },
        }
    }

    /// The canonical code string, for diagnostics.
    pub fn code(&self) -> &str {
        match self {
            Self::EmailAlreadyInUse => "email-already-in-use",
            Self::InvalidEmail => "invalid-email",
            Self::WeakPassword => "weak-password",
            Self::UserNotFound => "user-not-found",
            Self::WrongPassword => "wrong-password",
            Self::InvalidCredential => "invalid-credential",
            Self::TooManyRequests => "too-many-requests",
            Self::OperationNotAllowed => "operation-not-allowed",
            Self::NoCurrentUser => "no-current-user",
            Self::Unknown { code } => code,
            Self::Transport(_) => "transport",
        }
    }

    /// User-facing message. Unknown codes fall back to a generic
    /// message carrying the raw code.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmailAlreadyInUse => {
                "Este correo ya está registrado. ¿Ya tienes cuenta?".to_string()
            }
            Self::InvalidEmail => "El correo no es válido.".to_string(),
            Self::WeakPassword => "La contraseña es muy débil (mínimo 6 caracteres).".to_string(),
            Self::UserNotFound => "Usuario no encontrado. Crea una cuenta.".to_string(),
            Self::WrongPassword => "Contraseña incorrecta.".to_string(),
            Self::InvalidCredential => {
                "Correo o contraseña incorrectos. Verifica espacios o mayúsculas.".to_string()
            }
            Self::TooManyRequests => {
                "Demasiados intentos. Espera un momento o restablece tu contraseña.".to_string()
            }
            Self::OperationNotAllowed => {
                "Error de configuración: el acceso por correo y contraseña está deshabilitado."
                    .to_string()
            }
            Self::NoCurrentUser => "Sesión expirada. Inicia sesión de nuevo.".to_string(),
            Self::Unknown { code } => format!("Error de autenticación: {code}"),
            Self::Transport(_) => "Error de conexión. Intenta de nuevo.".to_string(),
        }
    }

    /// Expected user-facing failures stay out of the diagnostic log;
    /// everything else is logged by the caller.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyInUse
                | Self::WrongPassword
                | Self::UserNotFound
                | Self::InvalidCredential
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_round_trip() {
        for code in [
            "email-already-in-use",
            "invalid-email",
            "weak-password",
            "user-not-found",
            "wrong-password",
            "invalid-credential",
            "too-many-requests",
            "operation-not-allowed",
        ] {
            let err = ProviderError::from_code(code);
            assert!(!matches!(err, ProviderError::Unknown { .. }), "{code}");
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_unknown_code_falls_back_with_raw_code() {
        let err = ProviderError::from_code("quota-exceeded");
        assert_eq!(
            err,
            ProviderError::Unknown {
                code: "quota-exceeded".to_string()
            }
        );
        assert!(err.user_message().contains("quota-exceeded"));
    }

    #[test]
    fn test_expected_errors_are_the_credential_family() {
        assert!(ProviderError::EmailAlreadyInUse.is_expected());
        assert!(ProviderError::WrongPassword.is_expected());
        assert!(ProviderError::UserNotFound.is_expected());
        assert!(ProviderError::InvalidCredential.is_expected());

        assert!(!ProviderError::TooManyRequests.is_expected());
        assert!(!ProviderError::OperationNotAllowed.is_expected());
        assert!(!ProviderError::Transport("timeout".to_string()).is_expected());
        assert!(!ProviderError::from_code("quota-exceeded").is_expected());
    }

    #[test]
    fn test_every_variant_has_a_message() {
        let variants = [
            ProviderError::EmailAlreadyInUse,
            ProviderError::InvalidEmail,
            ProviderError::WeakPassword,
            ProviderError::UserNotFound,
            ProviderError::WrongPassword,
            ProviderError::InvalidCredential,
            ProviderError::TooManyRequests,
            ProviderError::OperationNotAllowed,
            ProviderError::NoCurrentUser,
            ProviderError::Unknown {
                code: "x".to_string(),
            },
            ProviderError::Transport("x".to_string()),
        ];
        for err in variants {
            assert!(!err.user_message().is_empty());
        }
    }
}
