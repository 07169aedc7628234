//! Classification of HTTP error statuses returned by the Kast backend.

/// Failure categories the backend expresses through HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    /// 400: malformed or rejected request payload
    BadRequest,
    /// 401: no valid session cookie
    Unauthenticated,
    /// 403: session lacks the required role or group permission
    Forbidden,
    /// 404: path or entry does not exist
    NotFound,
    /// 409: name collision on create or rename
    Conflict,
    /// 413: upload body too large
    PayloadTooLarge,
    /// 5xx: server-side failure
    Server,
    /// Any other non-success status
    Other,
}

impl ApiFailure {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiFailure::BadRequest,
            401 => ApiFailure::Unauthenticated,
            403 => ApiFailure::Forbidden,
            404 => ApiFailure::NotFound,
            409 => ApiFailure::Conflict,
            413 => ApiFailure::PayloadTooLarge,
            500..=599 => ApiFailure::Server,
            _ => ApiFailure::Other,
        }
    }

    /// Get human-readable description of the failure.
    pub fn description(&self) -> &'static str {
        match self {
            ApiFailure::BadRequest => "Bad request",
            ApiFailure::Unauthenticated => "Not authenticated",
            ApiFailure::Forbidden => "Access denied",
            ApiFailure::NotFound => "Resource does not exist",
            ApiFailure::Conflict => "Resource already exists",
            ApiFailure::PayloadTooLarge => "Upload too large",
            ApiFailure::Server => "Server error",
            ApiFailure::Other => "Unexpected response",
        }
    }

    /// Check whether this failure means the session is not (or no longer)
    /// accepted by the backend.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiFailure::Unauthenticated | ApiFailure::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiFailure::from_status(400), ApiFailure::BadRequest);
        assert_eq!(ApiFailure::from_status(401), ApiFailure::Unauthenticated);
        assert_eq!(ApiFailure::from_status(403), ApiFailure::Forbidden);
        assert_eq!(ApiFailure::from_status(404), ApiFailure::NotFound);
        assert_eq!(ApiFailure::from_status(409), ApiFailure::Conflict);
        assert_eq!(ApiFailure::from_status(413), ApiFailure::PayloadTooLarge);
        assert_eq!(ApiFailure::from_status(500), ApiFailure::Server);
        assert_eq!(ApiFailure::from_status(503), ApiFailure::Server);

        // Unmapped client errors fall through to Other
        assert_eq!(ApiFailure::from_status(418), ApiFailure::Other);
        assert_eq!(ApiFailure::from_status(302), ApiFailure::Other);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ApiFailure::BadRequest.description(), "Bad request");
        assert_eq!(
            ApiFailure::Unauthenticated.description(),
            "Not authenticated"
        );
        assert_eq!(ApiFailure::Forbidden.description(), "Access denied");
        assert_eq!(
            ApiFailure::NotFound.description(),
            "Resource does not exist"
        );
        assert_eq!(ApiFailure::Conflict.description(), "Resource already exists");
        assert_eq!(ApiFailure::PayloadTooLarge.description(), "Upload too large");
        assert_eq!(ApiFailure::Server.description(), "Server error");
        assert_eq!(ApiFailure::Other.description(), "Unexpected response");
    }

    #[test]
    fn test_auth_classification() {
        assert!(ApiFailure::Unauthenticated.is_auth());
        assert!(ApiFailure::Forbidden.is_auth());
        assert!(!ApiFailure::NotFound.is_auth());
        assert!(!ApiFailure::Server.is_auth());
    }
}
