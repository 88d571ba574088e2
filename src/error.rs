use thiserror::Error;

/// Failure raised when negotiation cannot settle on a variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    /// No entry of the ranked accept list (wildcard included) was satisfied
    /// by any of the document's variants.
    #[error("no localized variant satisfies the accepted languages: {requested}")]
    NoMatchingLanguage {
        /// The ranked accept entries, rendered as `code[-region];q=quality`.
        requested: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_language_message() {
        let err = NegotiationError::NoMatchingLanguage {
            requested: "de-DE;q=1".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("no localized variant"));
        assert!(message.contains("de-DE;q=1"));
    }

    #[test]
    fn test_error_converts_into_anyhow() {
        let err = NegotiationError::NoMatchingLanguage {
            requested: String::new(),
        };
        let wrapped: anyhow::Error = err.clone().into();
        assert_eq!(wrapped.downcast_ref::<NegotiationError>(), Some(&err));
    }
}
