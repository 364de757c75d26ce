use thiserror::Error;

/// Unified error type for loading survey documents.
///
/// Returned by [`RuleSet::from_json()`](crate::RuleSet::from_json) and
/// [`RuleSet::from_file()`](crate::RuleSet::from_file). Navigation itself never
/// fails; see [`InvalidTargetError`](crate::InvalidTargetError) for dangling
/// rule targets.
#[derive(Debug, Error)]
pub enum WaypointError {
    #[error("invalid survey document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_message() {
        let err: WaypointError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("invalid survey document: "));
    }

    #[test]
    fn io_error_is_transparent() {
        let err = WaypointError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "survey.json missing",
        ));
        assert_eq!(err.to_string(), "survey.json missing");
    }
}
