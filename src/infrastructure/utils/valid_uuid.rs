use uuid::Uuid;

use crate::errors::AppError;

/// Parse a path id. A malformed id cannot name any record, so it
/// surfaces as the caller's not-found condition rather than a 4xx of
/// its own.
pub fn valid_uuid(id: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        let err = valid_uuid("not-a-uuid", "Project not found").unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Project not found"));
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(valid_uuid(&id.to_string(), "x").unwrap(), id);
    }
}
