use uuid::Uuid;

use crate::error::IdError;

pub const MAX_ANALYSIS_ID_LEN: usize = 100;

/// Shape checks applied to generated UUIDs and submitted analysis ids.
pub trait Validator: Send + Sync {
    fn validate_uuid(&self, id: &str) -> Result<(), IdError>;
    fn validate_analysis_id(&self, id: &str) -> Result<(), IdError>;
}

/// Default rules: canonical lowercase hyphenated UUIDs, and analysis ids of
/// 1 to 100 characters from `[A-Za-z0-9._:-]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeValidator;

impl Validator for ShapeValidator {
    fn validate_uuid(&self, id: &str) -> Result<(), IdError> {
        match Uuid::try_parse(id) {
            Ok(uuid) if uuid.hyphenated().to_string() == id => Ok(()),
            _ => Err(IdError::Validation {
                kind: "uuid",
                value: id.to_string(),
            }),
        }
    }

    fn validate_analysis_id(&self, id: &str) -> Result<(), IdError> {
        let well_formed = !id.is_empty()
            && id.len() <= MAX_ANALYSIS_ID_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '-'));
        if well_formed {
            Ok(())
        } else {
            Err(IdError::Validation {
                kind: "analysis id",
                value: id.to_string(),
            })
        }
    }
}
