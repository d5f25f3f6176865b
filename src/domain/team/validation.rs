//! Team validation

use thiserror::Error;

/// Errors raised by the team validation pipeline
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team slug cannot be blank")]
    MissingSlug,

    #[error("Team slug '{0}' is already taken")]
    SlugTaken(String),

    #[error("Team ID cannot be empty")]
    EmptyId,

    #[error("Team ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Team ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,
}

const MAX_TEAM_ID_LENGTH: usize = 50;

/// Validate a team ID
pub fn validate_team_id(id: &str) -> Result<(), TeamValidationError> {
    if id.is_empty() {
        return Err(TeamValidationError::EmptyId);
    }

    if id.len() > MAX_TEAM_ID_LENGTH {
        return Err(TeamValidationError::IdTooLong(MAX_TEAM_ID_LENGTH));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(TeamValidationError::InvalidIdCharacters);
    }

    Ok(())
}

/// Whether a name counts as missing (absent, empty or whitespace only)
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_id() {
        assert!(validate_team_id("3b241101-e2bb-4255-8caf-4136c566a962").is_ok());
        assert!(validate_team_id("team123").is_ok());
    }

    #[test]
    fn test_invalid_team_id() {
        assert_eq!(validate_team_id(""), Err(TeamValidationError::EmptyId));
        assert_eq!(
            validate_team_id(&"a".repeat(51)),
            Err(TeamValidationError::IdTooLong(50))
        );
        assert_eq!(
            validate_team_id("team_name"),
            Err(TeamValidationError::InvalidIdCharacters)
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("Rocket")));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TeamValidationError::SlugTaken("rocket".into()).to_string(),
            "Team slug 'rocket' is already taken"
        );
    }
}
