//! Visibility modes for the export

use serde::{Deserialize, Serialize};

/// Which evaluation channel(s) must be present for content to appear in
/// the export.
///
/// The mode drives two decisions: which grade fields the store query
/// selects, and which categories survive visibility filtering. There is
/// deliberately no `Default` impl; callers always state the mode, and
/// each HTTP entry point pins its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// The full record: every category, both evaluation channels
    Full,
    /// Only self-evaluated categories
    SelfOnly,
    /// Only validator-evaluated categories
    ValidatorOnly,
}

impl Visibility {
    /// The grade-field selection the store applies for this mode
    pub fn grade_selection(&self) -> GradeSelection {
        match self {
            Visibility::Full => GradeSelection::Both,
            Visibility::SelfOnly => GradeSelection::UserEval,
            Visibility::ValidatorOnly => GradeSelection::ValidatorEval,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Visibility::Full => "full",
            Visibility::SelfOnly => "self",
            Visibility::ValidatorOnly => "validator",
        };
        write!(f, "{}", s)
    }
}

/// Grade-field selection applied by the persistence query.
///
/// `UserEval` restricts to grades whose self-evaluation is non-null and
/// projects only that channel; `ValidatorEval` is symmetric. `Both`
/// keeps every grade with both channels intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeSelection {
    /// Both channels, no restriction
    Both,
    /// Self-evaluation channel only, restricted to non-null
    UserEval,
    /// Validator channel only, restricted to non-null
    ValidatorEval,
}
