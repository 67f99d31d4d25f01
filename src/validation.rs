//! Validators applied to prompt input.

/// Result of input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Input is valid
    Valid,
    /// Input is invalid with an error message
    Invalid(String),
}

impl ValidationResult {
    /// Returns true if the validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Checks a candidate answer.
///
/// Validators are borrowed for the duration of one prompt call and may be
/// reused across calls. Any `Fn(&str) -> ValidationResult` is a validator.
pub trait Validator {
    fn validate(&self, candidate: &str) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&str) -> ValidationResult,
{
    fn validate(&self, candidate: &str) -> ValidationResult {
        self(candidate)
    }
}

/// Rejects empty or whitespace-only input.
#[derive(Debug, Clone)]
pub struct NonEmpty {
    message: String,
}

impl Default for NonEmpty {
    fn default() -> Self {
        Self::new("A value is required")
    }
}

impl NonEmpty {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validator for NonEmpty {
    fn validate(&self, candidate: &str) -> ValidationResult {
        if candidate.trim().is_empty() {
            ValidationResult::Invalid(self.message.clone())
        } else {
            ValidationResult::Valid
        }
    }
}

/// Accepts strings in [Semantic Versioning 2.0](https://semver.org/) format.
///
/// Parsing is strict: `MAJOR.MINOR.PATCH` with optional pre-release and
/// build metadata, no `v` prefix and no leading zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemVer;

impl Validator for SemVer {
    fn validate(&self, candidate: &str) -> ValidationResult {
        if is_semver(candidate) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(format!(
                "\"{candidate}\" is not a valid semantic version (expected MAJOR.MINOR.PATCH)"
            ))
        }
    }
}

/// Returns true if `candidate` parses as a semantic version.
#[must_use]
pub fn is_semver(candidate: &str) -> bool {
    semver::Version::parse(candidate).is_ok()
}
