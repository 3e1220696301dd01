//! Project creation form.

use crate::form::validation::{validate, Validatable};
use crate::model::work_item::WorkItemId;
use crate::store::observable::StoreError;
use crate::store::work_item_store::WorkItemStore;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Inclusive description length bounds (trimmed chars).
pub const DESCRIPTION_MIN_LEN: usize = 5;
pub const DESCRIPTION_MAX_LEN: usize = 500;
/// Inclusive people count bounds.
pub const PEOPLE_MIN: u32 = 2;
pub const PEOPLE_MAX: u32 = 50;

/// Validated, trimmed form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub people_count: u32,
}

/// First invalid field found, in title/description/people order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidTitle,
    InvalidDescription,
    PeopleCountNotNumeric(String),
    PeopleCountNotWhole(String),
    InvalidPeopleCount(i64),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "title must not be empty"),
            Self::InvalidDescription => write!(
                f,
                "description must be {DESCRIPTION_MIN_LEN}-{DESCRIPTION_MAX_LEN} characters"
            ),
            Self::PeopleCountNotNumeric(raw) => {
                write!(f, "people count must be a number, got `{raw}`")
            }
            Self::PeopleCountNotWhole(raw) => {
                write!(f, "people count must be a whole number, got `{raw}`")
            }
            Self::InvalidPeopleCount(value) => write!(
                f,
                "people count must be between {PEOPLE_MIN} and {PEOPLE_MAX}, got {value}"
            ),
        }
    }
}

impl Error for FormError {}

/// Failure of a full form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Form(FormError),
    Store(StoreError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "invalid input: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<FormError> for SubmitError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<StoreError> for SubmitError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Form facade between raw user input and the store.
pub struct ProjectForm;

impl ProjectForm {
    /// Validates raw field values.
    ///
    /// # Errors
    /// - Returns the first invalid field; any single invalid field rejects
    ///   the whole input.
    pub fn gather(
        title: &str,
        description: &str,
        people_raw: &str,
    ) -> Result<ProjectInput, FormError> {
        let title = title.trim();
        let description = description.trim();
        let people_raw = people_raw.trim();

        if !validate(&Validatable::text(title).required()) {
            return Err(FormError::InvalidTitle);
        }
        if !validate(
            &Validatable::text(description)
                .required()
                .length(DESCRIPTION_MIN_LEN, DESCRIPTION_MAX_LEN),
        ) {
            return Err(FormError::InvalidDescription);
        }
        let people = parse_people(people_raw)?;
        if !validate(
            &Validatable::number(people)
                .required()
                .range(f64::from(PEOPLE_MIN), f64::from(PEOPLE_MAX)),
        ) {
            return Err(FormError::InvalidPeopleCount(people as i64));
        }
        // In range and whole, so the cast is exact.
        let people_count = people as u32;

        Ok(ProjectInput {
            title: title.to_string(),
            description: description.to_string(),
            people_count,
        })
    }

    /// Validates raw input and creates the work item.
    ///
    /// # Errors
    /// - `SubmitError::Form` when input is invalid; the store is untouched.
    /// - `SubmitError::Store` when a listener failed after creation.
    pub fn submit(
        store: &WorkItemStore,
        title: &str,
        description: &str,
        people_raw: &str,
    ) -> Result<WorkItemId, SubmitError> {
        let input = match Self::gather(title, description, people_raw) {
            Ok(input) => input,
            Err(err) => {
                debug!(
                    "event=form_rejected module=form status=error reason={:?}",
                    err
                );
                return Err(err.into());
            }
        };
        let id = store.create(input.title, input.description, input.people_count)?;
        info!("event=form_submitted module=form status=ok id={}", id);
        Ok(id)
    }
}

/// Numeric reading of the people field: `"3"`, `"+3"` and `"3.0"` are all
/// three people, `"2.5"` is not a head count.
fn parse_people(raw: &str) -> Result<f64, FormError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| FormError::PeopleCountNotNumeric(raw.to_string()))?;
    if !value.is_finite() {
        return Err(FormError::PeopleCountNotNumeric(raw.to_string()));
    }
    if value.fract() != 0.0 {
        return Err(FormError::PeopleCountNotWhole(raw.to_string()));
    }
    Ok(value)
}
