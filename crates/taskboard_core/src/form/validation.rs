//! Generic field validation rules.

/// Raw value of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

/// One field plus the rules it must satisfy.
///
/// Length bounds apply to text only, numeric bounds to numbers only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validatable {
    pub value: Option<FieldValue>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validatable {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(FieldValue::Text(value.into())),
            ..Self::default()
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            value: Some(FieldValue::Number(value)),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// Returns whether `input` satisfies every rule it declares.
pub fn validate(input: &Validatable) -> bool {
    let Some(value) = &input.value else {
        return !input.required;
    };

    match value {
        FieldValue::Text(text) => {
            let length = text.trim().chars().count();
            if input.required && length == 0 {
                return false;
            }
            if input.min_length.is_some_and(|min| length < min) {
                return false;
            }
            if input.max_length.is_some_and(|max| length > max) {
                return false;
            }
            true
        }
        FieldValue::Number(number) => {
            if !number.is_finite() {
                return false;
            }
            if input.min.is_some_and(|min| *number < min) {
                return false;
            }
            if input.max.is_some_and(|max| *number > max) {
                return false;
            }
            true
        }
    }
}
