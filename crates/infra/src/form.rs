use serde::Serialize;

use bierklub_core::FormErrors;

/// A submission that failed validation, with everything needed to show the
/// form again: the errors and the values to prefill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRejection<F> {
    pub errors: FormErrors,
    pub form: F,
}

impl<F> FormRejection<F> {
    pub fn new(errors: FormErrors, form: F) -> Self {
        Self { errors, form }
    }
}
