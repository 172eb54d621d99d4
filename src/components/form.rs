use crate::prelude::*;
use thiserror::Error;

/// Minimum number of characters in a name, after trimming.
pub const MIN_NAME_LEN: usize = 2;

/// Validation error of a [`SignupData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name is blank.
    #[error("Name is required")]
    NameRequired,
    /// The name is shorter than `min` characters.
    #[error("Name must be at least {min} characters")]
    NameTooShort {
        /// Minimum length.
        min: usize,
    },
    /// The email is blank.
    #[error("Email is required")]
    EmailRequired,
    /// The email is not of the form `local@domain.tld`.
    #[error("Email address is invalid")]
    EmailInvalid,
}

/// Values of the sign-up form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupData {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl SignupData {
    /// Validate every field, returning all errors found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::NameRequired);
        } else if name.chars().count() < MIN_NAME_LEN {
            errors.push(ValidationError::NameTooShort { min: MIN_NAME_LEN });
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ValidationError::EmailRequired);
        } else if !is_email(email) {
            errors.push(ValidationError::EmailInvalid);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy of these values with surrounding whitespace removed.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
        }
    }
}

fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Sign-up form with validation.
///
/// Inputs: `form.name`, `form.email`. Button: `form.submit`.
#[derive(Clone, Debug, Default)]
pub struct SignupForm;

impl Component for SignupForm {
    fn compose(&self, cx: &Scope) -> View {
        let data = use_store(cx, SignupData::default);
        let errors = use_store(cx, Vec::<ValidationError>::new);
        let submitted = use_store(cx, || None::<SignupData>);
        let is_valid = use_computed(cx, &data, |data| data.validate().is_ok());

        let submit = {
            let data = data.clone();
            let errors = errors.clone();
            let submitted = submitted.clone();
            move || match data.with(SignupData::validate) {
                Ok(()) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!("Signed up {}", data.borrow().name.trim());

                    submitted.set(Some(data.with(SignupData::trimmed)));
                    errors.set(Vec::new());
                    data.set(SignupData::default());
                }
                Err(found) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Rejected sign-up: {:?}", found);

                    errors.set(found);
                }
            }
        };

        let set_name = data.clone();
        let set_email = data.clone();
        let current = data.get();
        let errors = errors.get();

        View::group([
            View::heading("Sign up"),
            View::input("form.name", current.name, move |name| {
                set_name.update(move |data| data.name = name)
            })
            .placeholder("Name"),
            View::input("form.email", current.email, move |email| {
                set_email.update(move |data| data.email = email)
            })
            .placeholder("Email"),
            View::button(
                "form.submit",
                if is_valid.get() { "Submit" } else { "Submit (incomplete)" },
                submit,
            ),
            View::when(!errors.is_empty(), || {
                View::list(errors.iter().map(|error| View::text(error.to_string())))
            }),
            match submitted.get() {
                Some(data) => View::text(format!("Thanks for signing up, {}!", data.name)),
                None => View::Empty,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str, email: &str) -> SignupData {
        SignupData {
            name: name.into(),
            email: email.into(),
        }
    }

    #[test]
    fn it_validates_fields() {
        assert_eq!(data("Ada", "ada@example.com").validate(), Ok(()));
        assert_eq!(
            data("", "").validate(),
            Err(vec![
                ValidationError::NameRequired,
                ValidationError::EmailRequired
            ])
        );
        assert_eq!(
            data(" A ", "ada@example").validate(),
            Err(vec![
                ValidationError::NameTooShort { min: MIN_NAME_LEN },
                ValidationError::EmailInvalid
            ])
        );
    }

    #[test]
    fn it_rejects_malformed_emails() {
        for email in ["ada", "@example.com", "ada@", "ada@.com", "ada@example.", "a da@x.io", "a@b@c.io"] {
            assert_eq!(
                data("Ada", email).validate(),
                Err(vec![ValidationError::EmailInvalid]),
                "{email}"
            );
        }
    }

    #[test]
    fn it_submits_valid_data() {
        let mut composer = Composer::new(SignupForm);
        composer.mount().unwrap();

        let view = composer.dispatch(Event::click("form.submit")).unwrap();
        assert!(view.contains_text("Name is required"));
        assert!(view.contains_text("Email is required"));
        assert_eq!(
            view.button_label("form.submit"),
            Some("Submit (incomplete)")
        );

        let view = composer.dispatch(Event::input("form.name", "  Ada ")).unwrap();
        assert_eq!(
            view.button_label("form.submit"),
            Some("Submit (incomplete)")
        );

        let view = composer
            .dispatch(Event::input("form.email", "ada@example.com"))
            .unwrap();
        assert_eq!(view.button_label("form.submit"), Some("Submit"));

        let view = composer.dispatch(Event::click("form.submit")).unwrap();
        assert!(view.contains_text("Thanks for signing up, Ada!"));
        assert!(!view.contains_text("Name is required"));
        assert_eq!(view.input_value("form.name"), Some(""));
        assert_eq!(view.input_value("form.email"), Some(""));
    }
}
