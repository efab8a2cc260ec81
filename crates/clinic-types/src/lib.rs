//! Validated field types for clinic patient records.
//!
//! Every type in this crate wraps a `String` and can only be constructed through `new`, which
//! trims the input and enforces the field's character rules and length limit. Code holding one
//! of these values never needs to re-validate it.

use std::fmt;

/// Errors that can occur when creating validated field types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The input was empty or contained only whitespace.
    #[error("{field} cannot be blank")]
    Empty { field: &'static str },

    /// The trimmed input is longer than the field allows.
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// The input contains characters or tokens the field does not allow.
    #[error("{constraints}")]
    Invalid {
        field: &'static str,
        constraints: &'static str,
    },
}

impl FieldError {
    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Empty { field }
            | FieldError::TooLong { field, .. }
            | FieldError::Invalid { field, .. } => *field,
        }
    }
}

/// Character limits for each field.
pub mod limits {
    pub const MAX_NAME_LENGTH: usize = 100;
    pub const MAX_PHONE_LENGTH: usize = 20;
    pub const MAX_EMAIL_LENGTH: usize = 100;
    pub const MAX_ADDRESS_LENGTH: usize = 100;
    pub const MAX_DOCTOR_LENGTH: usize = 100;
    pub const MAX_MEDICINE_LENGTH: usize = 60;
    pub const MAX_TAG_LENGTH: usize = 50;
}

use limits::*;

/// Generates the accessors and trait impls shared by every field type.
macro_rules! text_field {
    ($ty:ident) => {
        impl $ty {
            /// Returns the inner string as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $ty {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::new(s)
            }
        }
    };
}

/// Trims `input` and checks it is non-blank and within `max` characters.
fn trimmed_within(
    input: &str,
    field: &'static str,
    max: usize,
) -> Result<String, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// True for the two standalone relationship tokens names may contain.
fn is_relation_token(token: &str) -> bool {
    token == "d/o" || token == "s/o"
}

/// A patient's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Names cannot be blank and can contain alphanumeric characters, spaces, commas, \
         the at symbol (@), and hyphens. The only allowed slash tokens are 'd/o' and 's/o', \
         which must appear as standalone words.";

    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        let value = trimmed_within(input.as_ref(), "Name", MAX_NAME_LENGTH)?;

        let chars_ok = value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b' ' | b'@' | b',' | b'-' | b'/'));
        let slashes_ok = value
            .split_whitespace()
            .all(|token| !token.contains('/') || is_relation_token(token));

        if !chars_ok || !slashes_ok {
            return Err(FieldError::Invalid {
                field: "Name",
                constraints: Self::MESSAGE_CONSTRAINTS,
            });
        }
        Ok(Self(value))
    }
}

text_field!(Name);

/// A patient's phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Phone numbers should only contain numbers, and it should be at least 3 digits long";

    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        let value = trimmed_within(input.as_ref(), "Phone", MAX_PHONE_LENGTH)?;
        if value.len() < 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::Invalid {
                field: "Phone",
                constraints: Self::MESSAGE_CONSTRAINTS,
            });
        }
        Ok(Self(value))
    }
}

text_field!(Phone);

/// A patient's email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Emails should be of the format local-part@domain. The local-part should only contain \
         alphanumeric characters and these special characters (+_.-), and may not start or end \
         with a special character. The domain is made of labels separated by periods; each label \
         starts and ends with an alphanumeric character and may contain hyphens, and the last \
         label is at least 2 characters long.";

    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        let value = trimmed_within(input.as_ref(), "Email", MAX_EMAIL_LENGTH)?;
        if !Self::is_valid(&value) {
            return Err(FieldError::Invalid {
                field: "Email",
                constraints: Self::MESSAGE_CONSTRAINTS,
            });
        }
        Ok(Self(value))
    }

    fn is_valid(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };

        // Each special character sits between two alphanumerics.
        let is_special = |b: u8| matches!(b, b'+' | b'_' | b'.' | b'-');
        let bytes = local.as_bytes();
        let local_ok = !bytes.is_empty()
            && bytes
                .iter()
                .all(|&b| b.is_ascii_alphanumeric() || is_special(b))
            && !bytes.first().copied().is_some_and(is_special)
            && !bytes.last().copied().is_some_and(is_special)
            && !bytes.windows(2).any(|w| is_special(w[0]) && is_special(w[1]));

        let labels: Vec<&str> = domain.split('.').collect();
        let labels_ok = labels.iter().all(|label| {
            !label.is_empty()
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && !label.starts_with('-')
                && !label.ends_with('-')
        });
        let last_ok = labels.last().is_some_and(|label| label.len() >= 2);

        local_ok && labels_ok && last_ok
    }
}

text_field!(Email);

/// A patient's home address. Any non-blank text is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        trimmed_within(input.as_ref(), "Address", MAX_ADDRESS_LENGTH).map(Self)
    }
}

text_field!(Address);

/// The doctor assigned to a patient.
///
/// Unlike the other fields a doctor may be empty, meaning no doctor is assigned yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Doctor(String);

impl Doctor {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Doctor names can be empty or contain alphanumeric characters, spaces, commas, \
         the at symbol (@), hyphens (-), and periods (.). The only allowed slash tokens are \
         'd/o' and 's/o' as standalone words.";

    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        let value = input.as_ref().trim();
        if value.chars().count() > MAX_DOCTOR_LENGTH {
            return Err(FieldError::TooLong {
                field: "Doctor",
                max: MAX_DOCTOR_LENGTH,
            });
        }

        let tokens_ok = value.split_whitespace().all(|token| {
            is_relation_token(token)
                || token
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'@' | b',' | b'.' | b'-'))
        });
        if !tokens_ok {
            return Err(FieldError::Invalid {
                field: "Doctor",
                constraints: Self::MESSAGE_CONSTRAINTS,
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// True when no doctor is assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

text_field!(Doctor);

/// The name of a medicine prescribed to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Medicine(String);

impl Medicine {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Medicine names should be alphanumeric and may contain spaces, hyphens, periods, \
         parentheses and slashes";

    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        let value = trimmed_within(input.as_ref(), "Medicine", MAX_MEDICINE_LENGTH)?;
        let ok = value.bytes().all(|b| {
            b.is_ascii_alphanumeric() || matches!(b, b' ' | b'-' | b'.' | b'(' | b')' | b'/')
        });
        if !ok {
            return Err(FieldError::Invalid {
                field: "Medicine",
                constraints: Self::MESSAGE_CONSTRAINTS,
            });
        }
        Ok(Self(value))
    }
}

text_field!(Medicine);

/// A free-form tag attached to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub const MESSAGE_CONSTRAINTS: &'static str = "Tags names should be alphanumeric";

    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        let value = trimmed_within(input.as_ref(), "Tag", MAX_TAG_LENGTH)?;
        if !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(FieldError::Invalid {
                field: "Tag",
                constraints: Self::MESSAGE_CONSTRAINTS,
            });
        }
        Ok(Self(value))
    }
}

text_field!(Tag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_relationship_tokens() {
        let name = Name::new("  Ravi s/o Kumar ").unwrap();
        assert_eq!(name.as_str(), "Ravi s/o Kumar");
    }

    #[test]
    fn name_rejects_bare_slashes() {
        assert!(matches!(
            Name::new("Ravi a/b Kumar"),
            Err(FieldError::Invalid { field: "Name", .. })
        ));
        assert!(matches!(
            Name::new("Ravi d/oKumar"),
            Err(FieldError::Invalid { .. })
        ));
    }

    #[test]
    fn name_rejects_blank_and_overlong_input() {
        assert_eq!(
            Name::new("   ").unwrap_err(),
            FieldError::Empty { field: "Name" }
        );
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            Name::new(long).unwrap_err(),
            FieldError::TooLong {
                field: "Name",
                max: MAX_NAME_LENGTH
            }
        );
    }

    #[test]
    fn phone_requires_three_digits() {
        assert!(Phone::new("911").is_ok());
        assert!(Phone::new("91").is_err());
        assert!(Phone::new("9a11").is_err());
    }

    #[test]
    fn email_validation() {
        assert!(Email::new("alice.tan@clinic.example.com").is_ok());
        assert!(Email::new("a+b@x-y.io").is_ok());
        assert!(Email::new("alice@clinic").is_ok());
        assert!(Email::new(".alice@clinic.com").is_err());
        assert!(Email::new("a..b@x.com").is_err());
        assert!(Email::new("a+-b@x.com").is_err());
        assert!(Email::new("a.b_c@x.com").is_ok());
        assert!(Email::new("alice@clinic.c").is_err());
        assert!(Email::new("alice@-clinic.com").is_err());
        assert!(Email::new("alice.clinic.com").is_err());
    }

    #[test]
    fn doctor_may_be_empty() {
        let doctor = Doctor::new("  ").unwrap();
        assert!(doctor.is_empty());
        assert_eq!(doctor, Doctor::default());
    }

    #[test]
    fn doctor_tokens() {
        assert!(Doctor::new("Dr. Alex Williams, MD").is_ok());
        assert!(Doctor::new("Dr Lee d/o Tan").is_ok());
        assert!(Doctor::new("Dr Lee/Tan").is_err());
    }

    #[test]
    fn medicine_and_tag() {
        assert!(Medicine::new("Paracetamol 500mg").is_ok());
        assert!(Medicine::new("Co-codamol (30/500)").is_ok());
        assert!(Medicine::new("Aspirin!").is_err());
        assert!(Tag::new("diabetic").is_ok());
        assert!(Tag::new("high risk").is_err());
    }

    #[test]
    fn field_error_names_field() {
        let err = Tag::new("").unwrap_err();
        assert_eq!(err.field(), "Tag");
        assert_eq!(err.to_string(), "Tag cannot be blank");
    }

    #[test]
    fn from_str_matches_new() {
        let parsed: Tag = "friends".parse().unwrap();
        assert_eq!(parsed, Tag::new("friends").unwrap());
    }
}
