//! Checkout form validation

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Form fields that can fail validation, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// First name
    FirstName,

    /// Last name
    LastName,

    /// Phone number
    Phone,

    /// Street address
    Address,

    /// City
    City,

    /// ZIP code
    ZipCode,
}

impl Field {
    /// Field name as it appears in the form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::City => "city",
            Field::ZipCode => "zip_code",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages. Not an exception: callers show each message
/// next to its field and block submission until the map is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Iterates over `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records `message` for `field` when `value` is blank.
    pub(super) fn require(&mut self, field: Field, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the map itself when it holds at least one message.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;

        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }

            write!(f, "{field}: {message}")?;
            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
