use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use ::validator::ValidateEmail;

use crate::errors::{AppError, AppResult};

// ASCII letters, the Vietnamese accented letters (either case) and whitespace
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "(?i)^[A-Za-z",
        "ÀÁÂÃÈÉÊÌÍÒÓÔÕÙÚĂĐĨŨƠàáâãèéêìíòóôõùúăđĩũơƯư",
        "ẠẢẤẦẨẪẬẮẰẲẴẶẸẺẼỀỂẾỆỈỊỌỎỐỒỔỖỘỚỜỞỠỢỤỦỨỪỬỮỰỲỴÝỶỸ",
        "ạảấầẩẫậắằẳẵặẹẻẽềểếễệỉịọỏốồổỗộớờởỡợụủứừửữựỳỵỷỹ",
        r"\s]+$",
    ))
    .expect("NAME_REGEX is a valid regex pattern")
});

static DATE_OF_BIRTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("DATE_OF_BIRTH_REGEX is a valid regex pattern")
});

const PASSWORD_MIN_LENGTH: usize = 8;

const PASSWORD_SYMBOLS: &str = "-#!$@£%^&*()_+|~=`{}[]:\";'<>?,./\\ ";

pub fn validate_email(email: &str) -> bool {
    let has_dotted_domain = email
        .rsplit_once('@')
        .map(|(_, domain)| domain.contains('.') && !domain.ends_with('.'))
        .unwrap_or(false);

    has_dotted_domain && email.to_owned().validate_email()
}

/// At least eight characters with one ASCII lowercase letter, one ASCII
/// uppercase letter, one digit and one character from `PASSWORD_SYMBOLS`.
/// A space counts as a symbol.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

pub fn validate_full_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && NAME_REGEX.is_match(name)
}

/// Strict `DD/MM/YYYY`, not later than today.
pub fn validate_date_of_birth(date: &str) -> bool {
    if !DATE_OF_BIRTH_REGEX.is_match(date) {
        return false;
    }

    match NaiveDate::parse_from_str(date, "%d/%m/%Y") {
        Ok(birth_date) => birth_date <= Utc::now().date_naive(),
        Err(_) => false,
    }
}

pub type FieldPredicate = fn(&str) -> bool;

/// Field name to predicate mapping. Only fields that are both submitted and
/// have a registered predicate are checked; the first failure is reported.
#[derive(Clone)]
pub struct FieldValidators {
    rules: HashMap<&'static str, FieldPredicate>,
}

impl FieldValidators {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn with(mut self, field: &'static str, predicate: FieldPredicate) -> Self {
        self.rules.insert(field, predicate);
        self
    }

    pub fn login() -> Self {
        Self::new().with("email", validate_email)
    }

    pub fn registration() -> Self {
        Self::new()
            .with("email", validate_email)
            .with("password", validate_password)
            .with("fullName", validate_full_name)
            .with("dateOfBirth", validate_date_of_birth)
    }

    pub fn validate(&self, fields: &[(&str, &str)]) -> AppResult<()> {
        for &(name, value) in fields {
            if let Some(predicate) = self.rules.get(name) {
                if value.is_empty() || !predicate(value) {
                    return Err(AppError::ValidationError(format!(
                        "Please enter valid {}!",
                        name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for FieldValidators {
    fn default() -> Self {
        Self::new()
    }
}
