//! Field validation rules.
//!
//! Rules run in `FieldId` order and stop at the first failure so the user is
//! told about one problem at a time. The email and mobile patterns are kept
//! deliberately loose; do not tighten them.

use lazy_static::lazy_static;
use regex::Regex;

use super::record::{FieldId, FieldRecord};

/// Whitespace as browsers define it for `trim` and `\s`: Unicode `Zs`, the
/// ASCII controls, line/paragraph separators and U+FEFF. Unlike Rust's
/// `char::is_whitespace` it excludes U+0085 and includes U+FEFF.
const SPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

lazy_static! {
    static ref MOBILE_RE: Regex = Regex::new(r"^[0-9]{10}$").expect("static mobile pattern");
    static ref EMAIL_RE: Regex = {
        let part = format!("[^{SPACE_CLASS}@]+");
        Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("static email pattern")
    };
}

fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { field: FieldId, message: &'static str },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Check a single field.
pub fn check_field(field: FieldId, value: &str) -> Result<(), &'static str> {
    let ok = match field {
        FieldId::Mobile => MOBILE_RE.is_match(value),
        FieldId::Email => EMAIL_RE.is_match(value),
        FieldId::Name | FieldId::Department | FieldId::Role | FieldId::Address => {
            !value.trim_matches(is_space).is_empty()
        }
    };
    if ok {
        Ok(())
    } else {
        Err(message_for(field))
    }
}

pub fn validate(record: &FieldRecord) -> ValidationOutcome {
    for field in FieldId::all() {
        if let Err(message) = check_field(field, record.get(field)) {
            return ValidationOutcome::Invalid { field, message };
        }
    }
    ValidationOutcome::Valid
}

const fn message_for(field: FieldId) -> &'static str {
    match field {
        FieldId::Name => "Name is required",
        FieldId::Mobile => "Please enter a valid 10-digit mobile number",
        FieldId::Email => "Please enter a valid email address",
        FieldId::Department => "Department is required",
        FieldId::Role => "Role is required",
        FieldId::Address => "Address is required",
    }
}
