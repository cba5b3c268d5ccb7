//! Domain models for the class roster. These types stay light-weight data
//! holders so the store can focus on the byte layout and the session on the
//! prompts. Field widths live here as constants because the codec, the input
//! parsers, and the tests all need the exact same numbers.

use std::fmt;

/// Width of the fixed name field, terminator included. Names keep at most
/// `NAME_LENGTH - 1` visible bytes.
pub const NAME_LENGTH: usize = 10;
/// Width of each class metadata code block, terminator included.
pub const META_CODE_LENGTH: usize = 8;
/// Longest age accepted from the console, in digits.
pub const MAX_AGE_DIGITS: usize = 3;

/// Gender code shown as "Male".
pub const GENDER_MALE: i32 = 1;
/// Gender code shown as "Female".
pub const GENDER_FEMALE: i32 = 2;
/// Code the console offers for everything else. Any value besides 1 and 2
/// displays as "Other", including the zero a fresh slot starts with.
pub const GENDER_OTHER: i32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One class member. A default student is the zero-initialized slot handed
/// out by `Roster::allocate`: empty name, gender 0, age 0.
pub struct Student {
    /// Display name, already clamped to the fixed field width.
    pub name: String,
    /// Raw gender code. Never rejected here; `gender_label` decides how it
    /// reads.
    pub gender: i32,
    pub age: u32,
}

impl Student {
    /// Build a student, truncating the name so it always fits its slot.
    pub fn new(name: &str, gender: i32, age: u32) -> Self {
        Self {
            name: clamp_text(name, NAME_LENGTH),
            gender,
            age,
        }
    }

    pub fn gender_label(&self) -> &'static str {
        gender_label(self.gender)
    }
}

impl fmt::Display for Student {
    /// Three indented lines, matching the layout of the student list view.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tStudent Name: {}", self.name)?;
        writeln!(f, "\tGender: {}", self.gender_label())?;
        write!(f, "\tAge: {}", self.age)
    }
}

/// Map a gender code to its label. Total over `i32`: 1 and 2 are the only
/// named codes.
pub fn gender_label(code: i32) -> &'static str {
    match code {
        GENDER_MALE => "Male",
        GENDER_FEMALE => "Female",
        _ => "Other",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Which class a roster belongs to. Only the full layout stores it; the
/// classic file format has no room for it.
pub struct ClassMetadata {
    /// Subject category, e.g. `CSC`.
    pub category: String,
    pub course_number: String,
    pub section: String,
}

impl ClassMetadata {
    /// Build metadata with every code clamped to `META_CODE_LENGTH - 1` bytes.
    pub fn new(category: &str, course_number: &str, section: &str) -> Self {
        Self {
            category: clamp_text(category, META_CODE_LENGTH),
            course_number: clamp_text(course_number, META_CODE_LENGTH),
            section: clamp_text(section, META_CODE_LENGTH),
        }
    }

    /// The three codes in their persisted order.
    pub fn codes(&self) -> [&str; 3] {
        [&self.category, &self.course_number, &self.section]
    }
}

impl fmt::Display for ClassMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tCategory: {}", self.category)?;
        writeln!(f, "\tCourse Number: {}", self.course_number)?;
        write!(f, "\tSection: {}", self.section)
    }
}

/// Truncate `text` so it fits a fixed field of `width` bytes with one byte
/// left for the terminator. Cuts on a character boundary so multi-byte
/// input never produces invalid UTF-8.
pub fn clamp_text(text: &str, width: usize) -> String {
    let limit = width.saturating_sub(1);
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
