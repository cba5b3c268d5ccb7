//! Fixed-width byte layout for students and class metadata.
//!
//! ```text
//! record:   | name [u8; NAME_LENGTH] | gender i32 LE | age u32 LE |
//! metadata: | category | course number | section |   (META_CODE_LENGTH each)
//! ```
//!
//! Text fields are zero padded and always keep at least one trailing zero
//! byte. Integer widths and byte order are fixed so a file written on one
//! machine reads back identically on another.

use crate::models::{clamp_text, ClassMetadata, Student, META_CODE_LENGTH, NAME_LENGTH};

use super::StoreError;

const GENDER_OFFSET: usize = NAME_LENGTH;
const AGE_OFFSET: usize = GENDER_OFFSET + 4;

/// Bytes per student record.
pub const RECORD_SIZE: usize = AGE_OFFSET + 4;
/// Bytes of the leading record count in the full format.
pub const COUNT_SIZE: usize = 4;
/// Bytes of the metadata trailer in the full format.
pub const METADATA_SIZE: usize = 3 * META_CODE_LENGTH;

/// Encode `student` into a `RECORD_SIZE` slot.
pub fn encode_student(student: &Student, slot: &mut [u8]) {
    write_text(&mut slot[..NAME_LENGTH], &student.name);
    slot[GENDER_OFFSET..AGE_OFFSET].copy_from_slice(&student.gender.to_le_bytes());
    slot[AGE_OFFSET..RECORD_SIZE].copy_from_slice(&student.age.to_le_bytes());
}

pub fn decode_student(slot: &[u8]) -> Result<Student, StoreError> {
    Ok(Student {
        name: read_text(&slot[..NAME_LENGTH], "name")?,
        gender: i32::from_le_bytes(le_bytes(&slot[GENDER_OFFSET..AGE_OFFSET])),
        age: u32::from_le_bytes(le_bytes(&slot[AGE_OFFSET..RECORD_SIZE])),
    })
}

/// Lay out every student back to back, ready for a single write.
pub fn encode_records(students: &[Student]) -> Vec<u8> {
    let mut block = vec![0u8; students.len() * RECORD_SIZE];
    for (student, slot) in students.iter().zip(block.chunks_exact_mut(RECORD_SIZE)) {
        encode_student(student, slot);
    }
    block
}

/// Decode a block read in one piece. Trailing bytes that do not fill a
/// whole record are ignored; callers decide whether that is worth a warning.
pub fn decode_records(block: &[u8]) -> Result<Vec<Student>, StoreError> {
    block.chunks_exact(RECORD_SIZE).map(decode_student).collect()
}

pub fn encode_metadata(metadata: Option<&ClassMetadata>) -> [u8; METADATA_SIZE] {
    let mut block = [0u8; METADATA_SIZE];
    if let Some(metadata) = metadata {
        for (code, field) in metadata
            .codes()
            .into_iter()
            .zip(block.chunks_exact_mut(META_CODE_LENGTH))
        {
            write_text(field, code);
        }
    }
    block
}

/// All-blank metadata means none was ever entered.
pub fn decode_metadata(block: &[u8]) -> Result<Option<ClassMetadata>, StoreError> {
    let mut fields = block.chunks_exact(META_CODE_LENGTH);
    let mut next = |name| read_text(fields.next().unwrap_or_default(), name);
    let metadata = ClassMetadata {
        category: next("category")?,
        course_number: next("course number")?,
        section: next("section")?,
    };
    if metadata.codes().iter().all(|code| code.is_empty()) {
        Ok(None)
    } else {
        Ok(Some(metadata))
    }
}

pub fn encode_count(count: u32) -> [u8; COUNT_SIZE] {
    count.to_le_bytes()
}

pub fn decode_count(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(le_bytes(bytes))
}

fn write_text(field: &mut [u8], text: &str) {
    field.fill(0);
    let clamped = clamp_text(text, field.len());
    field[..clamped.len()].copy_from_slice(clamped.as_bytes());
}

fn read_text(field: &[u8], name: &'static str) -> Result<String, StoreError> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8(field[..end].to_vec()).map_err(|_| StoreError::InvalidText { field: name })
}

fn le_bytes<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout_is_explicit() {
        let mut slot = [0xAAu8; RECORD_SIZE];
        encode_student(&Student::new("Ana", -2, 258), &mut slot);

        assert_eq!(&slot[..3], b"Ana");
        assert!(slot[3..NAME_LENGTH].iter().all(|&b| b == 0));
        assert_eq!(&slot[GENDER_OFFSET..AGE_OFFSET], &[0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&slot[AGE_OFFSET..], &[0x02, 0x01, 0x00, 0x00]);
        assert_eq!(RECORD_SIZE, NAME_LENGTH + 8);
    }

    #[test]
    fn full_width_name_keeps_terminator() {
        let mut slot = [0u8; RECORD_SIZE];
        let student = Student {
            name: "ABCDEFGHIJKL".to_string(),
            gender: 1,
            age: 1,
        };
        encode_student(&student, &mut slot);
        assert_eq!(slot[NAME_LENGTH - 1], 0);
        assert_eq!(decode_student(&slot).unwrap().name, "ABCDEFGHI");
    }

    #[test]
    fn records_decode_in_order() {
        let students = vec![Student::new("a", 1, 10), Student::new("b", 2, 11)];
        let mut block = encode_records(&students);
        block.extend_from_slice(&[1, 2, 3]);
        assert_eq!(decode_records(&block).unwrap(), students);
    }

    #[test]
    fn blank_metadata_reads_as_none() {
        let block = encode_metadata(None);
        assert_eq!(decode_metadata(&block).unwrap(), None);

        let meta = ClassMetadata::new("CSC", "215", "02");
        let block = encode_metadata(Some(&meta));
        assert_eq!(decode_metadata(&block).unwrap(), Some(meta));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut slot = [0u8; RECORD_SIZE];
        slot[0] = 0xFF;
        assert!(matches!(
            decode_student(&slot),
            Err(StoreError::InvalidText { field: "name" })
        ));
    }
}
