//! In-memory roster. The roster owns its records outright; replacing it
//! (allocate or load) drops the previous storage, so there is never a
//! question of whether something must be released first.

use log::{debug, warn};
use thiserror::Error;

use crate::models::Student;

/// Upper bound on a single class. Keeps a typo like `3000000000` from
/// turning into a multi-gigabyte allocation.
pub const MAX_CLASS_SIZE: usize = 10_000;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("class size must be between 1 and {MAX_CLASS_SIZE}, got {0}")]
    InvalidCount(i64),
    #[error("could not allocate storage for {count} students")]
    Allocation { count: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The class members, in insertion order. `Empty` owns no storage.
pub enum Roster {
    #[default]
    Empty,
    Populated(Vec<Student>),
}

impl Roster {
    /// Allocate `count` zero-initialized slots. The caller replaces its
    /// current roster with the result; on error it should fall back to
    /// `Roster::Empty`.
    pub fn allocate(count: i64) -> Result<Self, RosterError> {
        let size = usize::try_from(count)
            .ok()
            .filter(|size| (1..=MAX_CLASS_SIZE).contains(size))
            .ok_or(RosterError::InvalidCount(count))?;

        let mut records = Vec::new();
        records
            .try_reserve_exact(size)
            .map_err(|_| RosterError::Allocation { count: size })?;
        records.resize_with(size, Student::default);
        debug!("allocated roster of {size} students");
        Ok(Roster::Populated(records))
    }

    /// Wrap already-decoded records. An empty list collapses to `Empty` so
    /// `count() == 0` always means "no data".
    pub fn from_records(records: Vec<Student>) -> Self {
        if records.is_empty() {
            Roster::Empty
        } else {
            Roster::Populated(records)
        }
    }

    pub fn count(&self) -> usize {
        self.students().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Roster::Empty)
    }

    pub fn students(&self) -> &[Student] {
        match self {
            Roster::Empty => &[],
            Roster::Populated(records) => records,
        }
    }

    /// Fill every slot in order from `next_student`, which receives the slot
    /// index. The first failure aborts the fill and empties the roster: a
    /// half-entered class is never left usable.
    pub fn fill_with<F, E>(&mut self, mut next_student: F) -> Result<(), E>
    where
        F: FnMut(usize) -> Result<Student, E>,
    {
        let Roster::Populated(records) = self else {
            return Ok(());
        };

        let mut failure = None;
        for (slot, record) in records.iter_mut().enumerate() {
            match next_student(slot) {
                Ok(student) => *record = student,
                Err(err) => {
                    failure = Some((slot, err));
                    break;
                }
            }
        }

        match failure {
            Some((slot, err)) => {
                warn!("fill aborted at slot {slot}, discarding roster");
                *self = Roster::Empty;
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// One display block per student, or `None` when there is nothing to
    /// show.
    pub fn display_lines(&self) -> Option<Vec<String>> {
        if self.is_empty() {
            return None;
        }
        Some(self.students().iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_produces_zeroed_slots() {
        let roster = Roster::allocate(4).unwrap();
        assert_eq!(roster.count(), 4);
        for student in roster.students() {
            assert_eq!(student, &Student::default());
            assert_eq!(student.gender_label(), "Other");
        }
    }

    #[test]
    fn allocate_rejects_out_of_range_counts() {
        for count in [0, -3, (MAX_CLASS_SIZE as i64) + 1] {
            assert!(matches!(
                Roster::allocate(count),
                Err(RosterError::InvalidCount(c)) if c == count
            ));
        }
    }

    #[test]
    fn reallocation_replaces_previous_storage() {
        let mut roster = Roster::allocate(5).unwrap();
        assert_eq!(roster.count(), 5);
        roster = Roster::allocate(2).unwrap();
        assert_eq!(roster.count(), 2);
    }

    #[test]
    fn fill_writes_every_slot_in_order() {
        let mut roster = Roster::allocate(3).unwrap();
        roster
            .fill_with(|slot| Ok::<_, ()>(Student::new(&format!("s{slot}"), 1, slot as u32)))
            .unwrap();
        let names: Vec<_> = roster.students().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["s0", "s1", "s2"]);
    }

    #[test]
    fn fill_failure_empties_roster_at_any_slot() {
        for failing in 0..4 {
            let mut roster = Roster::allocate(4).unwrap();
            let mut calls = 0;
            let err = roster
                .fill_with(|slot| {
                    calls += 1;
                    if slot == failing {
                        Err(slot)
                    } else {
                        Ok(Student::new("ok", 2, 9))
                    }
                })
                .unwrap_err();
            assert_eq!(err, failing);
            assert_eq!(calls, failing + 1, "no slot is read after the failure");
            assert_eq!(roster.count(), 0);
            assert!(roster.display_lines().is_none());
        }
    }

    #[test]
    fn empty_roster_has_no_display_lines() {
        assert!(Roster::Empty.display_lines().is_none());
        assert_eq!(Roster::from_records(Vec::new()), Roster::Empty);
    }
}
