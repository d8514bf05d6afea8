use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of a [`RowScheduler::claim`].
#[derive(Debug, PartialEq, Eq)]
pub enum RowClaim<T> {
    /// Row `index` now belongs to the caller, together with its payload.
    Row { index: u32, payload: T },
    /// Every row of the pass has been handed out.
    Done,
}

impl<T> RowClaim<T> {
    pub fn index(&self) -> Option<u32> {
        match self {
            Self::Row { index, .. } => Some(*index),
            Self::Done => None,
        }
    }
}

/// Hands out rows `0..resolution` one at a time to competing workers.
///
/// Each row is issued to exactly one caller; once the cursor reaches
/// `resolution` every further claim returns [`RowClaim::Done`]. The cursor
/// is the only state behind the lock.
///
/// A scheduler may carry one payload per row, handed out with its index in
/// the same critical section. The grid generator uses this to give each
/// worker exclusive ownership of the output slices for the rows it claims.
#[derive(Debug)]
pub struct RowScheduler<T = ()> {
    resolution: u32,
    cursor: Mutex<RowCursor<T>>,
}

#[derive(Debug)]
struct RowCursor<T> {
    next: u32,
    payloads: std::vec::IntoIter<T>,
}

impl RowScheduler<()> {
    /// A plain index scheduler with the cursor at 0.
    pub fn new(resolution: u32) -> Self {
        Self::with_rows(vec![(); resolution as usize])
    }

    /// Rewind the cursor to 0 for a new pass.
    pub fn reset(&self) {
        let mut cursor = self.lock();
        cursor.next = 0;
        cursor.payloads = vec![(); self.resolution as usize].into_iter();
    }
}

impl<T> RowScheduler<T> {
    /// One row per payload, in order; the resolution is `rows.len()`.
    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            resolution: rows.len() as u32,
            cursor: Mutex::new(RowCursor {
                next: 0,
                payloads: rows.into_iter(),
            }),
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Claim the next unissued row.
    pub fn claim(&self) -> RowClaim<T> {
        let mut cursor = self.lock();
        if cursor.next >= self.resolution {
            return RowClaim::Done;
        }
        match cursor.payloads.next() {
            Some(payload) => {
                let index = cursor.next;
                cursor.next += 1;
                RowClaim::Row { index, payload }
            }
            None => RowClaim::Done,
        }
    }

    /// Number of rows issued so far in this pass.
    pub fn claimed(&self) -> u32 {
        self.lock().next
    }

    // A worker can only panic outside the critical section, so a poisoned
    // cursor is still consistent.
    fn lock(&self) -> MutexGuard<'_, RowCursor<T>> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
