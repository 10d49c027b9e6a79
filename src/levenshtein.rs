// src/levenshtein.rs

//! Levenshtein distance by dynamic programming, in two flavours: one that keeps
//! the whole cost table and one that only ever holds two rows of it.
//!
//! Distances are `usize`. A distance never exceeds `max(m, n)` and both lengths
//! are slice lengths, so only the full table's cell count can overflow.

/// The complete `(m + 1) x (n + 1)` cost table for two sequences.
///
/// Cell `(i, j)` is the edit distance between the first `i` symbols of `a` and
/// the first `j` symbols of `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl DistanceTable {
    /// Fills the table row by row.
    ///
    /// # Panics
    ///
    /// Panics if `(m + 1) * (n + 1)` overflows `usize`. Running out of memory
    /// for the table aborts the process like any other failed allocation.
    pub fn build<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let len = match rows.checked_mul(cols) {
            Some(len) => len,
            None => panic!("distance table of {rows}x{cols} cells overflows usize"),
        };

        let mut cells = vec![0usize; len];
        for (j, cell) in cells[..cols].iter_mut().enumerate() {
            *cell = j;
        }
        for i in 1..rows {
            cells[i * cols] = i;
        }

        for i in 1..rows {
            let above = (i - 1) * cols;
            let here = i * cols;
            for j in 1..cols {
                let insert = cells[here + j - 1] + 1;
                let delete = cells[above + j] + 1;
                let substitute = cells[above + j - 1] + usize::from(a[i - 1] != b[j - 1]);
                cells[here + j] = insert.min(delete).min(substitute);
            }
        }

        DistanceTable { rows, cols, cells }
    }

    /// Number of rows, `m + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `n + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> usize {
        assert!(j < self.cols, "column {j} out of range for {} columns", self.cols);
        self.cells[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[usize] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// The bottom-right cell: the distance between the full sequences.
    pub fn distance(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }
}

/// Edit distance keeping the whole cost table. O(mn) time and space.
pub fn full_table_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    DistanceTable::build(a, b).distance()
}

/// Edit distance keeping two rows. O(mn) time, O(min(m, n)) space.
///
/// The shorter sequence is used as the row dimension; distance is symmetric so
/// the result is unchanged.
pub fn rolling_row_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for_each_row(outer, inner, |_, _| {})
}

/// Runs the two-row recurrence with `b` as the row dimension and hands each
/// finished row to `visit`, starting with the base row `0..=n`.
///
/// Row `i` passed to `visit` equals `DistanceTable::build(a, b).row(i)`.
/// Returns the last cell of the last row.
pub fn for_each_row<T, F>(a: &[T], b: &[T], mut visit: F) -> usize
where
    T: PartialEq,
    F: FnMut(usize, &[usize]),
{
    let n = b.len();
    let mut previous_row: Vec<usize> = vec![0; n + 1];
    let mut current_row: Vec<usize> = vec![0; n + 1];

    for i_idx in 0..=a.len() {
        if i_idx == 0 {
            for (j_idx, cell) in current_row.iter_mut().enumerate() {
                *cell = j_idx;
            }
        } else {
            current_row[0] = i_idx;
            for j_idx in 1..=n {
                // previous_row still holds row i - 1 in full; only current_row
                // has been overwritten up to j_idx - 1.
                current_row[j_idx] = if a[i_idx - 1] == b[j_idx - 1] {
                    previous_row[j_idx - 1]
                } else {
                    (current_row[j_idx - 1] + 1)
                        .min(previous_row[j_idx] + 1)
                        .min(previous_row[j_idx - 1] + 1)
                };
            }
        }
        visit(i_idx, &current_row);
        std::mem::swap(&mut previous_row, &mut current_row);
    }

    previous_row[n]
}
