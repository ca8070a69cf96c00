//! One-dimensional input adapter.
//!
//! The analysis accepts anything that is a single ordered series of reals:
//! slices, arrays, `Vec` and `DVector`. Matrix-shaped input is rejected before
//! any work is done, whatever its shape.

use crate::errors::{DfaError, DfaResult};
use nalgebra::{DMatrix, DVector};
use std::borrow::Cow;

/// Conversion of caller data into a one-dimensional series.
pub trait AsSignal {
    /// Borrow or flatten the data as a single series.
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>>;
}

impl AsSignal for [f64] {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> AsSignal for [f64; N] {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl AsSignal for Vec<f64> {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl AsSignal for DVector<f64> {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl AsSignal for DMatrix<f64> {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        let (rows, cols) = self.shape();
        Err(DfaError::Dimensionality { rows, cols })
    }
}

impl AsSignal for [Vec<f64>] {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        match self {
            [row] => Ok(Cow::Borrowed(row.as_slice())),
            rows => Err(DfaError::Dimensionality {
                rows: rows.len(),
                cols: rows.iter().map(Vec::len).max().unwrap_or(0),
            }),
        }
    }
}

impl AsSignal for Vec<Vec<f64>> {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        self.as_slice().as_signal()
    }
}

impl<T: AsSignal + ?Sized> AsSignal for &T {
    fn as_signal(&self) -> DfaResult<Cow<'_, [f64]>> {
        (**self).as_signal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_and_vectors_are_borrowed() {
        let data = vec![1.0, 2.0, 3.0];
        assert!(matches!(data.as_signal().unwrap(), Cow::Borrowed(_)));
        assert_eq!(data.as_slice().as_signal().unwrap().len(), 3);
        assert_eq!([1.0, 2.0].as_signal().unwrap().as_ref(), &[1.0, 2.0]);

        let vector = DVector::from_vec(vec![4.0, 5.0]);
        assert_eq!(vector.as_signal().unwrap().as_ref(), &[4.0, 5.0]);
    }

    #[test]
    fn test_matrix_rejected_when_two_dimensional() {
        let matrix = DMatrix::from_element(3, 2, 1.0);
        assert_eq!(
            matrix.as_signal().unwrap_err(),
            DfaError::Dimensionality { rows: 3, cols: 2 }
        );
    }

    #[test]
    fn test_single_row_or_column_matrix_rejected() {
        let row = DMatrix::from_row_slice(1, 3, &[1.0, 2.0, 3.0]);
        assert_eq!(
            row.as_signal().unwrap_err(),
            DfaError::Dimensionality { rows: 1, cols: 3 }
        );

        let column = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        assert_eq!(
            column.as_signal().unwrap_err(),
            DfaError::Dimensionality { rows: 3, cols: 1 }
        );
    }

    #[test]
    fn test_nested_vectors() {
        let channels = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert!(matches!(
            channels.as_signal(),
            Err(DfaError::Dimensionality { rows: 2, cols: 2 })
        ));

        let single = vec![vec![1.0, 2.0, 3.0]];
        assert_eq!(single.as_signal().unwrap().len(), 3);

        let column = vec![vec![1.0], vec![2.0]];
        assert_eq!(
            column.as_signal().unwrap_err(),
            DfaError::Dimensionality { rows: 2, cols: 1 }
        );

        let ragged = vec![vec![1.0], vec![]];
        assert_eq!(
            ragged.as_signal().unwrap_err(),
            DfaError::Dimensionality { rows: 2, cols: 1 }
        );

        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(empty.as_signal().is_err());
    }
}
