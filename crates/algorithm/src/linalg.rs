//! Small dense matrix helpers.

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// Returns `None` when the matrix is empty, not square or numerically singular.
pub(crate) fn invert(matrix: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = matrix.len();
    if n == 0 || matrix.iter().any(|row| row.len() != n) {
        return None;
    }

    // Augment with the identity: [A | I]
    let mut aug: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.clone();
            r.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
            r
        })
        .collect();

    for col in 0..n {
        let pivot = (col..n).max_by(|&a, &b| aug[a][col].abs().total_cmp(&aug[b][col].abs()))?;
        if aug[pivot][col].abs() < 1e-12 {
            return None;
        }
        aug.swap(col, pivot);

        let scale = aug[col][col];
        for value in aug[col].iter_mut() {
            *value /= scale;
        }

        let pivot_row = aug[col].clone();
        for (row, values) in aug.iter_mut().enumerate() {
            let factor = values[col];
            if row != col && factor != 0.0 {
                for (value, p) in values.iter_mut().zip(&pivot_row) {
                    *value -= factor * p;
                }
            }
        }
    }

    Some(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}

/// Symmetric Toeplitz matrix from its first row.
pub(crate) fn toeplitz(first_row: &[f64]) -> Vec<Vec<f64>> {
    let n = first_row.len();
    (0..n)
        .map(|i| (0..n).map(|j| first_row[i.abs_diff(j)]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_2x2() {
        let inv = invert(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
        assert!((inv[0][0] - 0.6).abs() < 1e-12);
        assert!((inv[0][1] + 0.7).abs() < 1e-12);
        assert!((inv[1][0] + 0.2).abs() < 1e-12);
        assert!((inv[1][1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_invert_needs_pivoting() {
        let inv = invert(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(inv, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_invert_singular() {
        assert!(invert(&[vec![1.0, 2.0], vec![2.0, 4.0]]).is_none());
        assert!(invert(&[]).is_none());
    }

    #[test]
    fn test_toeplitz() {
        let m = toeplitz(&[3.0, 2.0, 1.0]);
        assert_eq!(m[0], vec![3.0, 2.0, 1.0]);
        assert_eq!(m[1], vec![2.0, 3.0, 2.0]);
        assert_eq!(m[2], vec![1.0, 2.0, 3.0]);
    }
}
