use crate::error::{MlsError, Result};

/// In-place fast Walsh-Hadamard transform (unnormalized)
///
/// The block size halves every stage, starting at the full length. Each
/// butterfly replaces `(a, b)` with `(a + b, a - b)`. The length must be a
/// power of two.
pub fn fast_hadamard_transform(data: &mut [f64]) -> Result<()> {
    let len = data.len();
    if !len.is_power_of_two() {
        return Err(MlsError::LengthMismatch {
            expected: len.next_power_of_two(),
            actual: len,
        });
    }

    let mut block = len;
    while block > 1 {
        let half = block >> 1;
        for start in 0..half {
            for i in (start..len).step_by(block) {
                let a = data[i];
                let b = data[i + half];
                data[i] = a + b;
                data[i + half] = a - b;
            }
        }
        block = half;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn walsh_sign(row: usize, col: usize) -> f64 {
        if (row & col).count_ones() % 2 == 0 { 1.0 } else { -1.0 }
    }

    #[test]
    fn test_matches_direct_transform() {
        let input: Vec<f64> = (0..16).map(|i| ((i * 7) % 5) as f64 - 1.5).collect();
        let mut fast = input.clone();
        fast_hadamard_transform(&mut fast).unwrap();

        for (row, &value) in fast.iter().enumerate() {
            let direct: f64 = input
                .iter()
                .enumerate()
                .map(|(col, &x)| walsh_sign(row, col) * x)
                .sum();
            assert_abs_diff_eq!(value, direct, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_impulse_transforms_to_ones() {
        let mut data = vec![0.0; 8];
        data[0] = 1.0;
        fast_hadamard_transform(&mut data).unwrap();
        assert_eq!(data, vec![1.0; 8]);
    }

    #[test]
    fn test_applying_twice_scales_by_length() {
        let input = vec![3.0, -1.0, 0.5, 2.0];
        let mut data = input.clone();
        fast_hadamard_transform(&mut data).unwrap();
        fast_hadamard_transform(&mut data).unwrap();
        for (out, x) in data.iter().zip(&input) {
            assert_abs_diff_eq!(*out, 4.0 * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let mut data = vec![0.0; 7];
        assert_eq!(
            fast_hadamard_transform(&mut data),
            Err(MlsError::LengthMismatch {
                expected: 8,
                actual: 7
            })
        );
    }
}
