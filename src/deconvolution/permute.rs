use crate::error::{MlsError, Result};

/// Scatter one captured period into Hadamard order
///
/// `perm[0]` receives the negated sum of the capture (the DC term of the
/// decomposition) and `perm[tag_s[i]]` receives `recorded[i]`. The capture
/// must be exactly one period long.
pub(crate) fn permute_signal(recorded: &[f64], tag_s: &[usize], perm: &mut [f64]) -> Result<()> {
    check_len(recorded.len(), tag_s.len())?;
    check_len(perm.len(), tag_s.len() + 1)?;

    perm[0] = -recorded.iter().sum::<f64>();
    for (&sample, &slot) in recorded.iter().zip(tag_s) {
        perm[slot] = sample;
    }
    Ok(())
}

/// Gather the transformed buffer back into lag order
///
/// `resp[i] = perm[tag_l[i]] / (P + 1)` for every lag, and the final slot
/// `resp[P]` is zero.
pub(crate) fn permute_response(perm: &[f64], tag_l: &[usize], resp: &mut [f64]) -> Result<()> {
    let period = tag_l.len();
    check_len(perm.len(), period + 1)?;
    check_len(resp.len(), period + 1)?;

    let scale = 1.0 / (period + 1) as f64;
    for (out, &slot) in resp.iter_mut().zip(tag_l) {
        *out = perm[slot] * scale;
    }
    resp[period] = 0.0;
    Ok(())
}

fn check_len(actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(MlsError::LengthMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permute_signal_places_dc_and_samples() {
        let tag_s = [5, 6, 7, 3, 1, 4, 2];
        let recorded = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let mut perm = vec![f64::NAN; 8];

        permute_signal(&recorded, &tag_s, &mut perm).unwrap();

        assert_eq!(perm, vec![-28.0, 5.0, 7.0, 4.0, 6.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_permute_signal_length_mismatch() {
        let tag_s = [5, 6, 7, 3, 1, 4, 2];
        let mut perm = vec![0.0; 8];
        let err = permute_signal(&[1.0; 6], &tag_s, &mut perm).unwrap_err();
        assert_eq!(
            err,
            MlsError::LengthMismatch {
                expected: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn test_permute_response_scales_and_pads() {
        let tag_l = [4, 2, 1, 5, 7, 6, 3];
        let perm: Vec<f64> = (0..8).map(|i| (i * 8) as f64).collect();
        let mut resp = vec![f64::NAN; 8];

        permute_response(&perm, &tag_l, &mut resp).unwrap();

        assert_eq!(resp, vec![4.0, 2.0, 1.0, 5.0, 7.0, 6.0, 3.0, 0.0]);
    }

    #[test]
    fn test_permute_response_checks_buffers() {
        let tag_l = [4, 2, 1, 5, 7, 6, 3];
        let mut resp = vec![0.0; 8];
        assert!(permute_response(&[0.0; 7], &tag_l, &mut resp).is_err());
        let mut short = vec![0.0; 7];
        assert!(permute_response(&[0.0; 8], &tag_l, &mut short).is_err());
    }
}
