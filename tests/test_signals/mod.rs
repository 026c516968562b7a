#![allow(dead_code)]

use std::path::PathBuf;

use mlsdeconv::{MlsOrder, MlsTables};

/// Tables for a known-good order
pub fn tables(order: u32) -> MlsTables {
    MlsTables::build(MlsOrder::new(order).unwrap()).unwrap()
}

/// Periodic steady-state capture of `stimulus` through an FIR system
///
/// `output[i] = sum_k taps[k] * stimulus[i - delay - k]`, indices modulo
/// the period.
pub fn filtered_capture(stimulus: &[f64], taps: &[f64], delay: usize) -> Vec<f64> {
    let period = stimulus.len();
    (0..period)
        .map(|i| {
            taps.iter()
                .enumerate()
                .map(|(k, &tap)| tap * stimulus[(i + period - (delay + k) % period) % period])
                .sum()
        })
        .collect()
}

/// Indices of the `n` largest-magnitude entries, strongest first
pub fn strongest_lags(resp: &[f64], n: usize) -> Vec<usize> {
    let mut lags: Vec<usize> = (0..resp.len()).collect();
    lags.sort_by(|&a, &b| resp[b].abs().total_cmp(&resp[a].abs()));
    lags.truncate(n);
    lags
}

/// Fresh scratch directory unique to this process and test
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mlsdeconv_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
