use std::path::Path;

use super::csv::{load_bits, load_indices, save_bits, save_indices, save_samples};
use crate::cache::MlsTables;
use crate::deconvolution::TagTables;
use crate::error::{MlsError, Result};
use crate::mls::MaximumLengthSequence;

pub const MLS_FILE: &str = "mls.csv";
pub const STIMULUS_FILE: &str = "generatedMLSSignal.csv";
pub const TAG_S_FILE: &str = "tagS.csv";
pub const TAG_L_FILE: &str = "tagL.csv";

/// Write the sequence, stimulus and both tag tables into `dir`
pub fn save_tables<P: AsRef<Path>>(dir: P, tables: &MlsTables) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    save_bits(dir.join(MLS_FILE), tables.mls().bits())?;
    save_samples(dir.join(STIMULUS_FILE), tables.stimulus())?;
    save_indices(dir.join(TAG_S_FILE), tables.tags().tag_s())?;
    save_indices(dir.join(TAG_L_FILE), tables.tags().tag_l())?;

    log::info!(
        "Saved tables for order {} to {}",
        tables.order(),
        dir.display()
    );
    Ok(())
}

/// Load tables written by `save_tables`
///
/// The order is inferred from the sequence length. Tag tables are checked
/// for length and bijectivity, then against the tables the loaded
/// sequence produces; the stimulus is re-derived from the bits.
pub fn load_tables<P: AsRef<Path>>(dir: P) -> Result<MlsTables> {
    let dir = dir.as_ref();

    let bits = load_bits(dir.join(MLS_FILE))?;
    let mls = MaximumLengthSequence::from_bits(bits).map_err(|e| {
        MlsError::InvalidData(format!("{}: {}", dir.join(MLS_FILE).display(), e))
    })?;

    let tag_s = load_indices(dir.join(TAG_S_FILE))?;
    let tag_l = load_indices(dir.join(TAG_L_FILE))?;
    let tags = TagTables::from_parts(mls.order(), tag_s, tag_l)?;
    tags.verify_against(&mls)?;

    log::info!("Loaded tables for order {} from {}", mls.order(), dir.display());
    MlsTables::from_parts(mls, tags)
}
