//! Command-line arguments for both binaries.

use clap::Parser;
use std::path::PathBuf;

use crate::constants::DEFAULT_BODE_INPUT;

/// Peak, period and phase analysis of every `*.csv` scope export in a directory.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct BatchArgs {
    /// Directory scanned for `*.csv` files.
    #[arg(short, long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory the `<stem>.png` charts are written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Bode chart (gain and phase over frequency) of a `;`-separated sweep export.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct BodeArgs {
    /// Sweep CSV with `Frequenz`, `Ue`, `Ua` and `Phase` columns.
    #[arg(default_value = DEFAULT_BODE_INPUT)]
    pub input: PathBuf,

    /// Directory the `<stem>_bode.png` chart is written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}
