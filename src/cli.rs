//! Helpers to parse CLI arguments in the accompanying
//! binaries.
//!
//! APIs here shouldn't be considered stable / used as a
//! library.

use std::fs;

use anyhow::{Context, Result};
pub use clap::{App, Arg};
use indicatif::{ProgressBar, ProgressStyle};
pub use inflector::Inflector;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

#[macro_export]
macro_rules! args_parser {
    ($name:expr) => {{
        $crate::cli::App::new($name)
            .version(clap::crate_version!())
            .author(clap::crate_authors!())
    }};
}

#[macro_export]
macro_rules! arg {
    ($name:expr) => {{
        use $crate::cli::Inflector;
        $crate::cli::Arg::with_name($name).value_name(&$name.to_screaming_snake_case())
    }};
}

#[macro_export]
macro_rules! opt {
    ($name:expr) => {{
        use $crate::cli::Inflector;
        $crate::cli::Arg::with_name($name)
            .long(&$name.to_kebab_case())
            .value_name(&$name.to_screaming_snake_case())
    }};
}

/// One raw frame file slurped off disk, ready for decoding.
pub struct FrameInput {
    pub filename: String,
    pub raw: Vec<u8>,
}

impl FrameInput {
    fn try_from_path(filename: String) -> Result<Self> {
        let raw = fs::read(&filename).with_context(|| format!("reading frame {}", filename))?;
        Ok(FrameInput { filename, raw })
    }
}

/// Read raw frame files in parallel with a progress bar.
pub fn process_paths_par(paths: Vec<String>) -> impl IntoParallelIterator<Item = Result<FrameInput>> {
    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {wide_bar:cyan/blue} {pos:>7}/{len:7}"),
    );

    paths
        .into_par_iter()
        .map(FrameInput::try_from_path)
        .inspect(move |_| bar.inc(1))
}
