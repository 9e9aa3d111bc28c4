mod args;

use anyhow::Result;
use args::Args;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde_derive::*;

use thermogrid::cli::process_paths_par;
use thermogrid::region::{sample_full, SampleResult};
use thermogrid::stats::Stats;
use thermogrid::temperature::{decode, TemperatureGrid};

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;
    let Args {
        paths,
        width,
        height,
        scale,
    } = Args::from_cmd_line()?;

    let (stats, cumulative) = process_paths_par(paths)
        .into_par_iter()
        .map(|try_frame| -> Result<_> {
            let frame = try_frame?;
            let grid = decode(&frame.raw, width, height, scale)?;
            Ok(FrameStats::from_grid(&grid, frame.filename))
        })
        .try_fold(
            || (vec![], Stats::default()),
            |mut acc, try_frame| -> Result<_> {
                let item = try_frame?;
                acc.0.push(item);
                acc.1 += &acc.0.last().unwrap().stats;
                Ok(acc)
            },
        )
        .try_reduce(
            || (vec![], Stats::default()),
            |mut acc1, acc2| -> Result<_> {
                acc1.0.extend(acc2.0);
                acc1.1 += &acc2.1;
                Ok(acc1)
            },
        )?;

    #[derive(Debug, Serialize)]
    struct OutputJson {
        frame_stats: Vec<FrameStats>,
        cumulative: Stats,
    }

    serde_json::to_writer(
        std::io::stdout().lock(),
        &OutputJson {
            frame_stats: stats,
            cumulative,
        },
    )?;

    Ok(())
}

#[derive(Serialize, Debug)]
pub struct FrameStats {
    path: String,
    width: usize,
    height: usize,
    full: SampleResult,
    pub(crate) stats: Stats,
}

impl FrameStats {
    pub fn from_grid(grid: &TemperatureGrid, path: String) -> Self {
        use rayon::prelude::*;

        let full = sample_full(grid);
        let stats = grid
            .values()
            .into_par_iter()
            .fold(Stats::default, |mut acc, val| {
                acc += *val as f64;
                acc
            })
            .reduce(Stats::default, |mut acc, val| {
                acc += &val;
                acc
            });

        FrameStats {
            width: grid.width(),
            height: grid.height(),
            path,
            full,
            stats,
        }
    }
}
