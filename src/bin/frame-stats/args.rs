use anyhow::Result;
use clap::value_t_or_exit;
use thermogrid::temperature::DEFAULT_SCALE;
use thermogrid::{arg, args_parser, opt};

pub struct Args {
    pub paths: Vec<String>,
    pub width: usize,
    pub height: usize,
    pub scale: f32,
}

impl Args {
    pub fn from_cmd_line() -> Result<Args> {
        let matches = args_parser!("frame-stats")
            .about("Compute temperature stats from raw sensor frames.")
            .arg(
                opt!("width")
                    .short("W")
                    .required(true)
                    .help("Frame width in pixels"),
            )
            .arg(
                opt!("height")
                    .short("H")
                    .required(true)
                    .help("Frame height in pixels"),
            )
            .arg(
                opt!("scale")
                    .short("s")
                    .help("Fixed-point divisor for the device mode. Default is 64"),
            )
            .arg(
                arg!("paths")
                    .required(true)
                    .multiple(true)
                    .help("Raw frame paths"),
            )
            .get_matches();

        let paths = matches
            .values_of("paths")
            .unwrap()
            .map(|f| f.into())
            .collect();
        let width = value_t_or_exit!(matches.value_of("width"), usize);
        let height = value_t_or_exit!(matches.value_of("height"), usize);
        let scale = matches
            .is_present("scale")
            .then(|| value_t_or_exit!(matches.value_of("scale"), f32))
            .unwrap_or(DEFAULT_SCALE);

        Ok(Args {
            paths,
            width,
            height,
            scale,
        })
    }
}
