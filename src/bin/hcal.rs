extern crate holical as lib;

use flexi_logger::{Duplicate, FileSpec, Logger};
use lib::prompt::Prompt;
use lib::config::Config;
use lib::{calendar, source, ErrorKind, HolidayStore};
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "hcal",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Month calendar with holidays loaded from a CSV file."
)]
pub struct Args {
    #[structopt(help = "year to show, asked for if missing")]
    pub year: Option<i32>,

    #[structopt(help = "month to show (1-12), asked for if missing")]
    pub month: Option<i64>,

    #[structopt(
        name = "FILE",
        short = "f",
        long = "holidays",
        help = "holiday file to load instead of the configured candidates",
        parse(from_os_str)
    )]
    pub holidays: Option<PathBuf>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(
        short = "d",
        long = "download",
        help = "download the official holiday list before loading it"
    )]
    pub download: bool,

    #[structopt(long = "no-color", help = "do not colour holidays and sundays")]
    pub no_color: bool,
}

fn download_and_load(config: &Config, store: &mut HolidayStore) -> lib::Result<(PathBuf, usize)> {
    println!("Downloading holiday data from {}", config.download_url);
    source::download(&config.download_url, &config.download_target)?;

    let count = source::load_from_path(store, &config.download_target)?;
    Ok((config.download_target.clone(), count))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "info"
    } else {
        "warn"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file.clone() {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .duplicate_to_stderr(Duplicate::Warn);
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        eprintln!("hcal ran into a fatal error!");
        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());

    let mut store = config.holiday_store();
    let loaded = if args.download {
        download_and_load(&config, &mut store)
    } else {
        let loaded = match &args.holidays {
            Some(path) => {
                source::load_from_path(&mut store, path).map(|count| (path.clone(), count))
            }
            None => source::load_first_available(&mut store, config.holiday_files.as_slice()),
        };

        match loaded {
            Err(e) if e.is_source_unavailable() && termion::is_tty(&io::stdin()) => {
                if prompt.confirm("No holiday file found. Download the official list? (y/n): ")? {
                    download_and_load(&config, &mut store)
                } else {
                    Err(e)
                }
            }
            loaded => loaded,
        }
    };

    match loaded {
        Ok((path, count)) => println!("Loaded {} holidays from '{}'", count, path.display()),
        Err(e) if e.is_source_unavailable() || matches!(e.kind, ErrorKind::Download) => {
            log::warn!("{}", e);
            println!("Continuing without holiday data.");
        }
        Err(e) => return Err(e.into()),
    }

    let year_month = match args.year {
        Some(year) => Ok(year),
        None => prompt.ask_year(),
    }
    .and_then(|year| {
        let month = match args.month {
            Some(month) => calendar::validate_month(month),
            None => prompt.ask_month(),
        }?;
        Ok((year, month))
    });

    let (year, month) = match year_month {
        Ok(ym) => ym,
        Err(e) if matches!(e.kind, ErrorKind::InvalidInput) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let color = config.color && !args.no_color && termion::is_tty(&io::stdout());
    let renderer = config.renderer().color(color);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.render(&mut out, year, month, &store)?;
    out.flush()?;

    Ok(())
}
