extern crate grupos as lib;

use chrono::{Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::calendar::{MonthGrid, Quarter};
use lib::events::Dispatcher;
use lib::ui::App;
use nix::sys::{signal, termios};
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gr",
    about = "Grupos - calendario de turnos A/B/C en la terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print a quarter non-interactively"
    )]
    pub show: bool,

    #[structopt(
        short = "q",
        long = "quarter",
        help = "quarter (1-4) printed by --show, defaults to the current one"
    )]
    pub quarter: Option<u32>,

    #[structopt(
        short = "d",
        long = "date",
        help = "print the group of a date (YYYY-MM-DD) and exit"
    )]
    pub date: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn print_quarter(
    config: &lib::config::Config,
    quarter: Quarter,
) -> Result<(), Box<dyn std::error::Error>> {
    let rotation = config.rotation()?;

    println!("{}\n", quarter.title());
    for &month in quarter.months().iter() {
        println!("{}", MonthGrid::new(month, config.year, &rotation));
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    if let Some(date) = args.date {
        let label = config.rotation()?.label_of(date)?;
        println!("{}: {}", date, label);
        return Ok(());
    }

    if args.show {
        let quarter = match args.quarter {
            Some(n) => Quarter::from_number(n)
                .ok_or_else(|| format!("'{}' is not a quarter (1-4)", n))?,
            None => Quarter::containing(Local::now().date_naive(), config.year),
        };
        return print_quarter(&config, quarter);
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("Grupos ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);
    signals_to_wait.thread_block()?;

    let rotation = config.rotation()?;
    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);

    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::new(&config, rotation);

    app.run(dispatcher, term)
}
