//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffcode::compression::compress::compress;
use huffcode::compression::decompress::decompress;
use huffcode::compression::report::table;
use huffcode::tools::cli::{huffopts_init, Mode};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), std::io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The level is narrowed by -v below.
    // Logs go to stderr so they never mix with data sent to stdout with -c.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    let opts = huffopts_init();

    //----- Figure how what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Table => table(&opts),
        Mode::Zip => compress(&opts),
        Mode::Unzip => decompress(&opts),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}
