use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn, LevelFilter};

use crate::huffman_coding::MergeStrategy;

/// Table, Zip, Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Table,
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Define the two output channels
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Report the code table, compress, or decompress
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// How the tree builder finds the two lightest nodes
    pub strategy: MergeStrategy,
    /// Verbosity of user information
    pub verbose: LevelFilter,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            strategy: MergeStrategy::LinearScan,
            verbose: LevelFilter::Warn,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman code builder and file compressor",
    long_about = "
    Counts the bytes in each input file, builds a huffman tree by repeatedly merging the two
    least frequent nodes, and reads each byte's codeword off the tree. The code table can be
    printed, or used to compress the file (to <file>.huf) and decompress it again."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Compress the input files (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Print the code table for each input file instead of compressing it
    #[clap(short = 't', long = "table", conflicts_with_all = &["compress", "decompress"])]
    table: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Merge nodes using a priority queue instead of a linear scan (same codes)
    #[clap(long = "heap")]
    heap: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,
}

/// Parse the process arguments into HuffOpts.
pub fn huffopts_init() -> HuffOpts {
    opts_from_args(Args::parse())
}

/// Put command line information from CLAP into our internal structure, and set the log level.
pub fn opts_from_args(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();
    opts.files = args.files;

    opts.op_mode = if args.table {
        Mode::Table
    } else if args.decompress {
        Mode::Unzip
    } else {
        Mode::Zip
    };

    opts.force_overwrite = args.force;
    opts.keep_input_files = args.keep;

    if args.stdout {
        opts.output = Output::Stdout
    };

    if args.heap {
        opts.strategy = MergeStrategy::Heap
    };

    // Set the log level
    opts.verbose = match args.v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log::set_max_level(opts.verbose);

    // Below we report initialization status to the user
    info!("---- huffcode Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if opts.files.is_empty() {
        warn!("No input files given")
    }
    opts.files
        .iter()
        .for_each(|f| info!("Getting input from the file {}", f));
    info!("Sending output to {}", opts.output);
    info!("Merge strategy {:?}", opts.strategy);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- huffcode Initialization End ----\n");
    opts
}
