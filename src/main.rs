use clap::{Parser, Subcommand};
use env_logger::Env;
use hide::cli::{decode_file, encode_file, show_info, DecodeOptions, EncodeOptions};
use hide::crypto::KdfParams;
use hide::entropy::EntropyBackend;
use hide::{HideError, Level};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("HIDE_VERSION");
const PROFILE: &str = env!("HIDE_PROFILE");
const GIT_HASH: &str = env!("HIDE_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "hide")]
#[command(author, about = "Hide encrypted files inside PNG images", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Log every processing stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file inside an image
    #[command(alias = "e")]
    Encode {
        /// Carrier image
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// File to hide
        #[arg(short, long)]
        embed: PathBuf,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Bits per colour channel: low (1), medium (2) or high (4)
        #[arg(long, default_value = "low", value_parser = parse_level)]
        level: Level,

        /// PBKDF2 iteration count
        #[arg(long, default_value_t = KdfParams::DEFAULT_ROUNDS)]
        rounds: u32,

        /// Random source for salt, IV and payload offset
        #[arg(long, default_value = "os", value_parser = parse_entropy)]
        entropy: EntropyBackend,
    },

    /// Recover a hidden file
    #[command(alias = "d")]
    Decode {
        /// Image holding the hidden file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to the embedded name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// PBKDF2 iteration count used when encoding
        #[arg(long, default_value_t = KdfParams::DEFAULT_ROUNDS)]
        rounds: u32,
    },

    /// Show how much an image can hold
    #[command(alias = "i")]
    Info {
        /// Carrier image
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_entropy(s: &str) -> Result<EntropyBackend, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

/// Use the flag value or ask on stderr and read one line from stdin
fn resolve_password(password: Option<String>) -> Result<String, HideError> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("hide {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);

    let result = match command {
        Commands::Encode {
            input,
            output,
            embed,
            password,
            level,
            rounds,
            entropy,
        } => resolve_password(password).and_then(|password| {
            let options = EncodeOptions {
                password,
                level,
                rounds,
                entropy,
            };
            encode_file(&input, &output, &embed, &options).map(|summary| {
                println!(
                    "Hid {} ({} bytes) in {}",
                    summary.name,
                    summary.payload_len,
                    output.display()
                );
            })
        }),

        Commands::Decode {
            input,
            output,
            password,
            rounds,
        } => resolve_password(password).and_then(|password| {
            let options = DecodeOptions { password, rounds };
            decode_file(&input, output.as_deref(), &options).map(|written| {
                println!("Extracted to {}", written.display());
            })
        }),

        Commands::Info { file, json } => show_info(&file, json).map(|info| print!("{}", info)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
