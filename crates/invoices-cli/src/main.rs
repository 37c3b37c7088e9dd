mod commands;
mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use commands::normalize::NormalizeArgs;
use commands::validate_person::ValidatePersonArgs;
use invoices_validation::TextCasing;
use logging::{init_logging, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "invoices")]
#[command(about = "Form validation tools for the invoices application")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize free text the way form inputs do
    Normalize {
        /// Raw input
        text: String,

        /// Keep leading and trailing whitespace
        #[arg(long)]
        no_trim: bool,

        /// Keep whitespace runs as typed
        #[arg(long)]
        no_collapse: bool,

        /// Strip diacritics (č -> c)
        #[arg(long)]
        strip_diacritics: bool,

        #[arg(long, value_enum, default_value_t = Casing::None)]
        casing: Casing,

        /// Truncate to this many characters
        #[arg(long)]
        max_length: Option<usize>,
    },

    /// Regroup the digits of a value into space-separated blocks
    Group {
        /// Raw input; everything but digits is dropped
        raw: String,

        /// Block sizes, left to right
        #[arg(long, value_delimiter = ',', required = true)]
        blocks: Vec<usize>,
    },

    /// Check a bank account number with the modulo-11 checksum
    CheckAccount {
        number: String,
    },

    /// Validate a person record (YAML or JSON) as on form submit
    ValidatePerson {
        /// Person record file
        file: PathBuf,

        /// Extra message catalog (YAML or JSON) merged over the defaults
        #[arg(long)]
        messages: Option<PathBuf>,

        /// Culture for messages, e.g. cs-CZ (defaults to INVOICES_CULTURE or cs-CZ)
        #[arg(long)]
        culture: Option<String>,

        /// Run the input normalizers before validating
        #[arg(long)]
        normalize: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Casing {
    None,
    Lower,
    Upper,
    Title,
}

impl From<Casing> for TextCasing {
    fn from(casing: Casing) -> Self {
        match casing {
            Casing::None => TextCasing::None,
            Casing::Lower => TextCasing::Lower,
            Casing::Upper => TextCasing::Upper,
            Casing::Title => TextCasing::Title,
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Normalize {
            text,
            no_trim,
            no_collapse,
            strip_diacritics,
            casing,
            max_length,
        } => {
            let args = NormalizeArgs {
                trim: !no_trim,
                collapse_whitespace: !no_collapse,
                remove_diacritics: strip_diacritics,
                casing: casing.into(),
                max_length,
            };
            println!("{}", commands::normalize::text(&text, &args));
            Ok(true)
        }
        Commands::Group { raw, blocks } => {
            println!("{}", commands::normalize::group(&raw, &blocks));
            Ok(true)
        }
        Commands::CheckAccount { number } => Ok(commands::check_account::run(&number)),
        Commands::ValidatePerson {
            file,
            messages,
            culture,
            normalize,
        } => {
            let args = ValidatePersonArgs {
                file,
                messages,
                culture,
                normalize,
            };
            commands::validate_person::run(&args).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::new(cli.log_level.clone(), cli.json_logs))?;

    if run(cli).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
