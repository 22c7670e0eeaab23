use std::error::Error;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use tracing_subscriber::EnvFilter;

use warranty_card::config::ServiceConfig;
use warranty_card::generator::DocumentGenerator;
use warranty_card::inspect::inspect_card;
use warranty_card::record::WarrantyRecord;

/// Generates single-page warranty cards, either over HTTP or one at a time.
///
/// Log verbosity follows `RUST_LOG` and defaults to `info`.
#[derive(Parser)]
#[command(author, version, about = "Warranty card PDF service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct GeneratorArgs {
    /// Directory generated cards are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Logo image embedded in the top-left corner when present.
    #[arg(long = "logo")]
    logo_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve `POST /generate_pdf` and the generated files.
    #[command(name = "serve")]
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Render the record in a JSON file and print its download URL.
    #[command(name = "render")]
    Render {
        /// JSON file holding the warranty record.
        #[arg(long, short)]
        input: PathBuf,

        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Print the text lines of a generated card.
    #[command(name = "inspect")]
    Inspect {
        /// Generated PDF to read.
        file: PathBuf,
    },
}

fn service_config(args: GeneratorArgs) -> ServiceConfig {
    ServiceConfig::default()
        .with_output_dir(args.output_dir)
        .with_logo_path(args.logo_path)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { bind, generator } => {
            let config = service_config(generator).with_bind(bind);
            warranty_card::server::serve(config).await
        }
        Commands::Render { input, generator } => render(&input, service_config(generator)),
        Commands::Inspect { file } => inspect(&file),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn render(input: &Path, config: ServiceConfig) -> warranty_card::Result<()> {
    let record = WarrantyRecord::from_json(std::fs::read(input)?)?;
    let document = DocumentGenerator::new(config.generator)?.generate(&record)?;
    info!("Wrote {}", document.path().display());
    println!("{}", document.download_url());
    Ok(())
}

fn inspect(file: &Path) -> warranty_card::Result<()> {
    let inspection = inspect_card(&std::fs::read(file)?)?;
    for line in &inspection.text_lines {
        println!("{}", line);
    }
    if inspection.image_count > 0 {
        println!("({} image(s))", inspection.image_count);
    }
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
