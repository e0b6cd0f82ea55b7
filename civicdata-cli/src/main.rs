use civicdata::generator::{VERSION_FILE, ZIP_INDEX_FILE};
use civicdata::validation::check_dataset;
use civicdata::{
    DataProvider, FileProvider, Generator, GitPublisher, NoopPublisher, Publisher, StaticProvider,
    UpdatePipeline,
};
use clap::{Parser, Subcommand};
use std::process;

/// civicdata CLI — assemble, validate, and publish political-reference datasets
#[derive(Parser)]
#[command(name = "civicdata", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full update: collect, validate, generate, version, publish
    Update {
        /// Output directory for generated JSON artifacts
        #[arg(long, default_value = "api/v1")]
        out_dir: String,
        /// Read the dataset from a JSON file instead of the built-in placeholder data
        #[arg(long)]
        input: Option<String>,
        /// Git repository root used for commit/push
        #[arg(long, default_value = ".")]
        repo_dir: String,
        /// Generate artifacts but skip the git commit/push step
        #[arg(long)]
        skip_publish: bool,
    },

    /// Check a dataset JSON file against the expected shape
    Validate {
        /// Path to the dataset file
        file: String,
    },

    /// Show the published version stamp and ZIP index, if present
    Status {
        /// Output directory holding generated artifacts
        #[arg(long, default_value = "api/v1")]
        out_dir: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("Run failed: {e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Update {
            out_dir,
            input,
            repo_dir,
            skip_publish,
        } => {
            let provider: Box<dyn DataProvider> = match input {
                Some(path) => Box::new(FileProvider::new(path)),
                None => Box::new(StaticProvider),
            };
            let publisher: Box<dyn Publisher> = if skip_publish {
                Box::new(NoopPublisher)
            } else {
                Box::new(GitPublisher::new(repo_dir))
            };
            let generator = Generator::new(out_dir)?;
            log::info!("Writing artifacts to {}", generator.out_dir().display());
            UpdatePipeline::new(provider, generator, publisher).run()?;
        }

        Command::Validate { file } => {
            let data = FileProvider::new(&file).collect_political_data()?;
            match check_dataset(&data) {
                Ok(()) => println!("{file}: valid"),
                Err(msg) => return Err(format!("{file}: {msg}").into()),
            }
        }

        Command::Status { out_dir } => {
            let generator = Generator::open(out_dir);
            match generator.read_json(VERSION_FILE)? {
                Some(version) => println!("{}", serde_json::to_string_pretty(&version)?),
                None => println!("No version artifact found"),
            }
            if let Some(index) = generator.read_json(ZIP_INDEX_FILE)? {
                println!("{}", serde_json::to_string_pretty(&index)?);
            }
        }
    }

    Ok(())
}
