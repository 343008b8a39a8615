use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use solinas_pairing_auth::{GeneratorConfig, SolinasGenerator};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "paramgen")]
#[command(about = "Type-A pairing parameter generator with Solinas-form group order", long_about = None)]
#[command(version)]
struct Args {
    /// Bit length of the group order r
    #[arg(short, long)]
    rbits: Option<u32>,

    /// Bit length of the field characteristic q
    #[arg(short, long)]
    qbits: Option<u32>,

    /// Seed of the deterministic search
    #[arg(short, long)]
    seed: Option<u64>,

    /// Bound on the number of r candidates
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Output file (defaults to a-seed=<seed>.param)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the block without writing a file
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

fn println_colored(color: Color, text: &str) {
    let mut stdout = io::stdout();
    execute!(stdout, SetForegroundColor(color), Print(text), ResetColor).ok();
    println!();
    stdout.flush().ok();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = GeneratorConfig::from_env().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        info!("Using default configuration");
        GeneratorConfig::default()
    });
    if let Some(rbits) = args.rbits {
        config.rbits = rbits;
    }
    if let Some(qbits) = args.qbits {
        config.qbits = qbits;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }

    if let Err(e) = config.validate() {
        println_colored(Color::Red, &format!("Configuration validation failed: {e}"));
        return Err(format!("Invalid configuration: {e}").into());
    }

    info!(
        rbits = config.rbits,
        qbits = config.qbits,
        seed = config.seed,
        "searching for parameters"
    );
    let generator = SolinasGenerator::new(config.search_config());
    let params = match generator.generate(config.rbits, config.qbits, config.seed) {
        Ok(params) => params,
        Err(e) => {
            println_colored(Color::Red, &format!("Generation failed: {e}"));
            return Err(e.into());
        }
    };

    let block = params.to_block();
    print!("{block}");

    if !args.dry_run {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from(format!("a-seed={}.param", config.seed)));
        fs::write(&path, &block)?;
        println_colored(Color::Green, &format!("Wrote {}", path.display()));
    }

    Ok(())
}
