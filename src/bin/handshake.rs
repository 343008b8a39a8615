use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use solinas_pairing_auth::crypto::codec::trim;
use solinas_pairing_auth::{generate, PairingEngine, SecureRng, SeededRng, TypeA};
use solinas_pairing_auth::{Handshake, HandshakeOutcome};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "handshake")]
#[command(about = "Runs the anonymous vehicle authentication pipeline once", long_about = None)]
#[command(version)]
struct Args {
    /// Parameter block to load (generated on the fly when absent)
    #[arg(short, long, env = "PAIRING_PARAMS_FILE")]
    params: Option<PathBuf>,

    /// Bit length of r when generating
    #[arg(long, default_value = "512")]
    rbits: u32,

    /// Bit length of q when generating
    #[arg(long, default_value = "1024")]
    qbits: u32,

    /// Seed for parameter generation
    #[arg(short, long, default_value = "1")]
    seed: u64,

    /// Seed for the protocol randomness (OS entropy when absent)
    #[arg(long)]
    protocol_seed: Option<u64>,

    /// Initiator name
    #[arg(long, default_value = "vehicle-a")]
    initiator: String,

    /// Responder name
    #[arg(long, default_value = "vehicle-b")]
    responder: String,

    /// Plaintext sent from initiator to responder
    #[arg(short, long, default_value = "The quick brown fox jumps over the lazy dog")]
    message: String,
}

fn print_colored(color: Color, text: &str) {
    let mut stdout = io::stdout();
    execute!(stdout, SetForegroundColor(color), Print(text), ResetColor).ok();
    stdout.flush().ok();
}

fn println_colored(color: Color, text: &str) {
    print_colored(color, text);
    println!();
}

fn display_report(outcome: &HandshakeOutcome<TypeA>) {
    println!();
    println_colored(Color::Cyan, "Verification report");
    for (check, passed) in outcome.report.iter() {
        print!("  {check:<10} ");
        if passed {
            println_colored(Color::Green, "ok");
        } else {
            println_colored(Color::Red, "ERROR");
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let engine = match &args.params {
        Some(path) => {
            info!(path = %path.display(), "loading parameters");
            TypeA::from_block(&fs::read_to_string(path)?)?
        }
        None => {
            info!(
                rbits = args.rbits,
                qbits = args.qbits,
                seed = args.seed,
                "generating parameters"
            );
            TypeA::new(&generate(args.rbits, args.qbits, args.seed)?)?
        }
    };
    println_colored(
        Color::Cyan,
        &format!(
            "Engine {} with |r| = {} bits",
            engine.name(),
            engine.order().bits()
        ),
    );

    let outcome = match args.protocol_seed {
        Some(seed) => run(engine, &args, &mut SeededRng::from_seed(seed))?,
        None => run(engine, &args, &mut SecureRng::new())?,
    };
    display_report(&outcome);

    if outcome.report.is_valid() {
        println_colored(Color::Green, "Handshake verified");
        Ok(())
    } else {
        let failures: Vec<String> = outcome
            .report
            .failures()
            .iter()
            .map(|c| c.to_string())
            .collect();
        println_colored(Color::Red, &format!("Handshake failed: {}", failures.join(", ")));
        outcome.report.into_result()?;
        Ok(())
    }
}

fn run<R: rand_core::CryptoRngCore>(
    engine: TypeA,
    args: &Args,
    rng: &mut R,
) -> Result<HandshakeOutcome<TypeA>, Box<dyn std::error::Error>> {
    let handshake = Handshake::new(engine, rng);
    let initiator = handshake.enroll_named(&args.initiator)?;
    let responder = handshake.enroll_named(&args.responder)?;

    let outcome = handshake.run(&initiator, &responder, args.message.as_bytes(), rng)?;
    if let Ok(padded) = responder.plaintext(&outcome.responder) {
        if let Ok(text) = trim(&padded, args.message.len()) {
            println!(
                "{} -> {}: {}",
                args.initiator,
                args.responder,
                String::from_utf8_lossy(text)
            );
        }
    }
    Ok(outcome)
}
