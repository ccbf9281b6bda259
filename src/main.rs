use std::error::Error;
use std::process::exit;

use byte_ring::config::{load_config, Session};
use byte_ring::dump::render;
use byte_ring::script::{run, Progress, StepOutcome};
use clap::Parser;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(name = "ringdemo", about = "Step through a circular byte buffer session")]
struct Args {
    /// TOML session file; the built-in demonstration runs when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Override the session's buffer capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Only report step results, without dumping the store
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut session = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            info!("No config given, running the built-in session");
            Session::default()
        }
    };
    if let Some(capacity) = args.capacity {
        session.capacity = capacity;
    }

    let result = run(&session, |progress| match progress {
        Progress::Started(buf) => {
            println!("start: capacity {}", buf.len());
            if !args.quiet {
                println!("{}\n", render(buf));
            }
        }
        Progress::Step { index, step, outcome, buffer } => {
            println!(
                "#{} {}: occupied {}, available {}",
                index,
                step,
                buffer.occupied_size(),
                buffer.available_size()
            );
            if let StepOutcome::Pulled(bytes) = outcome {
                println!("pulled b\"{}\"", bytes.escape_ascii());
            }
            if !args.quiet {
                println!("{}\n", render(buffer));
            }
        }
    });

    if let Err(e) = result {
        error!("{}", e);
        exit(e.buffer_error().to_status_code());
    }

    Ok(())
}
