#![forbid(unsafe_code)]

//! Real-time playback of the console demo in the terminal.

use std::env;
use std::process;
use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use typereel_demo::cli::{self, Command, Options};
use typereel_demo::console::{ConsoleDemo, SURFACE_CODE, SURFACE_STYLE};
use typereel_engine::StreamConfig;
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);
const PLAYBACK_DEADLINE: Duration = Duration::from_secs(120);

fn main() {
    match cli::parse(env::args().skip(1)) {
        Ok(Command::Help) => print!("{}", cli::help_text()),
        Ok(Command::Version) => println!("typereel-demo {}", cli::version()),
        Ok(Command::Run(options)) => run(&options),
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("try --help");
            process::exit(2);
        }
    }
}

fn run(options: &Options) {
    if !options.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let config = StreamConfig::new()
        .chars_per_second(options.speed)
        .seed(options.seed);
    let mut demo = ConsoleDemo::with_config(config);

    tracing::info!(speed = options.speed, "starting playback");
    demo.trigger();

    let started = Instant::now();
    let mut last = started;
    while !demo.is_quiescent() {
        thread::sleep(FRAME);
        let now = Instant::now();
        demo.tick(now - last);
        last = now;
        if started.elapsed() > PLAYBACK_DEADLINE {
            tracing::warn!("playback deadline exceeded, aborting");
            demo.abort();
            break;
        }
    }

    if let Some(style) = demo.stage().surface(SURFACE_STYLE) {
        println!("--- stylesheet ---");
        println!("{}", style.text());
    }
    if let Some(code) = demo.stage().surface(SURFACE_CODE) {
        println!("--- component ---");
        println!("{}", code.text());
    }

    if demo.reset() {
        tracing::info!("console restored to its initial state");
    }
}
