use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use matrix_steps::{
    generate_trace,
    render::{legend, render_listing, render_step},
    Method, ReplayState, Trace,
};
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// gaussian, gauss-jordan (or ero) or inverse
    #[arg(short, long, default_value_t = Method::Gaussian)]
    pub method: Method,

    /// Show only this step (1-based) instead of the whole trace
    #[arg(short, long)]
    pub step: Option<usize>,

    /// Print the trace as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the reference listing with the active line marked
    #[arg(long)]
    pub listing: bool,

    /// Summarise every method
    #[arg(long)]
    pub all: bool,
}

fn print_state(state: ReplayState<'_>, with_listing: bool) {
    println!("[{}] {}", state.position(), render_step(state.current()));
    if with_listing {
        println!(
            "{}",
            render_listing(state.trace().method(), state.current().source_line)
        );
    }
    println!();
}

fn print_trace(trace: &Trace, args: &Args) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(trace).context("serializing trace")?;
        println!("{json}");
        return Ok(());
    }
    println!("{} ({} steps)", trace.method().title(), trace.len());
    println!("{}\n", legend());
    if let Some(step) = args.step {
        print_state(ReplayState::at(trace, step.saturating_sub(1)), args.listing);
        return Ok(());
    }
    let mut state = ReplayState::new(trace);
    loop {
        print_state(state, args.listing);
        if !state.can_go_forward() {
            break;
        }
        state = state.forward();
    }
    Ok(())
}

fn summarise_all() -> Result<()> {
    for method in Method::iter() {
        let trace = generate_trace(method).with_context(|| format!("generating {method} trace"))?;
        let last = trace.last();
        println!(
            "{:<13} {:>3} steps  {}",
            method.to_string(),
            trace.len(),
            last.equation
        );
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    if args.all {
        return summarise_all();
    }
    let trace = generate_trace(args.method)
        .with_context(|| format!("generating {} trace", args.method))?;
    print_trace(&trace, args)
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::debug!("Running with: {args:?}");
    if let Err(err) = run(&args) {
        eprintln!("could not build trace: {err:?}");
        process::exit(1)
    }
}
