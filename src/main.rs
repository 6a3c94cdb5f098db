// src/main.rs

use clap::Parser;
use env_logger::Env;
use log::info;
use std::error::Error;

use scope_csv_render::batch::process_directory;
use scope_csv_render::cli::BatchArgs;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = BatchArgs::parse();
    info!(
        "Scanning '{}' for scope exports, writing charts to '{}'",
        args.input_dir.display(),
        args.output_dir.display()
    );

    process_directory(&args.input_dir, &args.output_dir)?;
    Ok(())
}
