// src/bin/bode_plot.rs

use clap::Parser;
use env_logger::Env;
use log::info;
use std::error::Error;

use scope_csv_render::cli::BodeArgs;
use scope_csv_render::data_input::bode_parser::parse_bode_file;
use scope_csv_render::plot_framework::png_output_path;
use scope_csv_render::plot_functions::plot_bode::plot_bode;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = BodeArgs::parse();
    let table = parse_bode_file(&args.input)?;
    info!(
        "Read {} sweep points from '{}'",
        table.len(),
        args.input.display()
    );

    let output_file = png_output_path(&args.input, &args.output_dir, "_bode");
    plot_bode(&table, &output_file)?;
    info!("Bode plot saved as '{}'", output_file.display());
    Ok(())
}
