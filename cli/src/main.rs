use clap::{Parser, Subcommand};
use rsmt_common::db::core::RouteDB;
use rsmt_common::db::parser::pins;
use rsmt_common::util::config::Config;
use rsmt_common::util::{check, generator, logger, visualization};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Route,
    Generate {
        #[arg(long, default_value_t = 100)]
        pins: usize,
        #[arg(long, default_value_t = 1000)]
        width: i64,
        #[arg(long, default_value_t = 1000)]
        height: i64,
        #[arg(long, default_value = "inputs/random.pins")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    match args.command.unwrap_or(Commands::Route) {
        Commands::Generate {
            pins,
            width,
            height,
            output,
        } => {
            prepare_output_dir(&output)?;
            generator::generate_random_pins(&output, pins, width, height)?;
            log::info!("Generated: {}", output);
        }
        Commands::Route => {
            if !Path::new(&config.input.pin_file).exists() {
                return Err(anyhow::anyhow!(
                    "Input pin file missing: {}",
                    config.input.pin_file
                ));
            }
            prepare_output_dir(&config.input.output_file)?;
            prepare_output_dir(&config.input.image_file)?;

            if run_route(&config).is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_route(config: &Config) -> anyhow::Result<()> {
    let mut db = RouteDB::new();

    log::info!("Parsing pins: {}", config.input.pin_file);
    pins::parse(&mut db, &config.input.pin_file)
        .map_err(|e| anyhow::anyhow!("Invalid pin file '{}': {}", config.input.pin_file, e))?;
    log::info!(
        "Parsed {} pins, die area {}x{}",
        db.num_terminals,
        db.die_area.width(),
        db.die_area.height()
    );

    let start = Instant::now();
    rsmt_router::route(&mut db, &config.router).map_err(|e| anyhow::anyhow!(e))?;
    let elapsed = start.elapsed();

    log::info!("NumRoutedPins = {}", db.num_terminals);
    log::info!("WireLength = {}", db.tree_cost());
    log::info!("Time = {:.3} secs", elapsed.as_secs_f64());

    log::info!("Generating routed visualization...");
    visualization::draw_tree(&db, &config.input.image_file, 1000, 1000);

    check::run(&db, config.router.rectilinearize)
        .map_err(|e| anyhow::anyhow!("Verification Failed: {}", e))?;

    log::info!("Writing result to {}", config.input.output_file);
    save_result(&db, &config.input.output_file)?;

    Ok(())
}

fn save_result(db: &RouteDB, filename: &str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "NumRoutedPins = {}", db.num_terminals)?;
    writeln!(file, "WireLength = {}", db.tree_cost())?;

    for edge in &db.tree {
        let s = db.position(edge.s);
        let t = db.position(edge.t);
        if s.y == t.y {
            writeln!(file, "H-line ({},{}) ({},{})", s.x, s.y, t.x, t.y)?;
        } else if s.x == t.x {
            writeln!(file, "V-line ({},{}) ({},{})", s.x, s.y, t.x, t.y)?;
        } else {
            // only reachable when rectilinearization is disabled
            writeln!(file, "Line ({},{}) ({},{})", s.x, s.y, t.x, t.y)?;
        }
    }

    Ok(())
}
