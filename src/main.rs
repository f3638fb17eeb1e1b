//! Headless runner.
//!
//! Usage: `narjillos [SEED | EXPERIMENT.json | {DNA}]`
//!
//! Without arguments a random seed is used. Parameters are read from the file
//! named by `NARJILLOS_PARAMS`, if set. Logging is configured with `RUST_LOG`.

use std::env;
use std::error::Error;

use log::info;
use narjillos::simulation::experiment::Experiment;
use narjillos::simulation::params::Params;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = match env::var("NARJILLOS_PARAMS") {
        Ok(path) => Params::from_json_file(&path)?,
        Err(_) => Params::default(),
    };

    let mut experiment = match env::args().nth(1) {
        None => Experiment::new(rand::random(), params)?,
        Some(argument) if argument.ends_with(".json") => Experiment::load_from_file(&argument)?,
        Some(argument) if argument.trim_start().starts_with('{') => {
            Experiment::with_dna(rand::random(), params, &argument)?
        }
        Some(argument) => Experiment::new(argument.parse()?, params)?,
    };

    let save_path = format!("{}.json", experiment.id());
    let save_interval = experiment.ecosystem().params().save_interval;
    while experiment.tick() {
        let tick = experiment.ecosystem().tick_count();
        if save_interval > 0 && tick % save_interval == 0 {
            experiment.save_to_file(&save_path)?;
        }
    }

    info!("{}", experiment.status_line());
    experiment.save_to_file(&save_path)?;
    Ok(())
}
