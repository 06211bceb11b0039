mod cli;
mod input;
mod logging;
mod model;
mod pipeline;
mod plot;
mod report;

use clap::Parser;
use tracing::{error, info};

use crate::cli::{Cli, Command};
use crate::model::profile::EvalProfile;
use crate::pipeline::EvalError;
use crate::pipeline::compare::compare_pipelines;
use crate::pipeline::visualize::visualize_frame;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);
    if let Err(err) = run(&cli) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), EvalError> {
    let profile = match &cli.profile {
        Some(path) => {
            info!(path = %path.display(), "loading evaluation profile");
            EvalProfile::load(path)?
        }
        None => EvalProfile::default_v1(),
    };

    match &cli.command {
        Command::Test { xml_file, dataset } => {
            let ctx = cli.context(xml_file, dataset, profile);
            let curves = compare_pipelines(&ctx)?;
            info!(dataset = %dataset, pipelines = curves.len(), "comparison finished");
        }
        Command::Vis {
            xml_file,
            dataset,
            frame_num,
        } => {
            let ctx = cli.context(xml_file, dataset, profile);
            let figures = visualize_frame(&ctx, *frame_num)?;
            info!(dataset = %dataset, figures = figures.len(), "visualization finished");
        }
        Command::Other(_) => {
            println!("not implemented");
        }
    }

    Ok(())
}
