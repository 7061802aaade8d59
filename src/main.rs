use anyhow::{bail, Context};
use routerjig::{
    default_config_path, get_unit_label, init_logging, Config, Joint, JointState,
    SpacingStrategy, BUILD_DATE, VERSION,
};
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "Usage: routerjig [CONFIG] [--state FILE] [--save FILE]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    state: Option<PathBuf>,
    save: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--state" => args.state = Some(iter.next().context(USAGE)?.into()),
            "--save" => args.save = Some(iter.next().context(USAGE)?.into()),
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("Unknown option {}\n{}", other, USAGE),
            other => args.config = Some(other.into()),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("RouterJig {} ({})", VERSION, BUILD_DATE);

    let args = parse_args()?;
    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let joint = match &args.state {
        Some(path) => {
            let state = JointState::load_from_file(path)
                .with_context(|| format!("loading joint {}", path.display()))?;
            Joint::from_state(&state, &config)?
        }
        None => Joint::new(&config)?,
    };

    print_report(&joint);

    if let Some(path) = &args.save {
        joint
            .state()
            .save_to_file(path)
            .with_context(|| format!("saving joint {}", path.display()))?;
        info!("Saved joint to {}", path.display());
    }
    Ok(())
}

fn print_report(joint: &Joint) {
    let units = joint.units();
    println!("{}", joint.title());
    println!();

    println!("Cuts:");
    for cut in joint.spacing().cuts() {
        println!(
            "  {:>10} .. {:<10}",
            units.increments_to_string(cut.xmin, true),
            units.increments_to_string(cut.xmax, true)
        );
    }
    println!();

    println!("Router passes:");
    for pass in &joint.geometry().passes {
        println!(
            "  {:<4} {:>10.4}",
            pass.label,
            units.fixed_to_length(pass.position)
        );
    }
    println!();

    let geometry = joint.geometry();
    let label = get_unit_label(units.system);
    println!(
        "Fit: max gap {:.4} {}, max overlap {:.4} {}",
        geometry.max_gap / units.num_increments as f64,
        label,
        geometry.max_overlap / units.num_increments as f64,
        label
    );
    for warning in joint.fit_warnings() {
        println!("Warning: {}", warning);
    }
}
