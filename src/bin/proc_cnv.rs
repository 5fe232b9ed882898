use anyhow::{bail, Context};
use clap::Parser;
use ctdproc::cast::Position;
use ctdproc::options::{ColumnPolicy, ProcOptionsBuilder};
use ctdproc::proc::proc_cnv;
use ctdproc::profile::{write_cast_csv, ProfileStack};
use ctdproc::thermo::{ABSOLUTE_SALINITY, CONSERVATIVE_TEMPERATURE};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Bin, interpolate and derive TEOS-10 variables for Sea-Bird CTD casts",
    long_about = None,
    version = env!("CTDPROC_VERSION")
)]
struct Cli {
    /// Sea-Bird .cnv files, processed in the given order
    #[clap(required = true)]
    cnv_paths: Vec<PathBuf>,

    /// Extra columns to keep (comma-separated, e.g. "oxygen,par")
    #[clap(short, long, value_delimiter = ',')]
    keep: Vec<String>,

    /// Keep the upcast leg instead of discarding it
    #[clap(long, action)]
    keep_upcast: bool,

    /// Fail when a column passed to --keep is missing from a cast
    #[clap(long, action)]
    strict: bool,

    /// Vertical bin width in metres
    #[clap(long, default_value = "1.0")]
    bin_width: f64,

    /// Station latitude, overrides the file header
    #[clap(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Station longitude, overrides the file header
    #[clap(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Stacked profiles CSV (default: stdout)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Mean CT/SA profile over all casts, semicolon-separated CSV
    #[clap(long)]
    mean_profile: Option<PathBuf>,

    /// Variable drawn by --show-plot and --save-plot
    #[clap(long, default_value = "SA")]
    plot_variable: String,

    #[clap(long, action)]
    show_plot: bool,

    /// Save the profile plot to an HTML file
    #[clap(long)]
    save_plot: Option<PathBuf>,
}

fn entrypoint() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut builder = ProcOptionsBuilder::default();
    builder
        .remove_upcast(!cli.keep_upcast)
        .keep(cli.keep.clone())
        .bin_width(cli.bin_width);
    if cli.strict {
        builder.column_policy(ColumnPolicy::Strict);
    }
    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        builder.position(Position::new(lat, lon));
    }
    let options = builder.build()?;

    let mut stack = ProfileStack::new();
    let mut failures = 0;
    for path in &cli.cnv_paths {
        let result = proc_cnv(path, &options)
            .map_err(anyhow::Error::from)
            .and_then(|profile| stack.push(profile).map_err(anyhow::Error::from));
        if let Err(e) = result {
            failures += 1;
            log::error!("Skipping {}: {}", path.display(), e);
        }
    }
    if stack.profiles().is_empty() {
        bail!("None of the {} casts could be processed", cli.cnv_paths.len());
    }
    log::info!(
        "Processed {} casts, {} failed",
        stack.profiles().len(),
        failures
    );

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            stack.write_csv(BufWriter::new(file))?;
            println!("Wrote {}", path.display());
        }
        None => stack.write_csv(io::stdout().lock())?,
    }

    if let Some(path) = &cli.mean_profile {
        let mean = stack.mean_profile(&[CONSERVATIVE_TEMPERATURE, ABSOLUTE_SALINITY])?;
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_cast_csv(&mean, BufWriter::new(file), b';')?;
        println!("Wrote {}", path.display());
    }

    if cli.show_plot || cli.save_plot.is_some() {
        let plot = stack.make_profile_plot(&cli.plot_variable)?;
        if let Some(save_path) = &cli.save_plot {
            plot.write_html(save_path);
            println!("Saved plot to {}", save_path.display());
        }
        if cli.show_plot {
            plot.show();
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
