// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use three_phase_csv_render::constants::DEFAULT_CSV_PATH;
use three_phase_csv_render::dashboard::{self, AppState};
use three_phase_csv_render::data_analysis::selection::{OutlierMode, TypeSelection};
use three_phase_csv_render::data_analysis::summary::{format_summary_table, summarize_frame};
use three_phase_csv_render::data_input::csv_parser::load_sensor_csv;
use three_phase_csv_render::data_input::sensor_data::SensorFrame;
use three_phase_csv_render::plot_functions::plot_phase_signals::plot_phase_signals;

#[derive(Parser)]
#[command(name = "three_phase_csv_render")]
#[command(version = three_phase_csv_render::crate_version())]
#[command(about = "Plot three-phase power, current and voltage readings from a sensor CSV", long_about = None)]
struct Cli {
    /// Sensor CSV with `day`, `time` and phase signal columns (e.g. l1_p, l2_v)
    #[arg(long, env = "SENSOR_CSV", default_value = DEFAULT_CSV_PATH, global = true)]
    csv: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the stacked phase plot to an image file
    Render {
        /// Signal types to plot, in subplot order (codes p,q,i,v or labels)
        #[arg(short, long, default_value = "p,q,i,v")]
        types: TypeSelection,

        /// Whether to draw or remove 3-sigma outliers
        #[arg(long, value_enum, ignore_case = true, default_value_t = OutlierMode::Include)]
        outliers: OutlierMode,

        /// Output image; `.svg` selects SVG, anything else PNG
        /// (default: <csv stem>_phases.png in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the interactive dashboard
    Serve {
        /// Host to bind to
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8050")]
        port: u16,
    },

    /// Print per-column statistics and outlier counts
    Summary,
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "three_phase_csv_render=debug,tower_http=debug"
    } else {
        "three_phase_csv_render=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();
}

fn root_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn load_frame(path: &Path) -> Result<SensorFrame> {
    let frame = load_sensor_csv(path)
        .with_context(|| format!("loading sensor data from '{}'", path.display()))?;
    if frame.is_empty() {
        anyhow::bail!("no valid data rows in '{}'", path.display());
    }
    Ok(frame)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env with SENSOR_CSV / HOST / PORT
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let frame = load_frame(&cli.csv)?;
    let root_name = root_name(&cli.csv);

    match cli.command {
        Commands::Render {
            types,
            outliers,
            output,
        } => {
            debug!("Types chosen are: {}, outlier mode: {}", types, outliers);
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{root_name}_phases.png")));
            info!("--- Generating Stacked Phase Plot ---");
            plot_phase_signals(&frame, &types, outliers, &root_name, &output)
                .map_err(|e| anyhow::anyhow!("rendering '{}': {}", output.display(), e))?;
        }
        Commands::Serve { host, port } => {
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("invalid HOST:PORT '{host}:{port}'"))?;
            let state = AppState::new(frame, &root_name);
            dashboard::serve(state, addr)
                .await
                .context("dashboard server failed")?;
        }
        Commands::Summary => {
            print!("{}", format_summary_table(&summarize_frame(&frame)));
        }
    }

    Ok(())
}
