use clap::Parser;
use elevator_sim::render::{TextRenderer, drive};
use elevator_sim::services::parse::RequestParseLayer;
use elevator_sim::services::simulator::SimulatorService;
use elevator_sim::{SimulationConfig, StrategyKind};
use std::path::PathBuf;
use tower::{Service, ServiceBuilder, ServiceExt};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lifty-sim")]
#[command(about = "Simulate a single elevator serving a batch of hall calls")]
#[command(version)]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hall call, U<n> or D<n> (repeatable)
    #[arg(short, long = "request", value_name = "CALL")]
    requests: Vec<String>,

    /// Passenger trip, <from>:<to> (repeatable)
    #[arg(short, long = "trip", value_name = "FROM:TO")]
    trips: Vec<String>,

    #[arg(long, allow_hyphen_values = true)]
    start_floor: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    min_floor: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    max_floor: Option<i32>,

    /// Frames per floor of travel
    #[arg(long)]
    steps_per_floor: Option<u32>,

    /// Delay between frames in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// scan or two-phase
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Stop rendering after this many frames
    #[arg(long)]
    max_frames: Option<usize>,

    /// Print the servicing order and exit without animating
    #[arg(long)]
    plan_only: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load_from_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(floor) = self.min_floor {
            config.min_floor = floor;
        }
        if let Some(floor) = self.max_floor {
            config.max_floor = floor;
        }
        if let Some(floor) = self.start_floor {
            config.start_floor = floor;
        }
        if let Some(steps) = self.steps_per_floor {
            config.steps_per_floor = steps;
        }
        if let Some(millis) = self.interval_ms {
            config = config.with_frame_interval_ms(millis);
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let tokens: Vec<String> = cli.requests.iter().chain(&cli.trips).cloned().collect();

    let mut svc = ServiceBuilder::new()
        .layer(RequestParseLayer)
        .service(SimulatorService::new(config.clone()));
    let simulation = svc.ready().await?.call(tokens).await?;

    if cli.plan_only {
        let order: Vec<String> = simulation.plan().iter().map(i32::to_string).collect();
        println!("serviced order: {}", order.join(" "));
        return Ok(());
    }

    let mut renderer = TextRenderer::new(std::io::stdout());
    let summary = drive(
        simulation.frames(),
        &mut renderer,
        config.frame_interval(),
        cli.max_frames,
    )
    .await?;
    if !summary.completed {
        println!("Stopped after {} frames.", summary.frames);
    }
    Ok(())
}
