use clap::{Parser, Subcommand, ValueEnum};
use fs_err as fs;
use serde::Deserialize;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use turnstile::control::{ControlCommand, SOCKET_PATH};
use turnstile::{Carousel, CarouselConfig, CarouselControl, CarouselEvent, CarouselItem, script};

#[derive(Parser, Debug)]
#[command(name = "turnstile", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Rotate the running prism viewer forward
    Next,
    /// Rotate the running prism viewer backward
    Prev,
    /// Switch autoplay of the running prism viewer
    Autoplay { state: Toggle },
    /// Ask the running prism viewer to reload its config
    Reload,
    /// Run a carousel script headless and print every settled index
    Simulate {
        /// TOML file with `[carousel]` settings and `[[items]]`
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Number of placeholder items when the config lists none
        #[arg(short = 'n', long, default_value_t = 5)]
        items: usize,

        /// Script file; read from stdin when omitted
        script: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Toggle {
    On,
    Off,
}

#[derive(Debug, Default, Deserialize)]
struct Simulation {
    #[serde(default)]
    carousel: CarouselConfig,
    #[serde(default)]
    items: Vec<CarouselItem>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Next => send_command(ControlCommand::Next),
        Commands::Prev => send_command(ControlCommand::Prev),
        Commands::Autoplay { state } => send_command(match state {
            Toggle::On => ControlCommand::AutoplayOn,
            Toggle::Off => ControlCommand::AutoplayOff,
        }),
        Commands::Reload => send_command(ControlCommand::Reload),
        Commands::Simulate {
            config,
            items,
            script,
        } => simulate(config.as_deref(), items, script.as_deref()),
    }
}

fn load_simulation(path: Option<&Path>) -> anyhow::Result<Simulation> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    let settings = builder
        .add_source(turnstile::config::env_overrides("TURNSTILE"))
        .build()?;
    Ok(settings.try_deserialize()?)
}

fn placeholder_items(count: usize) -> Vec<CarouselItem> {
    (1..=count)
        .map(|i| {
            CarouselItem::image(format!("item-{i}"), format!("item-{i}.png"))
                .with_alt(format!("Placeholder {i}"))
        })
        .collect()
}

fn simulate(config: Option<&Path>, count: usize, script: Option<&Path>) -> anyhow::Result<()> {
    let simulation = load_simulation(config)?;
    let items = if simulation.items.is_empty() {
        placeholder_items(count)
    } else {
        simulation.items
    };

    let source = match script {
        Some(path) => fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let instructions = script::parse(&source)?;

    let mut carousel = Carousel::new(items, simulation.carousel.sanitized());
    script::run(&mut carousel, &instructions, |carousel, event| match event {
        CarouselEvent::IndexChanged(index) => match carousel.announcement() {
            Some(announcement) => println!("{index}\t{announcement}"),
            None => println!("{index}"),
        },
    });

    log::info!(
        "Finished {} instructions on item {}",
        instructions.len(),
        carousel.current_index()
    );
    Ok(())
}

fn send_command(command: ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to prism at {}: {}. Is prism running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", command)?;
    Ok(())
}
