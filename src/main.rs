//! Command-line sender (default binary).
//!
//! Sends one or more commands to the controller emulator:
//!
//! ```bash
//! puyo-gc /dev/ttyACM0 Start      # press start
//! puyo-gc /dev/ttyACM0 0,3        # leftmost column, three turns clockwise
//! puyo-gc /dev/ttyACM0 5,1 down   # several commands, run in order
//! puyo-gc --dry-run /dev/ttyACM0 0,3   # print the frames instead of sending them
//! ```
//!
//! Every command is validated before the device is opened.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use log::info;

use puyo_gc::adapter::{list_ports, Delay, LinkConfig, Transport};
use puyo_gc::frame::ControllerFrame;
use puyo_gc::input::{map, CommandParser};
use puyo_gc::types::{Intent, FRAME_LEN};

/// Send button presses and piece placements to a GameCube through a serial
/// controller emulator.
///
/// A command is either a button name or a placement: a column and a rotation
/// separated by a comma with no space, e.g. "0,3" (leftmost column, rotate 3
/// times clockwise). Buttons are held briefly; placements run as fast as the
/// hardware allows.
#[derive(Parser, Debug)]
#[command(name = "puyo-gc")]
#[command(version)]
#[command(about = "Send commands to a GameCube controller emulator over serial")]
struct Cli {
    /// Serial device of the emulator (e.g. /dev/ttyACM0 or /dev/ttyUSB0)
    #[arg(required_unless_present_any = ["list_buttons", "list_ports"])]
    device: Option<String>,

    /// Button names or "column,rotation" placements
    #[arg(required_unless_present_any = ["list_buttons", "list_ports"])]
    commands: Vec<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Baud rate (overrides config and environment)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Number of board columns
    #[arg(long)]
    columns: Option<u8>,

    /// Column where new pieces spawn
    #[arg(long)]
    spawn_column: Option<u8>,

    /// Print frames to stdout instead of opening the device
    #[arg(long)]
    dry_run: bool,

    /// List valid button names and exit
    #[arg(long)]
    list_buttons: bool,

    /// List serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Log every frame written
    #[arg(short, long)]
    verbose: bool,
}

struct NoDelay;

impl Delay for NoDelay {
    fn delay(&mut self, _duration: Duration) {}
}

fn main() -> Result<()> {
    let matches = Cli::command()
        .after_help(format!("Valid buttons: {}", map::valid_names()))
        .get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.list_buttons {
        for name in map::button_names() {
            println!("{name}");
        }
        return Ok(());
    }
    if cli.list_ports {
        for port in list_ports().context("failed to enumerate serial ports")? {
            println!("{port}");
        }
        return Ok(());
    }

    let config = load_config(&cli)?;

    let parser = CommandParser::new(config.geometry);
    let intents = cli
        .commands
        .iter()
        .map(|raw| {
            parser.parse(raw).map_err(|e| {
                let code = e.code();
                anyhow::Error::new(e).context(format!("invalid command {raw:?} ({code})"))
            })
        })
        .collect::<Result<Vec<Intent>>>()?;

    if cli.dry_run {
        let mut transport = Transport::with_delay(Vec::new(), NoDelay, &config);
        run(&mut transport, &cli.commands, &intents)?;
        for chunk in transport.into_inner().chunks_exact(FRAME_LEN) {
            let mut bytes = [0u8; FRAME_LEN];
            bytes.copy_from_slice(chunk);
            println!("{}", ControllerFrame::from_bytes(bytes));
        }
        return Ok(());
    }

    let mut transport = Transport::open(&config)
        .with_context(|| format!("cannot drive controller on {}", config.device))?;
    run(&mut transport, &cli.commands, &intents)?;
    info!("sent {} frames", transport.frames_sent());
    Ok(())
}

fn load_config(cli: &Cli) -> Result<LinkConfig> {
    let mut config = match &cli.config {
        Some(path) => LinkConfig::from_toml_file(path)?,
        None => LinkConfig::default(),
    }
    .with_env();

    if let Some(device) = &cli.device {
        config = config.with_device(device);
    }
    if let Some(baud) = cli.baud {
        config = config.with_baud_rate(baud);
    }
    if let Some(columns) = cli.columns {
        config.geometry.columns = columns;
    }
    if let Some(spawn) = cli.spawn_column {
        config.geometry.spawn_column = spawn;
    }
    config.validate()?;
    Ok(config)
}

fn run<W: std::io::Write, D: Delay>(
    transport: &mut Transport<W, D>,
    raw: &[String],
    intents: &[Intent],
) -> Result<()> {
    for (i, (raw, intent)) in raw.iter().zip(intents).enumerate() {
        if i > 0 {
            transport.command_gap();
        }
        transport
            .execute(intent)
            .with_context(|| format!("command {raw:?} failed"))?;
    }
    Ok(())
}
