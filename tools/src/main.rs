//! world-runner: terminal shell and headless runner for World Runner.
//!
//! Usage:
//!   world-runner [--realtime]                     (interactive, real time)
//!   world-runner --hours 48 --city Leeds          (headless batch run)
//!   world-runner --ipc-mode                       (JSON lines on stdin/stdout)
//!   world-runner --config data/world_runner.json ...
//!   world-runner --granularity minute ...           (override the time unit)

mod render;
mod shell;

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use world_runner_core::{
    command::PlayerCommand,
    config::{GameConfig, Granularity},
    engine::GameSession,
    event::Notification,
    player::{Character, CharacterDraft},
    snapshot::SessionSnapshot,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Start {
        gender: String,
        city: String,
    },
    Tick {
        elapsed_ms: u64,
    },
    Command {
        command: PlayerCommand,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    #[serde(flatten)]
    snapshot: SessionSnapshot,
    notifications: &'a [Notification],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");
    let hours = arg_value(&args, "--hours").and_then(|h| h.parse::<u64>().ok());

    let config = load_config(&args)?;

    let mut draft = CharacterDraft::default();
    if let Some(gender) = arg_value(&args, "--gender") {
        draft.choose_gender(gender);
    }
    if let Some(city) = arg_value(&args, "--city") {
        draft.choose_city(city);
    }

    if realtime {
        shell::run(config)
    } else if ipc_mode {
        let character = draft.finish().ok();
        run_ipc_loop(GameSession::start(config, character)?)
    } else if let Some(hours) = hours {
        let character = draft.finish().ok();
        run_batch(GameSession::start(config, character)?, hours)
    } else {
        shell::run(config)
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn load_config(args: &[String]) -> Result<GameConfig> {
    let mut config = match arg_value(args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(name) = arg_value(args, "--granularity") {
        config.granularity = name.parse::<Granularity>()?;
    }
    config.validate()?;
    Ok(config)
}

fn run_batch(mut session: GameSession, hours: u64) -> Result<()> {
    let units_per_hour = 60 * session.config().granularity.units_per_minute();

    println!("World Runner: batch run");
    println!("  session:   {}", session.session_id);
    println!("  hours:     {hours}");
    println!("  city:      {}", session.city().unwrap_or("N/A"));
    println!();

    for _ in 0..hours {
        let outcome = session.advance_units(units_per_hour);
        for n in &outcome.notifications {
            log::info!("{}: {}", session.state().time, n.message);
        }
    }

    print_summary(&session);
    Ok(())
}

fn run_ipc_loop(mut session: GameSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let notifications = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => Vec::new(),
            IpcCommand::Start { gender, city } => {
                let config = session.config().clone();
                session = GameSession::start(config, Some(Character::new(gender, city)))?;
                Vec::new()
            }
            IpcCommand::Tick { elapsed_ms } => session.advance_ms(elapsed_ms).notifications,
            IpcCommand::Command { command } => {
                session.apply_command(command);
                Vec::new()
            }
        };

        let state = UiState { snapshot: session.snapshot(), notifications: &notifications };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(session: &GameSession) {
    let snap = session.snapshot();
    let p = &snap.player;
    println!("Run complete at {} ({})", p.time, snap.phase);
    println!("  started:       {}", snap.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  money:         ${}", p.money);
    println!("  total earned:  ${}", p.total_earned);
    println!("  total spent:   ${}", p.total_spent);
    println!("  energy:        {}", p.energy);
    println!("  hunger:        {}", p.hunger);
    println!("  last tax day:  {}", p.last_tax_day);
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
