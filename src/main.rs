//! Summoner Skills - Entry Point
//!
//! Loads config, codex and ledger, then runs the interactive skills panel.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use summoner_skills::cli::{render_detail, render_notice, render_panel, Command, HELP};
use summoner_skills::codex::{export_default_codex, AttributeScores, Codex};
use summoner_skills::config::{config_path, load_config, ClientConfig};
use summoner_skills::ledger::{load_ledger, save_ledger, InMemoryLedger};
use summoner_skills::panel::{RefreshOutcome, SessionSignal, SkillsPanel};
use summoner_skills::progression::SummonerId;

/// Class used for the demo summoner on a fresh ledger (Rogue)
const DEMO_CLASS: u32 = 9;

fn main() -> Result<()> {
    let config_file = config_path();
    let loaded = load_config(&config_file);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => ClientConfig::default(),
    };

    // Log to file so the prompt stays readable
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("summoner-skills.log")
        .context("opening log file")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str())
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Summoner Skills v{}", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &loaded {
        log::warn!("Failed to load {}: {}. Using defaults.", config_file.display(), e);
    }

    let codex = Arc::new(Codex::load(&config.data_dir()));
    let ledger_path = config.ledger_path();
    let ledger = match load_ledger(&ledger_path)? {
        Some(state) => InMemoryLedger::with_state(codex.clone(), state, config.seed),
        None => InMemoryLedger::new(codex.clone(), config.seed),
    };

    let summoner = match config.summoner {
        Some(id) => id,
        None => demo_summoner(&ledger)?,
    };
    save_ledger(&ledger_path, &ledger.state())?;

    let mut panel = SkillsPanel::new(codex, summoner);
    panel.set_session(SessionSignal::live());
    if panel.refresh(&ledger) != RefreshOutcome::Applied {
        println!("Could not load summoner {}; see summoner-skills.log", summoner);
    }

    let result = run(&mut panel, &ledger, &ledger_path, &config);
    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
    }
    log::info!("Summoner Skills shut down cleanly");
    result
}

/// First summoner on the ledger, or a freshly summoned one
fn demo_summoner(ledger: &InMemoryLedger) -> Result<SummonerId> {
    if let Some(id) = ledger.state().summoners.keys().next() {
        return Ok(*id);
    }
    let id = ledger.summon(DEMO_CLASS)?;
    ledger.assign_attributes(id, AttributeScores::new(10, 16, 12, 14, 10, 12))?;
    ledger.grant_xp(id, 1500)?;
    log::info!("Created demo summoner {}", id);
    Ok(id)
}

fn run(
    panel: &mut SkillsPanel,
    ledger: &InMemoryLedger,
    ledger_path: &Path,
    config: &ClientConfig,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("{}", render_panel(panel));

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{} (try 'help')", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Show => print!("{}", render_panel(panel)),
            Command::Info(id) => match render_detail(panel, id) {
                Some(text) => print!("{}", text),
                None => println!("No skill {}", id),
            },
            Command::Increment { skill, times } => {
                let applied = (0..times).take_while(|_| panel.increment(skill)).count();
                println!("Raised skill {} by {}", skill, applied);
            }
            Command::Decrement { skill, times } => {
                let applied = (0..times).take_while(|_| panel.decrement(skill)).count();
                println!("Lowered skill {} by {}", skill, applied);
            }
            Command::Reset => {
                panel.reset();
                print!("{}", render_panel(panel));
            }
            Command::Commit => {
                if let Err(e) = panel.commit(ledger) {
                    println!("Commit failed: {}", e);
                }
                save_ledger(ledger_path, &ledger.state())?;
            }
            Command::LevelUp => {
                match panel.level_up(ledger) {
                    Ok(_) => {
                        panel.refresh(ledger);
                    }
                    Err(e) => println!("Level up failed: {}", e),
                }
                save_ledger(ledger_path, &ledger.state())?;
            }
            Command::Refresh => match panel.refresh(ledger) {
                RefreshOutcome::Applied => print!("{}", render_panel(panel)),
                other => println!("Refresh: {:?}", other),
            },
            Command::Hide => {
                panel.set_session(SessionSignal::new(true, false));
            }
            Command::Unhide => {
                if panel.set_session(SessionSignal::live()) {
                    panel.refresh(ledger);
                }
                print!("{}", render_panel(panel));
            }
            Command::ExportData => {
                let dir = config.data_dir();
                match export_default_codex(&dir) {
                    Ok(()) => println!("Wrote codex to {}", dir.display()),
                    Err(e) => println!("Export failed: {}", e),
                }
            }
        }

        for receipt in panel.take_notices() {
            println!("{}", render_notice(&receipt));
        }
    }

    Ok(())
}
