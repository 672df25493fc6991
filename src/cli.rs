//! Text front end
//!
//! Command parsing and plain-text views for the interactive client.

use std::fmt::Write as _;

use crate::codex::SkillId;
use crate::ledger::TxReceipt;
use crate::panel::SkillsPanel;

/// A parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Info(SkillId),
    Increment { skill: SkillId, times: u32 },
    Decrement { skill: SkillId, times: u32 },
    Reset,
    Commit,
    LevelUp,
    Refresh,
    Hide,
    Unhide,
    ExportData,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(Command::Show);
        };
        let args: Vec<&str> = parts.collect();

        let command = match word {
            "show" | "s" => Command::Show,
            "info" | "i" => Command::Info(skill_arg(&args)?),
            "inc" | "+" => Command::Increment {
                skill: skill_arg(&args)?,
                times: times_arg(&args)?,
            },
            "dec" | "-" => Command::Decrement {
                skill: skill_arg(&args)?,
                times: times_arg(&args)?,
            },
            "reset" => Command::Reset,
            "commit" => Command::Commit,
            "levelup" => Command::LevelUp,
            "refresh" => Command::Refresh,
            "hide" => Command::Hide,
            "unhide" => Command::Unhide,
            "export-data" => Command::ExportData,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}'", other)),
        };
        Ok(command)
    }
}

fn skill_arg(args: &[&str]) -> Result<SkillId, String> {
    let raw = args.first().ok_or("missing skill id")?;
    raw.parse().map_err(|_| format!("'{}' is not a skill id", raw))
}

fn times_arg(args: &[&str]) -> Result<u32, String> {
    match args.get(1) {
        Some(raw) => raw.parse().map_err(|_| format!("'{}' is not a count", raw)),
        None => Ok(1),
    }
}

pub const HELP: &str = "\
commands:
  show                 skills table
  info <id>            skill details
  inc <id> [n]         raise a skill
  dec <id> [n]         lower a pending raise
  reset                drop pending edits
  commit               submit the allocation
  levelup              spend XP for a level
  refresh              reload from the ledger
  hide | unhide        toggle panel visibility
  export-data          write codex RON files
  quit";

/// Character header plus the skills table
pub fn render_panel(panel: &SkillsPanel) -> String {
    let mut out = String::new();
    let codex = panel.codex();

    let Some(character) = panel.character() else {
        return format!("Summoner {}: no data loaded\n", panel.summoner());
    };
    let class_name = codex
        .class(character.class)
        .map(|c| c.name.as_str())
        .unwrap_or("Unknown");
    let _ = writeln!(out, "Summoner {} - {} level {}", character.id, class_name, character.level);

    if let Some(xp) = panel.experience() {
        let ready = if xp.can_level_up() { "  [level up available]" } else { "" };
        let _ = writeln!(out, "XP {}/{}{}", xp.current, xp.next_threshold, ready);
    }

    let Some(allocation) = panel.allocation() else {
        return out;
    };
    let budget = allocation.budget();
    let _ = writeln!(
        out,
        "Skill points: {} remaining of {} ({} unspent at last sync)",
        allocation.remaining(),
        budget.total,
        budget.remaining
    );

    for line in allocation.lines() {
        let name = codex.skill(line.id).map(|s| s.name.as_str()).unwrap_or("?");
        let marker = if line.pending != line.committed { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:>2} {:<20} {}{:>2}/{:<2} {}",
            line.id,
            name,
            marker,
            line.pending,
            line.max_rank,
            if line.class_skill { "class" } else { "cross" }
        );
    }
    if allocation.is_commit_ready() {
        let _ = writeln!(out, "Ready to commit");
    }
    out
}

/// Skill detail block
pub fn render_detail(panel: &SkillsPanel, id: SkillId) -> Option<String> {
    let detail = panel.detail(id)?;
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", detail.name, detail.id);
    let _ = writeln!(out, "  Key attribute: {}", detail.attribute.name());
    let _ = writeln!(out, "  Armor check penalty: {}", detail.armor_check_penalty);
    if let Some(synergy) = &detail.synergy {
        let _ = writeln!(out, "  Skill synergy: {}", synergy);
    }
    let _ = writeln!(
        out,
        "  Rank {}/{}, {} point(s) per rank",
        detail.rank, detail.max_rank, detail.cost
    );
    Some(out)
}

/// One line per transaction receipt
pub fn render_notice(receipt: &TxReceipt) -> String {
    let status = if receipt.success { "ok" } else { "failed" };
    format!("[{}] {} ({})", status, receipt.title(), receipt.hash)
}
