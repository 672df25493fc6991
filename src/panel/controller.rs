//! Skills panel state machine
//!
//! Fetch and commit are split into a `begin_*` call that issues a ticket
//! and a `complete_*` call that applies the result. Every ticket carries a
//! token from a monotonically increasing counter; a fetch completion whose
//! token is no longer the latest is dropped, so a slow response can never
//! overwrite newer state.

use std::sync::Arc;

use thiserror::Error;

use crate::allocation::{
    compute_budget, AllocationError, Budget, RankRules, SkillAllocation, SkillRanks,
};
use crate::codex::{Codex, SkillId};
use crate::ledger::{Ledger, LedgerError, TxReceipt};
use crate::progression::{Character, Experience, SummonerId};

use super::detail::SkillDetail;
use super::session::SessionSignal;

/// Panel errors
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("no active session")]
    Inactive,
    #[error("skill data has not been loaded")]
    NotLoaded,
    #[error("a skill commit is already in flight")]
    CommitInFlight,
    #[error("commit ticket {0} is not the one in flight")]
    StaleCommit(u64),
    #[error("level-up needs {missing} more XP")]
    LevelUpNotReady { missing: u64 },
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Everything one refresh reads from the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub character: Character,
    pub experience: Experience,
    pub committed: SkillRanks,
    pub rules: RankRules,
    pub budget: Budget,
}

/// Read a full snapshot for `id`
pub fn fetch_snapshot<L>(ledger: &L, codex: &Codex, id: SummonerId) -> Result<Snapshot, PanelError>
where
    L: Ledger + ?Sized,
{
    let character = ledger.summoner(id)?;
    let experience = ledger.experience(id, character.level)?;
    let committed = ledger.committed_skills(id)?;
    let attributes = ledger.attributes(id)?;
    let rules = RankRules::for_class(codex, character.class, character.level)
        .ok_or(AllocationError::UnknownClass(character.class))?;
    let budget = compute_budget(
        &character,
        Some(&attributes),
        &rules,
        &committed,
        |int, class, level| ledger.point_budget(int, class, level),
    )?;

    Ok(Snapshot {
        character,
        experience,
        committed,
        rules,
        budget,
    })
}

/// Handle for an outstanding fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    summoner: SummonerId,
}

impl FetchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn summoner(&self) -> SummonerId {
        self.summoner
    }
}

/// Handle for an outstanding commit, with the ranks to submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitTicket {
    token: u64,
    summoner: SummonerId,
    ranks: SkillRanks,
}

impl CommitTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn summoner(&self) -> SummonerId {
        self.summoner
    }

    pub fn ranks(&self) -> &SkillRanks {
        &self.ranks
    }
}

/// What happened to a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New data replaced the panel state
    Applied,
    /// Session inactive or panel hidden
    Skipped,
    /// A newer fetch or a commit superseded this one
    Stale,
    /// The ledger could not provide the data; prior state kept
    Unavailable,
}

/// Skills panel for one summoner
pub struct SkillsPanel {
    codex: Arc<Codex>,
    summoner: SummonerId,
    session: SessionSignal,
    character: Option<Character>,
    experience: Option<Experience>,
    allocation: Option<SkillAllocation>,
    next_token: u64,
    latest_fetch: Option<u64>,
    commit_in_flight: Option<u64>,
    /// Data needs (re)loading on the next refresh trigger
    stale: bool,
    /// Transaction receipts not yet shown
    notices: Vec<TxReceipt>,
}

impl SkillsPanel {
    pub fn new(codex: Arc<Codex>, summoner: SummonerId) -> Self {
        Self {
            codex,
            summoner,
            session: SessionSignal::default(),
            character: None,
            experience: None,
            allocation: None,
            next_token: 1,
            latest_fetch: None,
            commit_in_flight: None,
            stale: true,
            notices: Vec::new(),
        }
    }

    pub fn summoner(&self) -> SummonerId {
        self.summoner
    }

    pub fn codex(&self) -> &Codex {
        &self.codex
    }

    pub fn session(&self) -> SessionSignal {
        self.session
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn experience(&self) -> Option<&Experience> {
        self.experience.as_ref()
    }

    pub fn allocation(&self) -> Option<&SkillAllocation> {
        self.allocation.as_ref()
    }

    pub fn is_commit_in_flight(&self) -> bool {
        self.commit_in_flight.is_some()
    }

    /// Update the session signal. Returns whether a refresh is due.
    pub fn set_session(&mut self, session: SessionSignal) -> bool {
        if session != self.session {
            log::debug!("Session signal changed to {:?}", session);
            self.session = session;
            self.stale = true;
        }
        self.should_refresh()
    }

    pub fn should_refresh(&self) -> bool {
        self.stale && self.session.allows_refresh()
    }

    fn issue_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    /// Start a fetch; `None` while hidden or without a session
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        if !self.session.allows_refresh() {
            log::debug!("Refresh skipped for {}: {:?}", self.summoner, self.session);
            return None;
        }
        let token = self.issue_token();
        self.latest_fetch = Some(token);
        Some(FetchTicket {
            token,
            summoner: self.summoner,
        })
    }

    /// Apply the result of a fetch
    pub fn complete_refresh(
        &mut self,
        ticket: FetchTicket,
        result: Result<Snapshot, PanelError>,
    ) -> RefreshOutcome {
        if self.latest_fetch != Some(ticket.token) {
            log::debug!("Discarding stale fetch {} for {}", ticket.token, ticket.summoner);
            return RefreshOutcome::Stale;
        }
        self.latest_fetch = None;

        match result {
            Ok(snapshot) => {
                self.character = Some(snapshot.character);
                self.experience = Some(snapshot.experience);
                self.allocation = Some(SkillAllocation::new(
                    snapshot.rules,
                    snapshot.committed,
                    snapshot.budget,
                ));
                self.stale = false;
                RefreshOutcome::Applied
            }
            Err(e) => {
                log::warn!("Refresh for {} failed: {}", self.summoner, e);
                self.stale = true;
                RefreshOutcome::Unavailable
            }
        }
    }

    /// Fetch from `ledger` and apply in one step
    pub fn refresh<L>(&mut self, ledger: &L) -> RefreshOutcome
    where
        L: Ledger + ?Sized,
    {
        let Some(ticket) = self.begin_refresh() else {
            return RefreshOutcome::Skipped;
        };
        let result = fetch_snapshot(ledger, &self.codex, ticket.summoner);
        self.complete_refresh(ticket, result)
    }

    pub fn increment(&mut self, id: SkillId) -> bool {
        if self.commit_in_flight.is_some() {
            return false;
        }
        self.allocation.as_mut().is_some_and(|a| a.increment(id))
    }

    pub fn decrement(&mut self, id: SkillId) -> bool {
        if self.commit_in_flight.is_some() {
            return false;
        }
        self.allocation.as_mut().is_some_and(|a| a.decrement(id))
    }

    pub fn reset(&mut self) {
        if self.commit_in_flight.is_some() {
            return;
        }
        if let Some(allocation) = self.allocation.as_mut() {
            allocation.reset();
        }
    }

    pub fn is_commit_ready(&self) -> bool {
        self.commit_in_flight.is_none()
            && self.allocation.as_ref().is_some_and(|a| a.is_commit_ready())
    }

    /// Start a commit of the pending ranks
    pub fn begin_commit(&mut self) -> Result<CommitTicket, PanelError> {
        if !self.session.active {
            return Err(PanelError::Inactive);
        }
        if self.commit_in_flight.is_some() {
            return Err(PanelError::CommitInFlight);
        }
        let ranks = self.allocation.as_ref().ok_or(PanelError::NotLoaded)?.commit()?;
        let token = self.issue_token();
        self.commit_in_flight = Some(token);
        Ok(CommitTicket {
            token,
            summoner: self.summoner,
            ranks,
        })
    }

    /// Apply the ledger's answer to a commit.
    ///
    /// On success the submitted ranks become the committed baseline and any
    /// fetch still in flight is discarded. On failure pending edits stay as
    /// they were so the commit can be retried.
    pub fn complete_commit(
        &mut self,
        ticket: CommitTicket,
        result: Result<TxReceipt, LedgerError>,
    ) -> Result<TxReceipt, PanelError> {
        if self.commit_in_flight != Some(ticket.token) {
            return Err(PanelError::StaleCommit(ticket.token));
        }
        self.commit_in_flight = None;

        match result {
            Ok(receipt) if receipt.success => {
                if let Some(allocation) = self.allocation.as_mut() {
                    allocation.acknowledge_commit(ticket.ranks);
                }
                self.latest_fetch = None;
                log::info!("Skills committed for {} ({})", ticket.summoner, receipt.hash);
                self.notices.push(receipt.clone());
                Ok(receipt)
            }
            Ok(receipt) => {
                log::warn!("Skill commit for {} reverted ({})", ticket.summoner, receipt.hash);
                self.notices.push(receipt.clone());
                Err(LedgerError::Rejected(receipt.title()).into())
            }
            Err(e) => {
                log::warn!("Skill commit for {} failed: {}", ticket.summoner, e);
                Err(e.into())
            }
        }
    }

    /// Submit the pending ranks to `ledger` and apply the answer
    pub fn commit<L>(&mut self, ledger: &L) -> Result<TxReceipt, PanelError>
    where
        L: Ledger + ?Sized,
    {
        let ticket = self.begin_commit()?;
        let result = ledger.submit_skill_ranks(ticket.summoner, &ticket.ranks);
        self.complete_commit(ticket, result)
    }

    pub fn can_level_up(&self) -> bool {
        self.experience.is_some_and(|xp| xp.can_level_up())
    }

    /// Spend XP for a level; marks the panel for refresh on success
    pub fn level_up<L>(&mut self, ledger: &L) -> Result<TxReceipt, PanelError>
    where
        L: Ledger + ?Sized,
    {
        if !self.session.active {
            return Err(PanelError::Inactive);
        }
        let experience = self.experience.ok_or(PanelError::NotLoaded)?;
        if !experience.can_level_up() {
            return Err(PanelError::LevelUpNotReady {
                missing: experience.missing(),
            });
        }

        let receipt = ledger.level_up(self.summoner)?;
        self.notices.push(receipt.clone());
        if receipt.success {
            log::info!("Summoner {} leveled up ({})", self.summoner, receipt.hash);
            self.stale = true;
            Ok(receipt)
        } else {
            Err(LedgerError::Rejected(receipt.title()).into())
        }
    }

    /// Detail view for one skill
    pub fn detail(&self, id: SkillId) -> Option<SkillDetail> {
        SkillDetail::build(&self.codex, self.allocation.as_ref()?, id)
    }

    pub fn notices(&self) -> &[TxReceipt] {
        &self.notices
    }

    /// Drain receipts that have not been shown yet
    pub fn take_notices(&mut self) -> Vec<TxReceipt> {
        std::mem::take(&mut self.notices)
    }
}
