//! In-memory ledger
//!
//! Holds summoner records and applies the same checks the on-chain
//! contracts do. Used by the CLI (with JSON persistence) and by tests.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::allocation::{RankRules, SkillRanks};
use crate::codex::{AttributeScores, ClassId, Codex};
use crate::progression::{skill_points, xp_required, Character, Experience, SummonerId};

use super::{Ledger, LedgerError, TxReceipt};

/// One summoner as stored on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonerRecord {
    pub class: ClassId,
    pub level: u32,
    pub xp: u64,
    pub attributes: AttributeScores,
    pub skills: SkillRanks,
}

impl SummonerRecord {
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            level: 1,
            xp: 0,
            attributes: AttributeScores::default(),
            skills: SkillRanks::zero(),
        }
    }
}

/// Serializable ledger contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub summoners: BTreeMap<SummonerId, SummonerRecord>,
    pub next_id: SummonerId,
    pub tx_count: u64,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            summoners: BTreeMap::new(),
            next_id: 1,
            tx_count: 0,
        }
    }
}

struct Inner {
    state: LedgerState,
    rng: StdRng,
    /// Reason to reject the next skill submission with
    fail_next_submit: Option<String>,
    offline: bool,
}

impl Inner {
    fn check_online(&self) -> Result<(), LedgerError> {
        if self.offline {
            Err(LedgerError::Unavailable("ledger is offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn record(&self, id: SummonerId) -> Result<&SummonerRecord, LedgerError> {
        self.state
            .summoners
            .get(&id)
            .ok_or(LedgerError::UnknownSummoner(id))
    }

    fn record_mut(&mut self, id: SummonerId) -> Result<&mut SummonerRecord, LedgerError> {
        self.state
            .summoners
            .get_mut(&id)
            .ok_or(LedgerError::UnknownSummoner(id))
    }

    fn receipt(&mut self, summary: String) -> TxReceipt {
        self.state.tx_count += 1;
        let bytes: [u8; 32] = self.rng.gen();
        let mut hash = String::with_capacity(66);
        hash.push_str("0x");
        for byte in bytes {
            let _ = write!(hash, "{:02x}", byte);
        }
        TxReceipt::new(hash, true, Some(summary))
    }
}

/// Ledger kept in process memory
pub struct InMemoryLedger {
    codex: Arc<Codex>,
    inner: Mutex<Inner>,
}

impl InMemoryLedger {
    pub fn new(codex: Arc<Codex>, seed: u64) -> Self {
        Self::with_state(codex, LedgerState::default(), seed)
    }

    pub fn with_state(codex: Arc<Codex>, state: LedgerState, seed: u64) -> Self {
        Self {
            codex,
            inner: Mutex::new(Inner {
                state,
                rng: StdRng::seed_from_u64(seed),
                fail_next_submit: None,
                offline: false,
            }),
        }
    }

    /// Copy of the current contents, for persistence
    pub fn state(&self) -> LedgerState {
        self.inner.lock().state.clone()
    }

    /// Create a level 1 summoner of `class`
    pub fn summon(&self, class: ClassId) -> Result<SummonerId, LedgerError> {
        if self.codex.class(class).is_none() {
            return Err(LedgerError::UnknownClass(class));
        }
        let mut inner = self.inner.lock();
        inner.check_online()?;
        let id = inner.state.next_id;
        inner.state.next_id += 1;
        inner.state.summoners.insert(id, SummonerRecord::new(class));
        log::info!("Summoned {} with class {}", id, class);
        Ok(id)
    }

    /// Point-buy attributes; only allowed once
    pub fn assign_attributes(
        &self,
        id: SummonerId,
        scores: AttributeScores,
    ) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock();
        inner.check_online()?;
        let record = inner.record_mut(id)?;
        if record.attributes.is_assigned() {
            return Err(LedgerError::Rejected("attributes already assigned".to_string()));
        }
        if !scores.is_assigned() {
            return Err(LedgerError::Rejected("attribute scores are empty".to_string()));
        }
        record.attributes = scores;
        Ok(())
    }

    /// Award experience (adventuring is out of scope here)
    pub fn grant_xp(&self, id: SummonerId, amount: u64) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock();
        inner.check_online()?;
        let record = inner.record_mut(id)?;
        record.xp = record.xp.saturating_add(amount);
        Ok(())
    }

    /// Reject the next skill submission with `reason`
    pub fn fail_next_submit(&self, reason: impl Into<String>) {
        self.inner.lock().fail_next_submit = Some(reason.into());
    }

    /// Make every call fail as unavailable
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().offline = offline;
    }

    fn budget_for(&self, record: &SummonerRecord) -> Result<u32, LedgerError> {
        let class = self
            .codex
            .class(record.class)
            .ok_or(LedgerError::UnknownClass(record.class))?;
        points_for(class.skill_points, record.attributes.intelligence, record.level)
    }
}

fn points_for(class_base: u32, intelligence: u32, level: u32) -> Result<u32, LedgerError> {
    skill_points(class_base, intelligence, level).ok_or_else(|| {
        LedgerError::Unavailable(format!("skill point budget for level {} overflows", level))
    })
}

impl Ledger for InMemoryLedger {
    fn summoner(&self, id: SummonerId) -> Result<Character, LedgerError> {
        let inner = self.inner.lock();
        inner.check_online()?;
        let record = inner.record(id)?;
        Ok(Character::new(id, record.class, record.level))
    }

    fn experience(&self, id: SummonerId, level: u32) -> Result<Experience, LedgerError> {
        let inner = self.inner.lock();
        inner.check_online()?;
        let record = inner.record(id)?;
        let threshold = xp_required(level).ok_or_else(|| {
            LedgerError::Unavailable(format!("no XP threshold for level {}", level))
        })?;
        Ok(Experience::new(record.xp, threshold))
    }

    fn committed_skills(&self, id: SummonerId) -> Result<SkillRanks, LedgerError> {
        let inner = self.inner.lock();
        inner.check_online()?;
        Ok(inner.record(id)?.skills)
    }

    fn attributes(&self, id: SummonerId) -> Result<AttributeScores, LedgerError> {
        let inner = self.inner.lock();
        inner.check_online()?;
        Ok(inner.record(id)?.attributes)
    }

    fn point_budget(
        &self,
        intelligence: u32,
        class: ClassId,
        level: u32,
    ) -> Result<u32, LedgerError> {
        self.inner.lock().check_online()?;
        let def = self.codex.class(class).ok_or(LedgerError::UnknownClass(class))?;
        points_for(def.skill_points, intelligence, level)
    }

    fn submit_skill_ranks(
        &self,
        id: SummonerId,
        ranks: &SkillRanks,
    ) -> Result<TxReceipt, LedgerError> {
        let mut inner = self.inner.lock();
        inner.check_online()?;
        if let Some(reason) = inner.fail_next_submit.take() {
            log::warn!("Skill submission for {} rejected: {}", id, reason);
            return Err(LedgerError::Rejected(reason));
        }

        let record = inner.record(id)?.clone();
        if !record.attributes.is_assigned() {
            return Err(LedgerError::Rejected("attributes not assigned".to_string()));
        }
        let rules = RankRules::for_class(&self.codex, record.class, record.level)
            .ok_or(LedgerError::UnknownClass(record.class))?;

        if !rules.within_caps(ranks) {
            return Err(LedgerError::Rejected("skill rank above cap".to_string()));
        }
        if ranks
            .iter()
            .zip(record.skills.iter())
            .any(|((_, new), (_, old))| new < old)
        {
            return Err(LedgerError::Rejected("skill ranks cannot be lowered".to_string()));
        }
        let cost = rules
            .set_cost(ranks)
            .ok_or_else(|| LedgerError::Rejected("skill set cost overflows".to_string()))?;
        let budget = self.budget_for(&record)?;
        if cost > budget {
            return Err(LedgerError::Rejected(format!(
                "skill set costs {} points, {} available",
                cost, budget
            )));
        }

        inner.record_mut(id)?.skills = *ranks;
        let receipt = inner.receipt(format!("Assigned skills for summoner {}", id));
        log::info!("Committed skills for {} ({} of {} points)", id, cost, budget);
        Ok(receipt)
    }

    fn level_up(&self, id: SummonerId) -> Result<TxReceipt, LedgerError> {
        let mut inner = self.inner.lock();
        inner.check_online()?;
        let record = inner.record_mut(id)?;
        let (required, next) = xp_required(record.level)
            .zip(record.level.checked_add(1))
            .ok_or_else(|| LedgerError::Rejected("maximum level reached".to_string()))?;
        if record.xp < required {
            return Err(LedgerError::Rejected(format!(
                "{} XP required, {} available",
                required, record.xp
            )));
        }
        record.xp -= required;
        record.level = next;
        let level = record.level;
        let receipt = inner.receipt(format!("Summoner {} reached level {}", id, level));
        log::info!("Summoner {} leveled up to {}", id, level);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROGUE: ClassId = 9;

    fn ledger_with_rogue() -> (InMemoryLedger, SummonerId) {
        let ledger = InMemoryLedger::new(Arc::new(Codex::default()), 7);
        let id = ledger.summon(ROGUE).unwrap();
        ledger
            .assign_attributes(id, AttributeScores::new(10, 16, 10, 10, 10, 12))
            .unwrap();
        (ledger, id)
    }

    #[test]
    fn test_summon_and_read() {
        let (ledger, id) = ledger_with_rogue();
        assert_eq!(ledger.summoner(id).unwrap(), Character::new(id, ROGUE, 1));
        assert_eq!(ledger.committed_skills(id).unwrap(), SkillRanks::zero());
        assert_eq!(ledger.experience(id, 1).unwrap(), Experience::new(0, 1000));
        assert_eq!(ledger.point_budget(10, ROGUE, 1).unwrap(), 32);
        assert!(matches!(ledger.summoner(99), Err(LedgerError::UnknownSummoner(99))));
        assert!(matches!(ledger.summon(42), Err(LedgerError::UnknownClass(42))));
    }

    #[test]
    fn test_attributes_assigned_once() {
        let (ledger, id) = ledger_with_rogue();
        let again = ledger.assign_attributes(id, AttributeScores::new(8, 8, 8, 8, 8, 8));
        assert!(matches!(again, Err(LedgerError::Rejected(_))));
    }

    #[test]
    fn test_submit_valid_set() {
        let (ledger, id) = ledger_with_rogue();
        let mut ranks = SkillRanks::zero();
        ranks.set(22, 4);
        ranks.set(30, 2);

        let receipt = ledger.submit_skill_ranks(id, &ranks).unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.hash.len(), 66);
        assert!(receipt.hash.starts_with("0x"));
        assert_eq!(ledger.committed_skills(id).unwrap(), ranks);
    }

    #[test]
    fn test_submit_rejections() {
        let (ledger, id) = ledger_with_rogue();

        let mut over_cap = SkillRanks::zero();
        over_cap.set(30, 3);
        assert!(matches!(ledger.submit_skill_ranks(id, &over_cap), Err(LedgerError::Rejected(_))));

        let mut over_budget = SkillRanks::zero();
        for skill in 1..=36 {
            over_budget.set(skill, 1);
        }
        let result = ledger.submit_skill_ranks(id, &over_budget);
        assert!(matches!(result, Err(LedgerError::Rejected(_))));

        let mut first = SkillRanks::zero();
        first.set(22, 2);
        ledger.submit_skill_ranks(id, &first).unwrap();
        let lowered = SkillRanks::zero();
        assert!(matches!(ledger.submit_skill_ranks(id, &lowered), Err(LedgerError::Rejected(_))));
        assert_eq!(ledger.committed_skills(id).unwrap(), first);
    }

    #[test]
    fn test_submit_requires_attributes() {
        let ledger = InMemoryLedger::new(Arc::new(Codex::default()), 7);
        let id = ledger.summon(ROGUE).unwrap();
        let result = ledger.submit_skill_ranks(id, &SkillRanks::zero());
        assert!(matches!(result, Err(LedgerError::Rejected(_))));
    }

    #[test]
    fn test_injected_failure_is_one_shot() {
        let (ledger, id) = ledger_with_rogue();
        ledger.fail_next_submit("user denied transaction");
        let ranks = SkillRanks::zero();
        assert_eq!(
            ledger.submit_skill_ranks(id, &ranks),
            Err(LedgerError::Rejected("user denied transaction".to_string()))
        );
        assert!(ledger.submit_skill_ranks(id, &ranks).is_ok());
    }

    #[test]
    fn test_level_up_spends_xp() {
        let (ledger, id) = ledger_with_rogue();
        assert!(matches!(ledger.level_up(id), Err(LedgerError::Rejected(_))));

        ledger.grant_xp(id, 1500).unwrap();
        let receipt = ledger.level_up(id).unwrap();
        assert!(receipt.success);
        assert_eq!(ledger.summoner(id).unwrap().level, 2);
        assert_eq!(ledger.experience(id, 2).unwrap(), Experience::new(500, 3000));
        assert_eq!(ledger.state().tx_count, 1);
    }

    #[test]
    fn test_extreme_level_is_reported_not_fatal() {
        let (ledger, id) = ledger_with_rogue();
        let mut state = ledger.state();
        if let Some(record) = state.summoners.get_mut(&id) {
            record.level = u32::MAX;
            record.xp = u64::MAX;
        }
        let ledger = InMemoryLedger::with_state(Arc::new(Codex::default()), state, 7);

        assert!(matches!(ledger.experience(id, u32::MAX), Err(LedgerError::Unavailable(_))));
        let budget = ledger.point_budget(10, ROGUE, u32::MAX);
        assert!(matches!(budget, Err(LedgerError::Unavailable(_))));
        assert!(matches!(ledger.level_up(id), Err(LedgerError::Rejected(_))));
        assert_eq!(ledger.summoner(id).unwrap().level, u32::MAX);
    }

    #[test]
    fn test_offline() {
        let (ledger, id) = ledger_with_rogue();
        ledger.set_offline(true);
        assert!(matches!(ledger.summoner(id), Err(LedgerError::Unavailable(_))));
        ledger.set_offline(false);
        assert!(ledger.summoner(id).is_ok());
    }

    #[test]
    fn test_hashes_are_seeded() {
        let (a, id_a) = ledger_with_rogue();
        let (b, id_b) = ledger_with_rogue();
        let ranks = SkillRanks::zero();
        let ha = a.submit_skill_ranks(id_a, &ranks).unwrap().hash;
        let hb = b.submit_skill_ranks(id_b, &ranks).unwrap().hash;
        assert_eq!(ha, hb);
    }
}
