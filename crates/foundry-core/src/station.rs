//! The station state machine.
//!
//! [`Station`] owns all mutable game state: the clock, the resource
//! ledger, the offer board, the single active process, and the operations
//! log. Every transition (`accept_quest`, `advance_day`,
//! `begin_offer_refresh`, `commit_offers`) runs to completion inside one
//! `&mut self` call, so no partial mutation is ever observable.
//!
//! # Process lifecycle
//!
//! `Idle -> InProgress(days_remaining > 0) -> Idle`. There is no pause,
//! cancel, or failure state: once a contract is accepted it runs to
//! completion. Rejected transitions (bay busy, insufficient materials,
//! unknown contract) are no-ops that only append a log entry.

use foundry_types::{ActiveProcess, LogEntry, ProcessKind, Quest, QuestId, QuestReward, ResourceLedger};
use tracing::{debug, info};

use crate::clock::{ClockError, GameClock};
use crate::config::FoundryConfig;
use crate::ledger::{self, LedgerError};
use crate::log::OperationsLog;

/// Outcome of a quest acceptance attempt.
///
/// Rejections are ordinary values, not errors: the caller surfaced them
/// to the player through the log entry the station already appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The contract was accepted and manufacturing has begun.
    Started,
    /// Another process is already in progress.
    ProcessBusy,
    /// The station holds fewer materials than the contract requires.
    InsufficientMaterials,
    /// The id does not name a contract currently on the offer board.
    UnknownQuest,
}

impl AcceptOutcome {
    /// Whether the acceptance succeeded.
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}

/// A contract that finished during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedContract {
    /// Title of the manufactured item.
    pub title: String,
    /// The reward that was credited.
    pub reward: QuestReward,
}

/// Summary of a single day's tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    /// The day number that just started.
    pub day: u64,
    /// The active process after the tick, if one remains.
    pub process: Option<ActiveProcess>,
    /// The contract that completed this tick, if any.
    pub completed: Option<CompletedContract>,
}

/// The station: clock, ledger, offer board, active process, and log.
#[derive(Debug, Clone)]
pub struct Station {
    clock: GameClock,
    ledger: ResourceLedger,
    offers: Vec<Quest>,
    active: Option<ActiveProcess>,
    log: OperationsLog,
    generating_offers: bool,
    level: u32,
}

impl Station {
    /// Create a fresh station seeded from configuration.
    pub fn new(config: &FoundryConfig) -> Self {
        let ledger = ResourceLedger {
            cash: config.resources.cash,
            materials: config.resources.materials,
            power: config.resources.power,
            research_points: config.resources.research_points,
        };
        let clock = GameClock::new();
        let mut log = OperationsLog::new();
        log.append(
            clock.day(),
            format!(
                "Welcome to the {}! Generate new quests to begin.",
                config.station.name
            ),
        );
        Self {
            clock,
            ledger,
            offers: Vec::new(),
            active: None,
            log,
            generating_offers: false,
            level: config.station.level,
        }
    }

    // -- Read accessors -----------------------------------------------------

    /// Current simulated day.
    pub const fn day(&self) -> u64 {
        self.clock.day()
    }

    /// Copy of the resource ledger.
    pub const fn ledger(&self) -> ResourceLedger {
        self.ledger
    }

    /// The contracts currently on the offer board.
    pub fn offers(&self) -> &[Quest] {
        &self.offers
    }

    /// The active process, if one is running.
    pub const fn active_process(&self) -> Option<&ActiveProcess> {
        self.active.as_ref()
    }

    /// Whether an offer refresh is currently in flight.
    pub const fn is_generating_offers(&self) -> bool {
        self.generating_offers
    }

    /// Station level, passed through to the quest generator.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Clone of the operations log, newest entry first.
    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.log.snapshot()
    }

    // -- Transitions --------------------------------------------------------

    /// Accept a contract from the offer board and start manufacturing.
    ///
    /// Guards, in order: no process may be running, the id must name a
    /// current offer, and the ledger must hold enough materials. A failed
    /// guard leaves all state unchanged except for one new log entry.
    ///
    /// On success: materials are debited, the process starts at progress
    /// 0 with the contract's full duration remaining, and the entire
    /// offer board is cleared -- unaccepted offers are discarded, not
    /// banked.
    pub fn accept_quest(&mut self, id: QuestId) -> AcceptOutcome {
        let day = self.clock.day();

        if self.active.is_some() {
            self.log
                .append(day, "Cannot start a new project while another is in progress.");
            return AcceptOutcome::ProcessBusy;
        }

        let Some(quest) = self.offers.iter().find(|q| q.id == id).cloned() else {
            self.log.append(day, "That contract is no longer on the board.");
            return AcceptOutcome::UnknownQuest;
        };

        match ledger::debit_materials(&mut self.ledger, quest.requirements.materials) {
            Ok(()) => {}
            Err(LedgerError::InsufficientMaterials { .. }) => {
                self.log
                    .append(day, "Insufficient materials to start this project.");
                return AcceptOutcome::InsufficientMaterials;
            }
        }

        let total_days = quest.requirements.time_days;
        let title = quest.title.clone();
        info!(quest_id = %quest.id, title = %title, eta_days = total_days, "contract accepted");

        self.active = Some(ActiveProcess {
            kind: ProcessKind::Manufacturing,
            quest,
            progress: 0.0,
            days_remaining: total_days,
            total_days,
        });
        self.offers.clear();
        self.log.append(
            day,
            format!("Manufacturing of '{title}' has begun. ETA: {total_days} days."),
        );
        AcceptOutcome::Started
    }

    /// Advance the clock by one day and, if a process is running, advance
    /// it too.
    ///
    /// When the process's remaining time reaches zero it completes
    /// atomically within this call: the process is cleared, the reward is
    /// credited, and two log entries (completion, then delivery) are
    /// appended. Otherwise the remaining time drops by one and progress
    /// is recomputed against the original duration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the day counter would
    /// overflow; the process is left untouched in that case.
    pub fn advance_day(&mut self) -> Result<DaySummary, ClockError> {
        let day = self.clock.advance()?;

        let mut completed = None;
        if let Some(process) = self.active.take() {
            let remaining = process.days_remaining.saturating_sub(1);
            if remaining == 0 {
                let quest = process.quest;
                self.log.append(
                    day,
                    format!(
                        "Manufacturing of '{}' complete! Ready for delivery.",
                        quest.title
                    ),
                );
                ledger::credit_reward(&mut self.ledger, &quest.reward);
                self.log.append(
                    day,
                    format!(
                        "Product delivered. Received +${} and +{} RP.",
                        quest.reward.cash, quest.reward.research
                    ),
                );
                info!(title = %quest.title, cash = quest.reward.cash, research = quest.reward.research, "contract completed");
                completed = Some(CompletedContract {
                    title: quest.title,
                    reward: quest.reward,
                });
            } else {
                let progress = completion_percent(process.total_days, remaining);
                debug!(days_remaining = remaining, progress, "process advanced");
                self.active = Some(ActiveProcess {
                    days_remaining: remaining,
                    progress,
                    ..process
                });
            }
        }

        Ok(DaySummary {
            day,
            process: self.active.clone(),
            completed,
        })
    }

    /// Mark an offer refresh as started, if one is allowed.
    ///
    /// Refreshing is rejected while a generation is already in flight,
    /// while offers are still on the board, or while a process is
    /// running -- the same conditions that disable the button in the
    /// dashboard. Returns `true` when the caller should go generate.
    pub fn begin_offer_refresh(&mut self) -> bool {
        if self.generating_offers || !self.offers.is_empty() || self.active.is_some() {
            return false;
        }
        self.generating_offers = true;
        self.log.append(
            self.clock.day(),
            "Contacting clients for new high-value contracts...",
        );
        true
    }

    /// Commit a freshly generated offer set to the board.
    ///
    /// Applies the joined result of the generation fan-out in one step
    /// and clears the in-flight flag.
    pub fn commit_offers(&mut self, offers: Vec<Quest>) {
        self.offers = offers;
        self.generating_offers = false;
        self.log.append(
            self.clock.day(),
            "New contracts received and available on the quest board.",
        );
    }
}

/// Percentage of the original duration already elapsed.
///
/// `total_days` is the duration fixed at acceptance; it is never
/// recomputed from the remaining time.
fn completion_percent(total_days: u64, days_remaining: u64) -> f64 {
    if total_days == 0 {
        return 100.0;
    }
    let done = total_days.saturating_sub(days_remaining);
    // Durations are single-digit-to-double-digit days; clamping to u32
    // keeps the f64 conversion exact.
    let done = u32::try_from(done).unwrap_or(u32::MAX);
    let total = u32::try_from(total_days).unwrap_or(u32::MAX);
    (f64::from(done) / f64::from(total)) * 100.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use chrono::Utc;
    use foundry_types::{QuestOrigin, QuestRequirements};

    use super::*;

    fn make_quest(materials: u64, time_days: u64, cash: u64, research: u64) -> Quest {
        Quest {
            id: QuestId::new(),
            origin: QuestOrigin::Generated,
            title: "Cryo-Formed Turbine Blade".to_owned(),
            client: "Helion Composites".to_owned(),
            description: "A single-crystal blade grown in microgravity.".to_owned(),
            requirements: QuestRequirements {
                materials,
                time_days,
            },
            reward: QuestReward { cash, research },
            generated_at: Utc::now(),
        }
    }

    fn station_with_offers(offers: Vec<Quest>) -> Station {
        let mut station = Station::new(&FoundryConfig::default());
        assert!(station.begin_offer_refresh());
        station.commit_offers(offers);
        station
    }

    #[test]
    fn fresh_station_is_idle_with_seed_resources() {
        let station = Station::new(&FoundryConfig::default());
        assert_eq!(station.day(), 1);
        assert!(station.active_process().is_none());
        assert!(station.offers().is_empty());
        assert_eq!(station.ledger().cash, 50_000);
        assert_eq!(station.ledger().materials, 1_000);
        // The welcome line is already in the log.
        assert_eq!(station.log_entries().len(), 1);
    }

    #[test]
    fn accepting_a_quest_debits_materials_and_clears_the_board() {
        let quest = make_quest(200, 5, 20_000, 30);
        let id = quest.id;
        let other = make_quest(100, 7, 15_000, 20);
        let mut station = station_with_offers(vec![quest, other]);

        assert_eq!(station.accept_quest(id), AcceptOutcome::Started);
        assert_eq!(station.ledger().materials, 800);
        // The unaccepted offer is discarded, not banked.
        assert!(station.offers().is_empty());

        let process = station.active_process().unwrap();
        assert_eq!(process.kind, ProcessKind::Manufacturing);
        assert_eq!(process.days_remaining, 5);
        assert_eq!(process.total_days, 5);
        assert_eq!(process.progress, 0.0);
    }

    #[test]
    fn second_acceptance_while_busy_changes_nothing_but_the_log() {
        let first = make_quest(100, 5, 10_000, 10);
        let second = make_quest(100, 5, 10_000, 10);
        let first_id = first.id;
        let second_id = second.id;
        let mut station = station_with_offers(vec![first, second]);
        assert!(station.accept_quest(first_id).is_started());

        let ledger_before = station.ledger();
        let log_len_before = station.log_entries().len();

        assert_eq!(station.accept_quest(second_id), AcceptOutcome::ProcessBusy);
        assert_eq!(station.ledger(), ledger_before);
        assert_eq!(station.active_process().unwrap().quest.id, first_id);
        assert_eq!(station.log_entries().len(), log_len_before + 1);
    }

    #[test]
    fn insufficient_materials_rejects_without_debit() {
        let quest = make_quest(5_000, 5, 10_000, 10);
        let id = quest.id;
        let mut station = station_with_offers(vec![quest]);

        assert_eq!(
            station.accept_quest(id),
            AcceptOutcome::InsufficientMaterials
        );
        assert_eq!(station.ledger().materials, 1_000);
        assert!(station.active_process().is_none());
        // The rejected offer stays on the board.
        assert_eq!(station.offers().len(), 1);
    }

    #[test]
    fn unknown_quest_id_is_rejected() {
        let mut station = station_with_offers(vec![make_quest(100, 5, 10_000, 10)]);
        assert_eq!(
            station.accept_quest(QuestId::new()),
            AcceptOutcome::UnknownQuest
        );
        assert!(station.active_process().is_none());
    }

    #[test]
    fn progress_is_monotone_and_exact() {
        let quest = make_quest(100, 4, 10_000, 10);
        let id = quest.id;
        let mut station = station_with_offers(vec![quest]);
        assert!(station.accept_quest(id).is_started());

        // After k ticks (k < T): days_remaining = T - k, progress = k/T*100.
        let summary = station.advance_day().unwrap();
        let process = summary.process.unwrap();
        assert_eq!(process.days_remaining, 3);
        assert_eq!(process.progress, 25.0);

        let summary = station.advance_day().unwrap();
        let process = summary.process.unwrap();
        assert_eq!(process.days_remaining, 2);
        assert_eq!(process.progress, 50.0);

        let summary = station.advance_day().unwrap();
        let process = summary.process.unwrap();
        assert_eq!(process.days_remaining, 1);
        assert_eq!(process.progress, 75.0);
    }

    #[test]
    fn completion_credits_exactly_the_reward_and_nothing_else() {
        let quest = make_quest(200, 5, 20_000, 30);
        let id = quest.id;
        let mut station = station_with_offers(vec![quest]);
        assert!(station.accept_quest(id).is_started());

        let before = station.ledger();
        let mut completed = None;
        for _ in 0..5 {
            completed = station.advance_day().unwrap().completed;
        }

        let completed = completed.unwrap();
        assert_eq!(completed.reward.cash, 20_000);
        assert!(station.active_process().is_none());

        let after = station.ledger();
        assert_eq!(after.cash, before.cash + 20_000);
        assert_eq!(after.research_points, before.research_points + 30);
        assert_eq!(after.materials, before.materials);
        assert_eq!(after.power, before.power);
    }

    #[test]
    fn completion_appends_two_log_entries_in_order() {
        let quest = make_quest(100, 1, 10_000, 10);
        let id = quest.id;
        let mut station = station_with_offers(vec![quest]);
        assert!(station.accept_quest(id).is_started());

        station.advance_day().unwrap();
        let entries = station.log_entries();
        // Newest first: delivery notice, then completion notice.
        assert!(entries[0].message.starts_with("Product delivered."));
        assert!(entries[1].message.contains("complete! Ready for delivery."));
    }

    #[test]
    fn tick_with_no_process_only_advances_the_day() {
        let mut station = Station::new(&FoundryConfig::default());
        let before = station.ledger();
        let summary = station.advance_day().unwrap();
        assert_eq!(summary.day, 2);
        assert!(summary.process.is_none());
        assert!(summary.completed.is_none());
        assert_eq!(station.ledger(), before);
    }

    #[test]
    fn refresh_is_rejected_while_generating_offered_or_busy() {
        let mut station = Station::new(&FoundryConfig::default());

        assert!(station.begin_offer_refresh());
        // Already in flight.
        assert!(!station.begin_offer_refresh());

        let quest = make_quest(100, 5, 10_000, 10);
        let id = quest.id;
        station.commit_offers(vec![quest]);
        // Offers still on the board.
        assert!(!station.begin_offer_refresh());

        assert!(station.accept_quest(id).is_started());
        // Process running.
        assert!(!station.begin_offer_refresh());
    }

    #[test]
    fn full_scenario_from_acceptance_to_delivery() {
        // Start with materials=1000; accept materials=200, time=5,
        // cash=20000, research=30; after 5 ticks everything resolves.
        let quest = make_quest(200, 5, 20_000, 30);
        let id = quest.id;
        let mut station = station_with_offers(vec![quest]);
        let day_before = station.day();

        assert!(station.accept_quest(id).is_started());
        assert_eq!(station.ledger().materials, 800);

        for _ in 0..5 {
            station.advance_day().unwrap();
        }

        assert_eq!(station.ledger().materials, 800);
        assert_eq!(station.ledger().cash, 50_000 + 20_000);
        assert_eq!(station.ledger().research_points, 30);
        assert!(station.active_process().is_none());
        assert_eq!(station.day(), day_before + 5);
    }
}
