//! Game clock, station state machine, and day-loop orchestration for the
//! Orbital Artisan Foundry simulation.
//!
//! # Modules
//!
//! - [`clock`] -- Day counter with checked advancement.
//! - [`config`] -- Configuration loading from `foundry-config.yaml` into
//!   strongly-typed structs.
//! - [`ledger`] -- Checked debit/credit helpers for the resource ledger.
//! - [`log`] -- The capped, newest-first operations log.
//! - [`runner`] -- The wall-clock game loop and [`DayCallback`] seam.
//! - [`station`] -- The station state machine: quest acceptance, the
//!   single active process, and the daily tick transition.
//!
//! [`DayCallback`]: runner::DayCallback

pub mod clock;
pub mod config;
pub mod ledger;
pub mod log;
pub mod runner;
pub mod station;

pub use clock::{ClockError, GameClock};
pub use config::{ConfigError, FoundryConfig};
pub use station::{AcceptOutcome, CompletedContract, DaySummary, Station};
