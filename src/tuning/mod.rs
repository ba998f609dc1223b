//! Read-only tuning data: HQ, chopper, XP, card-upgrade, box and league tables.

pub mod tables;

pub use tables::{
    BoxKind, BoxTuning, ChopperLevel, HqLevel, League, ScriptedDefense, TuningTables, UpgradeStep, XpLevel,
};
