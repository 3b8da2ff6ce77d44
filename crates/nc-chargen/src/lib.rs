//! Procedural character generation for Nocturne.
//!
//! A [`CharacterGenerator`] rolls a class on the percentile table, picks a
//! name and concept, runs the class step (clan and disciplines, tribe and
//! gifts, or creed and edges), then fills in attributes, abilities,
//! advantages, flaws and tracks. The building blocks are usable on their
//! own: [`allocate()`] spreads bonus dots, [`divide()`] splits a total into
//! bounded random parts, and [`CandidatePool`] samples without replacement.

pub mod allocate;
pub mod base;
pub mod config;
pub mod divide;
pub mod error;
pub mod generator;
pub mod hunter;
pub mod level;
mod lookup;
pub mod name;
pub mod percentile;
pub mod report;
pub mod sample;
pub mod tables;
pub mod vampire;
pub mod werewolf;

pub use allocate::{Allocation, allocate};
pub use config::ChargenConfig;
pub use divide::divide;
pub use error::{ChargenError, ChargenResult};
pub use generator::{CharacterGenerator, GenerateOptions, GeneratedCharacter, GenerationReport};
pub use level::{AbilityFocus, ExperienceLevel, PerLevel};
pub use percentile::{
    Bucket, MORTAL_PERCENTILE, PercentileTable, build_percentile_table, class_from_percentile,
    roll_class,
};
pub use report::Shortfall;
pub use sample::CandidatePool;
