//! The Nocturne trait economy.
//!
//! Pure dot-cost arithmetic ([`cost`]), bound guards ([`guard`]), the
//! experience wallet ledger ([`wallet`]), the derived-stat hook
//! ([`derived`]), and the services that put them together:
//! [`TraitValueService`] for trait values and [`SpecialsService`] for edges,
//! perks, gifts and rites.

pub mod cost;
pub mod derived;
pub mod error;
pub mod guard;
pub mod service;
pub mod specials;
pub mod wallet;

pub use derived::Recomputed;
pub use error::{EconomyError, EconomyResult};
pub use service::{CustomTraitRequest, TraitValueService};
pub use specials::SpecialsService;
pub use wallet::{COOL_POINT_VALUE, ExperienceLedger};
