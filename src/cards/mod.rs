//! Card system: definitions, catalog, owned cards and stat scaling.
//!
//! ## Key Types
//!
//! - `CardDefinition`: Static card data loaded from the catalog files
//! - `CardCatalog`: Immutable name -> definition lookup
//! - `OwnedCard`/`OwnedCards`: A player's collection (level, banked copies)
//! - `StatScaler`: Level-dependent stat growth

pub mod definition;
pub mod catalog;
pub mod owned;
pub mod scaling;

pub use definition::{Ability, AbilityKind, CardCategory, CardDefinition, Rarity, TargetClass};
pub use catalog::CardCatalog;
pub use owned::{OwnedCard, OwnedCards};
pub use scaling::{scale, BelowMinimumLevel, ScaledStats, StatScaler};
