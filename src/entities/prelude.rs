//! `SeaORM` entity re-exports

pub use super::bid_calculations::Entity as BidCalculations;
pub use super::bids::Entity as Bids;
pub use super::contractor_settings::Entity as ContractorSettings;
pub use super::contractors::Entity as Contractors;
pub use super::jobs::Entity as Jobs;
