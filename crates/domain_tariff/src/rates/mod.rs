//! Rate tables
//!
//! Each table pairs a row type with the query that selects from it.

pub mod linehaul;
pub mod full_pack;
pub mod full_unpack;
pub mod shorthaul;
pub mod service_area;
pub mod item_rate;
pub mod zip3;

pub use linehaul::{LinehaulQuery, LinehaulRate, LinehaulType};
pub use full_pack::{FullPackQuery, FullPackRate};
pub use full_unpack::{FullUnpackQuery, FullUnpackRate};
pub use shorthaul::{ShorthaulQuery, ShorthaulRate};
pub use service_area::{ServiceArea, ServiceAreaQuery};
pub use item_rate::{ItemRate, ItemRateQuery};
pub use zip3::Zip3;

/// Services schedules run from 1 to 3
pub(crate) const SCHEDULE_MIN: i64 = 1;
pub(crate) const SCHEDULE_MAX: i64 = 3;
