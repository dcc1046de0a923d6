//! Repositories: SQL for each table family, returning flat rows

pub mod reimbursement;
pub mod tariff;

pub use reimbursement::{ReimbursementRepository, ReimbursementRow};
pub use tariff::{
    FullPackRateRow, FullUnpackRateRow, ItemRateRow, LinehaulRateRow, ServiceAreaRow,
    ShorthaulRateRow, TariffRecord, TariffRepository, Zip3Row,
};
