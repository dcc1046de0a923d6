//! Tariff adapters that live alongside the domain

pub mod memory;

pub use memory::InMemoryTariffTable;
