//! CSV loading for the tariff tables
//!
//! A file is loaded whole or not at all: every line is parsed and checked
//! before anything is written, and the insert runs in one transaction.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use infra_db::repositories::{
    FullPackRateRow, FullUnpackRateRow, ItemRateRow, LinehaulRateRow, ServiceAreaRow,
    ShorthaulRateRow, TariffRecord, TariffRepository, Zip3Row,
};

use crate::error::LoaderError;

/// Tables the loader accepts, named as on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TariffTable {
    Linehaul,
    FullPack,
    FullUnpack,
    Shorthaul,
    ServiceArea,
    ItemRate,
    Zip3,
}

impl TariffTable {
    /// Database table the rows land in
    pub fn table_name(&self) -> &'static str {
        match self {
            TariffTable::Linehaul => LinehaulRateRow::TABLE,
            TariffTable::FullPack => FullPackRateRow::TABLE,
            TariffTable::FullUnpack => FullUnpackRateRow::TABLE,
            TariffTable::Shorthaul => ShorthaulRateRow::TABLE,
            TariffTable::ServiceArea => ServiceAreaRow::TABLE,
            TariffTable::ItemRate => ItemRateRow::TABLE,
            TariffTable::Zip3 => Zip3Row::TABLE,
        }
    }
}

/// Parses and checks every record, stopping at the first bad line
///
/// Line numbers count the header as line 1.
pub fn read_records<R, S>(source: S) -> Result<Vec<R>, LoaderError>
where
    R: TariffRecord,
    S: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<R>().enumerate() {
        let line = index as u64 + 2;
        let record = result.map_err(|source| LoaderError::Csv {
            table: R::TABLE,
            line,
            source,
        })?;

        let errors = record.check();
        if errors.has_any() {
            return Err(LoaderError::InvalidRow {
                table: R::TABLE,
                line,
                errors,
            });
        }
        records.push(record);
    }

    debug!(table = R::TABLE, count = records.len(), "Parsed records");
    Ok(records)
}

/// Checks a file without touching the database, returning the row count
pub fn check_table<S: Read>(table: TariffTable, source: S) -> Result<usize, LoaderError> {
    Ok(match table {
        TariffTable::Linehaul => read_records::<LinehaulRateRow, _>(source)?.len(),
        TariffTable::FullPack => read_records::<FullPackRateRow, _>(source)?.len(),
        TariffTable::FullUnpack => read_records::<FullUnpackRateRow, _>(source)?.len(),
        TariffTable::Shorthaul => read_records::<ShorthaulRateRow, _>(source)?.len(),
        TariffTable::ServiceArea => read_records::<ServiceAreaRow, _>(source)?.len(),
        TariffTable::ItemRate => read_records::<ItemRateRow, _>(source)?.len(),
        TariffTable::Zip3 => read_records::<Zip3Row, _>(source)?.len(),
    })
}

/// Parses, checks and inserts a table, returning the number of rows written
pub async fn load_table<S: Read>(
    repository: &TariffRepository,
    table: TariffTable,
    source: S,
) -> Result<u64, LoaderError> {
    let inserted = match table {
        TariffTable::Linehaul => {
            let rows = read_records::<LinehaulRateRow, _>(source)?;
            repository.insert_linehaul_rates(&rows).await?
        }
        TariffTable::FullPack => {
            let rows = read_records::<FullPackRateRow, _>(source)?;
            repository.insert_full_pack_rates(&rows).await?
        }
        TariffTable::FullUnpack => {
            let rows = read_records::<FullUnpackRateRow, _>(source)?;
            repository.insert_full_unpack_rates(&rows).await?
        }
        TariffTable::Shorthaul => {
            let rows = read_records::<ShorthaulRateRow, _>(source)?;
            repository.insert_shorthaul_rates(&rows).await?
        }
        TariffTable::ServiceArea => {
            let rows = read_records::<ServiceAreaRow, _>(source)?;
            repository.insert_service_areas(&rows).await?
        }
        TariffTable::ItemRate => {
            let rows = read_records::<ItemRateRow, _>(source)?;
            repository.insert_item_rates(&rows).await?
        }
        TariffTable::Zip3 => {
            let rows = read_records::<Zip3Row, _>(source)?;
            repository.insert_zip3s(&rows).await?
        }
    };

    info!(table = table.table_name(), inserted, "Loaded tariff table");
    Ok(inserted)
}

/// Opens `path` for one of the functions above
pub fn open(path: &Path) -> Result<File, LoaderError> {
    File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
