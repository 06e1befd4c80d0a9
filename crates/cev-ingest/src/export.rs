//! Equipment CSV export
//!
//! Writes equipment rows as a downloadable CSV stream with the fixed
//! six-column header used by the export endpoint.

use cev_common::EquipmentFields;

/// Export column header, in wire order.
pub const EXPORT_HEADER: [&str; 6] = [
    "Name",
    "Type",
    "Material",
    "Flowrate",
    "Pressure",
    "Temperature",
];

/// Serialize equipment rows into CSV bytes.
///
/// The header row is always emitted, so an empty selection produces a
/// header-only file rather than an empty body.
pub fn write_equipment_csv<'a, I>(rows: I) -> Result<Vec<u8>, csv::Error>
where
    I: IntoIterator<Item = &'a EquipmentFields>,
{
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(EXPORT_HEADER)?;

        for row in rows {
            writer.write_record(&[
                row.name.as_str(),
                row.equipment_type.as_str(),
                row.material.as_str(),
                &row.flowrate.to_string(),
                &row.pressure.to_string(),
                &row.temperature.to_string(),
            ])?;
        }

        writer.flush()?;
    }

    Ok(buf)
}
