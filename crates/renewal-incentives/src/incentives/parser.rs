use std::io::Read;

use super::domain::DataLoadError;

pub(crate) const IDENTITY_COLUMNS: usize = 3;
pub(crate) const BAND_COLUMNS: usize = 4;

/// A raw table row before forward-fill. Blank cells are `None`.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRow {
    pub(crate) category: Option<String>,
    pub(crate) current_fuel: Option<String>,
    pub(crate) replacement_fuel: Option<String>,
    pub(crate) bands: [Option<String>; BAND_COLUMNS],
}

/// Reads the wide-format table. Columns bind positionally: three identity
/// columns then the four band columns, regardless of the labels the source's
/// own header row declares. The header row itself is skipped.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, DataLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let expected = IDENTITY_COLUMNS + BAND_COLUMNS;
    let mut rows = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() != expected {
            return Err(DataLoadError::ColumnCount {
                row: index + 1,
                expected,
                found: record.len(),
            });
        }

        rows.push(RawRow {
            category: non_empty(record.get(0)),
            current_fuel: non_empty(record.get(1)),
            replacement_fuel: non_empty(record.get(2)),
            bands: [
                non_empty(record.get(3)),
                non_empty(record.get(4)),
                non_empty(record.get(5)),
                non_empty(record.get(6)),
            ],
        });
    }

    if rows.is_empty() {
        return Err(DataLoadError::EmptyTable);
    }

    Ok(rows)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Categoria,Combustible actual,Combustible de reemplazo,<2000,2000-2002,2003-2006,2007-2017\n";

    #[test]
    fn blank_cells_become_none() {
        let data = format!("{HEADER}SUV,Gasolina,Electrico,100,200,,400\n,,Hibrido,150,,350,450\n");
        let rows = parse_rows(Cursor::new(data)).expect("rows parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category.as_deref(), Some("SUV"));
        assert_eq!(rows[0].bands[2], None);
        assert_eq!(rows[1].category, None);
        assert_eq!(rows[1].current_fuel, None);
        assert_eq!(rows[1].replacement_fuel.as_deref(), Some("Hibrido"));
        assert_eq!(rows[1].bands[1], None);
    }

    #[test]
    fn cells_are_trimmed() {
        let data = format!("{HEADER}  SUV ,Gasolina, Electrico ,100, 200 ,300,400\n");
        let rows = parse_rows(Cursor::new(data)).expect("rows parse");

        assert_eq!(rows[0].category.as_deref(), Some("SUV"));
        assert_eq!(rows[0].replacement_fuel.as_deref(), Some("Electrico"));
        assert_eq!(rows[0].bands[1].as_deref(), Some("200"));
    }

    #[test]
    fn short_row_is_a_structural_failure() {
        let data = format!("{HEADER}SUV,Gasolina,Electrico,100\n");
        let error = parse_rows(Cursor::new(data)).expect_err("width mismatch rejected");

        match error {
            DataLoadError::ColumnCount {
                row,
                expected,
                found,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, 7);
                assert_eq!(found, 4);
            }
            other => panic!("expected column-count error, got {other:?}"),
        }
    }

    #[test]
    fn header_only_table_is_empty() {
        let error = parse_rows(Cursor::new(HEADER)).expect_err("empty sheet rejected");
        assert!(matches!(error, DataLoadError::EmptyTable));
    }
}
