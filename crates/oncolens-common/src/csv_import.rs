//! In-memory CSV table used to pre-fill the feature inputs.
//!
//! Only row lookup and a head preview are supported; the table is never
//! written anywhere.

use tracing::debug;

use crate::error::CsvImportError;
use crate::features::{FeatureVector, FEATURE_FIELDS};

/// Rows shown in the upload preview.
pub const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse an uploaded file. The first record is the header row.
    pub fn parse(bytes: &[u8]) -> Result<Self, CsvImportError> {
        let mut reader = csv::Reader::from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(CsvImportError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        if rows.is_empty() {
            return Err(CsvImportError::NoRows);
        }

        debug!(columns = headers.len(), rows = rows.len(), "Parsed CSV upload");
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Pull a row index into `[0, row_count - 1]`.
    pub fn clamp_row(&self, index: usize) -> usize {
        index.min(self.rows.len().saturating_sub(1))
    }

    /// First `PREVIEW_ROWS` rows, for display.
    pub fn preview(&self) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(PREVIEW_ROWS)]
    }

    /// Feature values for a row, looked up by column name.
    ///
    /// Absent columns, blank cells, and cells that are not numbers yield
    /// 0.0. Values are constrained to the field bounds.
    pub fn row_features(&self, index: usize) -> FeatureVector {
        let row = &self.rows[self.clamp_row(index)];
        let mut out = FeatureVector::default();
        for (i, field) in FEATURE_FIELDS.iter().enumerate() {
            let value = self
                .headers
                .iter()
                .position(|h| h == field.name)
                .and_then(|col| row.get(col))
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            out.set(i, value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,radius_mean,texture_mean,smoothness_mean,compactness_mean,concavity_mean,concave_points_mean,symmetry_mean,fractal_dimension_mean
842302,17.99,10.38,0.1184,0.2776,0.3001,0.1471,0.2419,0.07871
842517,20.57,17.77,0.08474,0.07864,0.0869,0.07017,0.1812,0.05667
";

    #[test]
    fn test_parse_reads_header_and_rows() {
        let table = CsvTable::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.headers()[1], "radius_mean");
    }

    #[test]
    fn test_row_features_follow_canonical_order() {
        let table = CsvTable::parse(SAMPLE.as_bytes()).unwrap();
        let v = table.row_features(0);
        assert_eq!(v.as_slice(), &[17.99, 10.38, 0.1184, 0.2776, 0.3001, 0.1471, 0.2419, 0.0787]);
    }

    #[test]
    fn test_missing_columns_default_to_zero() {
        let csv = "texture_mean,radius_mean\n12.5,14.0\n";
        let table = CsvTable::parse(csv.as_bytes()).unwrap();
        let v = table.row_features(0);
        assert_eq!(v.get(0), Some(14.0));
        assert_eq!(v.get(1), Some(12.5));
        assert!(v.as_slice()[2..].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_unparseable_cells_default_to_zero() {
        let csv = "radius_mean,texture_mean\nn/a,\n";
        let table = CsvTable::parse(csv.as_bytes()).unwrap();
        assert_eq!(table.row_features(0), FeatureVector::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let csv = "radius_mean,smoothness_mean\n250.0,-1\n";
        let table = CsvTable::parse(csv.as_bytes()).unwrap();
        let v = table.row_features(0);
        assert_eq!(v.get(0), Some(120.0));
        assert_eq!(v.get(2), Some(0.0));
    }

    #[test]
    fn test_header_only_file_is_rejected() {
        let err = CsvTable::parse(b"radius_mean,texture_mean\n").unwrap_err();
        assert!(matches!(err, CsvImportError::NoRows));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = CsvTable::parse(b"a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, CsvImportError::Parse(_)));
    }

    #[test]
    fn test_row_index_is_clamped() {
        let table = CsvTable::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.clamp_row(9), 1);
        assert_eq!(table.row_features(9), table.row_features(1));
    }

    #[test]
    fn test_preview_is_bounded() {
        let mut csv = String::from("radius_mean\n");
        for i in 0..12 {
            csv.push_str(&format!("{}\n", i));
        }
        let table = CsvTable::parse(csv.as_bytes()).unwrap();
        assert_eq!(table.preview().len(), PREVIEW_ROWS);
    }
}
