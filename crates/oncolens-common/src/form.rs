//! Input form controller.
//!
//! Holds the two data-entry surfaces (manual fields and an imported CSV
//! row) and decides which one supplies the feature vector at submission.

use serde::{Deserialize, Serialize};

use crate::csv_import::CsvTable;
use crate::features::{FeatureVector, FEATURE_COUNT};

/// Which surface a submission draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePolicy {
    /// A loaded CSV always wins over manual entry.
    #[default]
    CsvWins,
    /// The tab the user is looking at wins. CSV tab without a file is absent.
    ActiveTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTab {
    #[default]
    Manual,
    Csv,
}

impl InputTab {
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(InputTab::Manual),
            "csv"    => Some(InputTab::Csv),
            _        => None,
        }
    }

    pub fn param(&self) -> &'static str {
        match self {
            InputTab::Manual => "manual",
            InputTab::Csv    => "csv",
        }
    }
}

/// The surface that produced a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputSource<'a> {
    Manual(&'a FeatureVector),
    CsvRow { row_index: usize, values: &'a FeatureVector },
}

impl InputSource<'_> {
    pub fn values(&self) -> FeatureVector {
        match self {
            InputSource::Manual(v) => **v,
            InputSource::CsvRow { values, .. } => **values,
        }
    }
}

/// A loaded file plus the editable values of the selected row.
#[derive(Debug, Clone)]
pub struct CsvImport {
    pub file_name: String,
    pub table: CsvTable,
    row_index: usize,
    values: FeatureVector,
}

impl CsvImport {
    pub fn new(file_name: impl Into<String>, table: CsvTable) -> Self {
        let values = table.row_features(0);
        Self { file_name: file_name.into(), table, row_index: 0, values }
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn values(&self) -> &FeatureVector {
        &self.values
    }
}

/// Per-session form state.
#[derive(Debug, Clone, Default)]
pub struct InputForm {
    manual: FeatureVector,
    csv: Option<CsvImport>,
    active_tab: InputTab,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manual(&self) -> &FeatureVector {
        &self.manual
    }

    pub fn csv(&self) -> Option<&CsvImport> {
        self.csv.as_ref()
    }

    pub fn active_tab(&self) -> InputTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: InputTab) {
        self.active_tab = tab;
    }

    /// Constrained write to a manual input.
    pub fn set_manual(&mut self, index: usize, value: f64) -> bool {
        self.manual.set(index, value)
    }

    /// Load a parsed upload; row 0 is selected and pre-filled.
    pub fn load_csv(&mut self, file_name: impl Into<String>, table: CsvTable) {
        self.csv = Some(CsvImport::new(file_name, table));
        self.active_tab = InputTab::Csv;
    }

    pub fn clear_csv(&mut self) {
        self.csv = None;
        self.active_tab = InputTab::Manual;
    }

    /// Select a row and re-derive its values. Edits made to the previously
    /// selected row are dropped. Returns the effective (clamped) index, or
    /// `None` if no file is loaded.
    pub fn select_row(&mut self, index: usize) -> Option<usize> {
        let import = self.csv.as_mut()?;
        let index = import.table.clamp_row(index);
        import.row_index = index;
        import.values = import.table.row_features(index);
        Some(index)
    }

    /// Constrained write to a pre-filled CSV input. No-op without a file.
    pub fn set_csv_value(&mut self, index: usize, value: f64) -> bool {
        match self.csv.as_mut() {
            Some(import) => import.values.set(index, value),
            None => false,
        }
    }

    /// The surface that would be submitted right now under `policy`.
    pub fn active_source(&self, policy: SourcePolicy) -> Option<InputSource<'_>> {
        let csv = self.csv.as_ref().map(|c| InputSource::CsvRow {
            row_index: c.row_index,
            values: &c.values,
        });
        match policy {
            SourcePolicy::CsvWins => csv.or(Some(InputSource::Manual(&self.manual))),
            SourcePolicy::ActiveTab => match self.active_tab {
                InputTab::Manual => Some(InputSource::Manual(&self.manual)),
                InputTab::Csv => csv,
            },
        }
    }

    /// Derive the vector to submit. Evaluated fresh on every call.
    pub fn collect_features(&self, policy: SourcePolicy) -> Option<FeatureVector> {
        self.active_source(policy).map(|s| s.values())
    }
}

/// Posted values, keyed the way the page names its inputs.
///
/// Parsing is lenient: blank or malformed entries are skipped so the
/// existing value stays in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    pub manual: [Option<f64>; FEATURE_COUNT],
    pub csv: [Option<f64>; FEATURE_COUNT],
    pub row_index: Option<usize>,
    pub model: Option<String>,
    pub tab: Option<InputTab>,
}

pub const MANUAL_PREFIX: &str = "manual_";
pub const CSV_PREFIX: &str = "csv_";

impl FormSubmission {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            if let Some(name) = key.strip_prefix(MANUAL_PREFIX) {
                if let Some((i, _)) = crate::features::FeatureField::by_name(name) {
                    out.manual[i] = value.parse().ok();
                }
            } else if let Some(name) = key.strip_prefix(CSV_PREFIX) {
                if let Some((i, _)) = crate::features::FeatureField::by_name(name) {
                    out.csv[i] = value.parse().ok();
                }
            } else if key == "row_index" {
                out.row_index = value.parse().ok();
            } else if key == "model" && !value.is_empty() {
                out.model = Some(value.to_string());
            } else if key == "tab" {
                out.tab = InputTab::from_param(value);
            }
        }
        out
    }

    /// Apply posted values to the form.
    ///
    /// A changed row index re-derives the row and ignores the posted CSV
    /// values, which belonged to the previous row.
    pub fn apply_to(&self, form: &mut InputForm) {
        if let Some(tab) = self.tab {
            form.set_active_tab(tab);
        }
        for (i, v) in self.manual.iter().enumerate() {
            if let Some(v) = v {
                form.set_manual(i, *v);
            }
        }

        let new_row = match (self.row_index, form.csv()) {
            (Some(posted), Some(csv)) if csv.table.clamp_row(posted) != csv.row_index() => Some(posted),
            _ => None,
        };

        if let Some(row) = new_row {
            form.select_row(row);
        } else {
            for (i, v) in self.csv.iter().enumerate() {
                if let Some(v) = v {
                    form.set_csv_value(i, *v);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_table() -> CsvTable {
        CsvTable::parse(
            b"radius_mean,texture_mean,smoothness_mean\n\
              17.99,10.38,0.1184\n\
              20.57,17.77,0.0847\n",
        )
        .unwrap()
    }

    #[test]
    fn test_untouched_manual_form_yields_zero_vector() {
        let form = InputForm::new();
        let v = form.collect_features(SourcePolicy::CsvWins).unwrap();
        assert_eq!(v, FeatureVector::default());
        assert_eq!(v.as_slice().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_csv_wins_over_manual_values() {
        let mut form = InputForm::new();
        form.set_manual(0, 5.0);
        form.load_csv("cells.csv", two_row_table());
        form.set_active_tab(InputTab::Manual);

        let v = form.collect_features(SourcePolicy::CsvWins).unwrap();
        assert_eq!(v.get(0), Some(17.99));
        assert!(matches!(
            form.active_source(SourcePolicy::CsvWins),
            Some(InputSource::CsvRow { row_index: 0, .. })
        ));
    }

    #[test]
    fn test_csv_edits_are_submitted() {
        let mut form = InputForm::new();
        form.load_csv("cells.csv", two_row_table());
        form.set_csv_value(1, 11.0);
        let v = form.collect_features(SourcePolicy::CsvWins).unwrap();
        assert_eq!(v.get(1), Some(11.0));
    }

    #[test]
    fn test_selecting_row_discards_previous_edits() {
        let mut form = InputForm::new();
        form.load_csv("cells.csv", two_row_table());
        form.set_csv_value(0, 1.0);
        assert_eq!(form.select_row(1), Some(1));
        assert_eq!(form.csv().unwrap().values().get(0), Some(20.57));
        form.select_row(0);
        assert_eq!(form.csv().unwrap().values().get(0), Some(17.99));
    }

    #[test]
    fn test_active_tab_policy_follows_tab() {
        let mut form = InputForm::new();
        form.set_manual(0, 3.0);
        form.load_csv("cells.csv", two_row_table());

        form.set_active_tab(InputTab::Manual);
        assert_eq!(form.collect_features(SourcePolicy::ActiveTab).unwrap().get(0), Some(3.0));

        form.set_active_tab(InputTab::Csv);
        assert_eq!(form.collect_features(SourcePolicy::ActiveTab).unwrap().get(0), Some(17.99));
    }

    #[test]
    fn test_active_tab_policy_without_file_is_absent() {
        let mut form = InputForm::new();
        form.set_active_tab(InputTab::Csv);
        assert!(form.collect_features(SourcePolicy::ActiveTab).is_none());
        // CsvWins never reports absence.
        assert!(form.collect_features(SourcePolicy::CsvWins).is_some());
    }

    #[test]
    fn test_clear_csv_returns_to_manual() {
        let mut form = InputForm::new();
        form.set_manual(0, 2.0);
        form.load_csv("cells.csv", two_row_table());
        form.clear_csv();
        assert_eq!(form.active_tab(), InputTab::Manual);
        assert_eq!(form.collect_features(SourcePolicy::CsvWins).unwrap().get(0), Some(2.0));
        assert!(!form.set_csv_value(0, 1.0));
    }

    #[test]
    fn test_submission_parses_prefixed_keys() {
        let sub = FormSubmission::from_pairs([
            ("manual_radius_mean", "14.2"),
            ("csv_texture_mean", "19.5"),
            ("row_index", "1"),
            ("model", "svc"),
            ("manual_unknown", "1.0"),
            ("manual_symmetry_mean", ""),
            ("tab", "csv"),
        ]);
        assert_eq!(sub.tab, Some(InputTab::Csv));
        assert_eq!(sub.manual[0], Some(14.2));
        assert_eq!(sub.manual[6], None);
        assert_eq!(sub.csv[1], Some(19.5));
        assert_eq!(sub.row_index, Some(1));
        assert_eq!(sub.model.as_deref(), Some("svc"));
    }

    #[test]
    fn test_submission_row_change_ignores_posted_csv_values() {
        let mut form = InputForm::new();
        form.load_csv("cells.csv", two_row_table());
        let sub = FormSubmission::from_pairs([
            ("row_index", "1"),
            ("csv_radius_mean", "1.5"),
        ]);
        sub.apply_to(&mut form);
        let csv = form.csv().unwrap();
        assert_eq!(csv.row_index(), 1);
        assert_eq!(csv.values().get(0), Some(20.57));
    }

    #[test]
    fn test_submission_same_row_applies_csv_edits() {
        let mut form = InputForm::new();
        form.load_csv("cells.csv", two_row_table());
        let sub = FormSubmission::from_pairs([
            ("row_index", "0"),
            ("csv_radius_mean", "1.5"),
            ("manual_radius_mean", "999"),
        ]);
        sub.apply_to(&mut form);
        assert_eq!(form.csv().unwrap().values().get(0), Some(1.5));
        assert_eq!(form.manual().get(0), Some(120.0));
    }
}
