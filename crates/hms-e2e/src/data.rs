//! Spreadsheet data provider.
//!
//! Scenario parameters live in a workbook: a directory holding one headed
//! CSV table per named sheet (`Login`, `DateRange`, `PatientNames`,
//! `AddDepartment`). The first row of a sheet is the header, each
//! subsequent row is one [`DataRecord`]. A scenario consumes the first
//! data row of its sheet per invocation.
//!
//! Missing sheets, rows, or columns are data faults and always propagate;
//! scenarios never convert them into a non-pass outcome.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::result::{E2eError, E2eResult};

/// One row of a sheet, keyed by column header. Read-only for the consuming
/// scenario invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRecord {
    values: HashMap<String, String>,
}

impl DataRecord {
    /// Build a record from header/value pairs
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a parameter by column header.
    ///
    /// # Errors
    ///
    /// Returns a data fault if the column is absent.
    pub fn get(&self, column: &str) -> E2eResult<&str> {
        self.values
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| E2eError::data(format!("column '{column}' not present in record")))
    }

    /// Number of parameters in the record
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named sheet: header plus zero or more data rows
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    rows: Vec<DataRecord>,
}

impl Sheet {
    /// Sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All data rows in file order
    #[must_use]
    pub fn rows(&self) -> &[DataRecord] {
        &self.rows
    }

    /// The first data row, which is the one scenarios consume.
    ///
    /// # Errors
    ///
    /// Returns a data fault if the sheet has a header but no data rows.
    pub fn first_row(&self) -> E2eResult<&DataRecord> {
        self.rows
            .first()
            .ok_or_else(|| E2eError::data(format!("sheet '{}' has no data rows", self.name)))
    }
}

/// A workbook: a directory of named sheets
#[derive(Debug, Clone)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    /// Open a workbook directory.
    ///
    /// # Errors
    ///
    /// Returns a data fault if the directory does not exist.
    pub fn open(dir: impl AsRef<Path>) -> E2eResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(E2eError::data(format!(
                "workbook directory '{}' not found",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Read a named sheet.
    ///
    /// # Errors
    ///
    /// Returns a data fault if the sheet is absent or cannot be parsed.
    pub fn sheet(&self, name: &str) -> E2eResult<Sheet> {
        let path = self.dir.join(format!("{name}.csv"));
        if !path.is_file() {
            return Err(E2eError::data(format!(
                "sheet '{name}' not found in workbook '{}'",
                self.dir.display()
            )));
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(DataRecord::from_pairs(
                headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(|v| v.trim().to_string())),
            ));
        }

        Ok(Sheet {
            name: name.to_string(),
            rows,
        })
    }

    /// Read the first data row of a named sheet
    ///
    /// # Errors
    ///
    /// Returns a data fault if the sheet or row is absent.
    pub fn first_row(&self, name: &str) -> E2eResult<DataRecord> {
        Ok(self.sheet(name)?.first_row()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workbook_with(sheets: &[(&str, &str)]) -> (tempfile::TempDir, Workbook) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in sheets {
            fs::write(dir.path().join(format!("{name}.csv")), body).unwrap();
        }
        let wb = Workbook::open(dir.path()).unwrap();
        (dir, wb)
    }

    mod workbook_tests {
        use super::*;

        #[test]
        fn test_reads_first_row_by_header() {
            let (_dir, wb) = workbook_with(&[(
                "Login",
                "ValidUserName,ValidPassword\nadmin,pass123\nother,secret\n",
            )]);
            let record = wb.first_row("Login").unwrap();
            assert_eq!(record.get("ValidUserName").unwrap(), "admin");
            assert_eq!(record.get("ValidPassword").unwrap(), "pass123");
        }

        #[test]
        fn test_missing_sheet_is_data_fault() {
            let (_dir, wb) = workbook_with(&[]);
            let err = wb.sheet("DateRange").unwrap_err();
            assert!(err.is_data_fault());
        }

        #[test]
        fn test_missing_directory_is_data_fault() {
            let err = Workbook::open("/nonexistent/workbook").unwrap_err();
            assert!(err.is_data_fault());
        }

        #[test]
        fn test_header_only_sheet_has_no_first_row() {
            let (_dir, wb) = workbook_with(&[("PatientNames", "PatientName\n")]);
            let sheet = wb.sheet("PatientNames").unwrap();
            assert!(sheet.first_row().unwrap_err().is_data_fault());
        }

        #[test]
        fn test_values_are_trimmed() {
            let (_dir, wb) = workbook_with(&[("DateRange", "FromDate\n 01-01-2024 \n")]);
            let record = wb.first_row("DateRange").unwrap();
            assert_eq!(record.get("FromDate").unwrap(), "01-01-2024");
        }

        #[test]
        fn test_all_rows_preserved_in_order() {
            let (_dir, wb) = workbook_with(&[("PatientNames", "PatientName\nJohn\nMary\n")]);
            let sheet = wb.sheet("PatientNames").unwrap();
            assert_eq!(sheet.rows().len(), 2);
            assert_eq!(sheet.rows()[1].get("PatientName").unwrap(), "Mary");
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn test_missing_column_is_data_fault() {
            let record = DataRecord::from_pairs([("FromDate", "01-01-2024")]);
            assert!(record.get("ToDate").unwrap_err().is_data_fault());
        }

        #[test]
        fn test_len_and_is_empty() {
            assert!(DataRecord::default().is_empty());
            let record = DataRecord::from_pairs([("A", "1"), ("B", "2")]);
            assert_eq!(record.len(), 2);
        }
    }
}
