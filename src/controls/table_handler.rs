/*
 * Tables are split in two: the widget keeps view state (the selected row)
 * while the cell data lives in a `TableModel` stored in a parallel map keyed by
 * the table id. Data operations replace or patch the model without rebuilding
 * the widget.
 *
 * Every row is normalized to the column count: short rows are padded with
 * empty cells and long rows are truncated.
 */

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TableState {
    pub selected_row: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModel {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    editable: bool,
}

impl TableModel {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>, editable: bool) -> Self {
        let mut model = Self {
            columns,
            rows: Vec::new(),
            editable,
        };
        model.set_rows(rows);
        model
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    fn normalize(&self, mut row: Vec<String>) -> Vec<String> {
        row.resize(self.columns.len(), String::new());
        row
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows.into_iter().map(|row| self.normalize(row)).collect();
    }

    pub(crate) fn append_row(&mut self, row: Vec<String>) {
        let row = self.normalize(row);
        self.rows.push(row);
    }

    pub(crate) fn clear(&mut self) {
        self.rows.clear();
    }

    /// Programmatic write; ignores `editable`. Returns false when out of range.
    pub(crate) fn set_cell(&mut self, row: usize, column: usize, value: &str) -> bool {
        match self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            Some(cell) => {
                *cell = value.to_string();
                true
            }
            None => {
                log::debug!("TableHandler: cell ({row}, {column}) is out of range");
                false
            }
        }
    }

    /// User edit; rejected unless the model is editable.
    pub(crate) fn edit_cell(&mut self, row: usize, column: usize, value: &str) -> bool {
        if !self.editable {
            log::debug!("TableHandler: rejecting edit of ({row}, {column}) on read-only table");
            return false;
        }
        self.set_cell(row, column, value)
    }
}
