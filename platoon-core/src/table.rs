use std::fmt;

/// A labelled matrix of results: one row per trial.
///
/// The table only holds the values and their labels; how it is persisted
/// is left to the caller. The [`Display`](fmt::Display) implementation
/// prints a human readable grid.
///
/// # Example
///
/// ```
/// use platoon_core::Table;
///
/// let mut table = Table::new("Reliabilities", vec!["1 TRUCK(s)".to_owned()]);
/// table.push_row(vec![0.5]);
/// table.push_row(vec![1.0]);
///
/// assert_eq!(table.get(1, 0), Some(1.0));
/// assert_eq!(table.column_mean(0), Some(0.75));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// The two tables produced by a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationTables {
    /// `reliability[trial][k - 1]`: reliability of a platoon of `k` trucks
    pub reliability: Table,
    /// `system_time[trial][i]`: system time of packet `i` after the last truck
    pub system_time: Table,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// table with the `"{k} TRUCK(s)"` headers, `k` in `1..=stations`
    pub fn reliability(stations: usize) -> Self {
        let headers = (1..=stations).map(|k| format!("{k} TRUCK(s)")).collect();
        Self::new("Reliabilities", headers)
    }

    /// table with the `"PACKET {i}"` headers, `i` in `1..=packets`
    pub fn system_time(packets: usize) -> Self {
        let headers = (1..=packets).map(|i| format!("PACKET {i}")).collect();
        Self::new("System Times", headers)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// label of the given row, rows are numbered from `1`
    pub fn row_label(&self, row: usize) -> String {
        format!("TRIAL {}", row + 1)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn push_row(&mut self, row: Vec<f64>) {
        debug_assert_eq!(
            row.len(),
            self.headers.len(),
            "row length must match the number of headers"
        );
        self.rows.push(row);
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row)?.get(column).copied()
    }

    pub fn column(&self, column: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(column).copied())
    }

    /// average of a column over all the trials
    pub fn column_mean(&self, column: usize) -> Option<f64> {
        if column >= self.headers.len() || self.rows.is_empty() {
            return None;
        }
        let sum: f64 = self.column(column).sum();
        Some(sum / self.rows.len() as f64)
    }

    /// averages of every column over all the trials
    pub fn column_means(&self) -> Vec<f64> {
        (0..self.headers.len())
            .filter_map(|column| self.column_mean(column))
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;

        write!(f, "{:>10}", "")?;
        for header in &self.headers {
            write!(f, " {header:>14}")?;
        }
        writeln!(f)?;

        for (index, row) in self.rows.iter().enumerate() {
            write!(f, "{:>10}", self.row_label(index))?;
            for value in row {
                write!(f, " {value:>14.6}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers() {
        let table = Table::reliability(3);
        assert_eq!(table.title(), "Reliabilities");
        assert_eq!(table.headers(), ["1 TRUCK(s)", "2 TRUCK(s)", "3 TRUCK(s)"]);

        let table = Table::system_time(2);
        assert_eq!(table.title(), "System Times");
        assert_eq!(table.headers(), ["PACKET 1", "PACKET 2"]);
        assert_eq!(table.row_label(0), "TRIAL 1");
    }

    #[test]
    fn access() {
        let mut table = Table::reliability(2);
        table.push_row(vec![1.0, 2.0]);
        table.push_row(vec![3.0, 4.0]);

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.row(1), Some([3.0, 4.0].as_slice()));
        assert_eq!(table.get(0, 1), Some(2.0));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.column(1).collect::<Vec<_>>(), vec![2.0, 4.0]);
        assert_eq!(table.column_means(), vec![2.0, 3.0]);
        assert_eq!(table.column_mean(2), None);
    }

    #[test]
    fn empty_mean() {
        assert_eq!(Table::reliability(2).column_mean(0), None);
    }

    #[test]
    fn display() {
        let mut table = Table::new("T", vec!["A".to_owned()]);
        table.push_row(vec![0.5]);

        let printed = table.to_string();
        let lines = printed.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "T");
        assert!(lines[1].ends_with(" A"));
        assert!(lines[2].starts_with("   TRIAL 1"));
        assert!(lines[2].ends_with("0.500000"));
    }
}
