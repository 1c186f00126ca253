use crate::models::RouteResult;

/// Append-only record of completed runs, independent of the map layers.
/// Rows are never edited in place, only appended or bulk-cleared.
#[derive(Debug, Default)]
pub struct Ledger {
    rows: Vec<RouteResult>,
}

impl Ledger {
    pub fn record(&mut self, result: RouteResult) {
        self.rows.push(result);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[RouteResult] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;
    use geo_types::LineString;

    fn row(variant: Variant, distance: f64) -> RouteResult {
        RouteResult {
            variant,
            path: LineString::new(Vec::new()),
            distance,
            elapsed_ms: 10,
        }
    }

    #[test]
    fn rows_keep_insertion_order() {
        let mut ledger = Ledger::default();
        ledger.record(row(Variant::Greedy, 1.0));
        ledger.record(row(Variant::Brute, 2.0));
        ledger.record(row(Variant::Greedy, 3.0));

        let distances: Vec<f64> = ledger.rows().iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn clear_empties_the_ledger() {
        let mut ledger = Ledger::default();
        ledger.record(row(Variant::Dynamic, 1.0));
        ledger.clear();
        assert!(ledger.rows().is_empty());
    }
}
