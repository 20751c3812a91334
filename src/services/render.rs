//! View renderer.
//!
//! Projects a page of records into display rows. Owns no table state.

use std::borrow::Borrow;

use crate::models::{DisplayRow, Record, StatusCategory, StatusRule};

/// Projects records into display rows using ordered status rules.
#[derive(Debug, Clone)]
pub struct Renderer {
    rules: Vec<StatusRule>,
}

impl Renderer {
    pub fn new(rules: Vec<StatusRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| StatusRule::new(&rule.contains, rule.category))
            .collect();
        Self { rules }
    }

    /// First rule (in declared order) whose pattern occurs in the status.
    pub fn classify(&self, status: &str) -> StatusCategory {
        let status = status.to_lowercase();
        self.rules
            .iter()
            .find(|rule| status.contains(&rule.contains))
            .map_or(StatusCategory::Unknown, |rule| rule.category)
    }

    pub fn render_row(&self, record: &Record) -> DisplayRow {
        DisplayRow {
            cells: record.values().to_vec(),
            status: self.classify(record.value(crate::models::Field::Status)),
        }
    }

    /// Render one page slice.
    pub fn render<R: Borrow<Record>>(&self, records: &[R]) -> Vec<DisplayRow> {
        records
            .iter()
            .map(|record| self.render_row(Borrow::<Record>::borrow(record)))
            .collect()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(crate::models::Config::default().status_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    #[test]
    fn test_gpo_status_matches_exact_value() {
        let renderer = Renderer::default();
        let long = renderer.classify("Despatched through GPO, Islamabad");
        let exact = renderer.classify("despatched through gpo");
        assert_eq!(long, exact);
        assert_eq!(long, StatusCategory::Dispatched);
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let renderer = Renderer::new(vec![
            StatusRule::new("returned", StatusCategory::Returned),
            StatusRule::new("despatched", StatusCategory::Dispatched),
        ]);
        assert_eq!(
            renderer.classify("Despatched, returned undelivered"),
            StatusCategory::Returned
        );
    }

    #[test]
    fn test_undelivered_is_not_delivered() {
        let renderer = Renderer::default();
        assert_eq!(renderer.classify("Undelivered"), StatusCategory::Returned);
        assert_eq!(renderer.classify("Delivered to payee"), StatusCategory::Delivered);
    }

    #[test]
    fn test_unmatched_status_is_unknown() {
        let renderer = Renderer::default();
        assert_eq!(renderer.classify("lost in transit?"), StatusCategory::Unknown);
        assert_eq!(renderer.classify(""), StatusCategory::Unknown);
    }

    #[test]
    fn test_rules_are_lowercased() {
        let renderer = Renderer::new(vec![StatusRule {
            contains: "ON HOLD".to_string(),
            category: StatusCategory::Pending,
        }]);
        assert_eq!(renderer.classify("on hold by bank"), StatusCategory::Pending);
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = Renderer::default();
        let records = vec![
            Record::new("Rent", 45000.0, "1001", "Office", "Ready for despatch"),
            Record::new("Fuel", 800.0, "1002", "Transport", "Pending approval"),
        ];

        let first = renderer.render(&records);
        let second = renderer.render(&records);
        assert_eq!(first, second);
        assert_eq!(first[0].cell(Field::Amount), "45,000");
        assert_eq!(first[0].status, StatusCategory::Ready);
        assert_eq!(first[1].status, StatusCategory::Pending);
    }
}
