// src/services/extractor.rs

//! Record extractor.
//!
//! Turns the merged register document into typed [`Record`]s. Extraction is
//! best-effort: missing or non-numeric values are replaced with defaults and
//! reported as warnings, never as errors.

use std::fmt;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Field, Record};
use crate::utils::markup::{count_tags, expand_self_closing, unwrap_cdata};
use crate::utils::{normalize_whitespace, parse_amount};

/// What went wrong with one field of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Required value absent
    Missing,
    /// Amount could not be parsed; holds the raw text
    NotNumeric(String),
}

/// A recovered extraction problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExtractionWarning {
    /// Zero-based position of the record in the document
    pub record: usize,
    pub field: Field,
    pub kind: WarningKind,
}

impl fmt::Display for FieldExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::Missing => {
                write!(f, "record {}: missing {}", self.record + 1, self.field)
            }
            WarningKind::NotNumeric(raw) => write!(
                f,
                "record {}: {} '{}' is not numeric, using 0",
                self.record + 1,
                self.field,
                raw
            ),
        }
    }
}

/// Records plus the warnings raised while extracting them.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub warnings: Vec<FieldExtractionWarning>,
}

/// Extracts records from a merged document using the fixed field schema.
pub struct RecordExtractor {
    record_tag: String,
    record_selector: Selector,
    field_selectors: Vec<(Field, Selector)>,
}

impl RecordExtractor {
    /// Create an extractor for records stored in `<record_tag>` elements.
    pub fn new(record_tag: &str) -> Result<Self> {
        let record_tag = record_tag.trim().to_lowercase();
        let record_selector = Self::parse_selector(&record_tag)?;
        let field_selectors = Field::ALL
            .into_iter()
            .map(|field| Ok((field, Self::parse_selector(&field.name().to_lowercase())?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            record_tag,
            record_selector,
            field_selectors,
        })
    }

    /// Extract every record from the merged document, in document order.
    pub fn extract(&self, document: &str) -> Result<Extraction> {
        let document = expand_self_closing(&unwrap_cdata(document));

        let (open, close) = count_tags(&document, &self.record_tag);
        if open != close {
            return Err(AppError::parse(format!(
                "unbalanced <{}> elements: {} opened, {} closed",
                self.record_tag, open, close
            )));
        }

        let html = Html::parse_document(&document);
        let mut extraction = Extraction::default();
        for (index, element) in html.select(&self.record_selector).enumerate() {
            let record = self.extract_record(index, element, &mut extraction.warnings);
            extraction.records.push(record);
        }

        for warning in &extraction.warnings {
            log::warn!("Field extraction: {}", warning);
        }
        log::debug!(
            "Extracted {} records ({} warnings)",
            extraction.records.len(),
            extraction.warnings.len()
        );

        Ok(extraction)
    }

    fn extract_record(
        &self,
        index: usize,
        element: ElementRef<'_>,
        warnings: &mut Vec<FieldExtractionWarning>,
    ) -> Record {
        let mut values: [Option<String>; 5] = Default::default();
        for (field, selector) in &self.field_selectors {
            values[field.index()] = element
                .select(selector)
                .next()
                .map(|el| normalize_whitespace(&el.text().collect::<String>()));
        }

        let mut take = |field: Field| -> String {
            match values[field.index()].take() {
                Some(value) if !value.is_empty() => value,
                _ => {
                    if field.spec().required {
                        warnings.push(FieldExtractionWarning {
                            record: index,
                            field,
                            kind: WarningKind::Missing,
                        });
                    }
                    String::new()
                }
            }
        };

        let narration = take(Field::Narration);
        let raw_amount = take(Field::Amount);
        let cheque_no = take(Field::ChequeNo);
        let category = take(Field::Category);
        let status = take(Field::Status);

        let amount = if raw_amount.is_empty() {
            0.0
        } else {
            parse_amount(&raw_amount).unwrap_or_else(|| {
                warnings.push(FieldExtractionWarning {
                    record: index,
                    field: Field::Amount,
                    kind: WarningKind::NotNumeric(raw_amount.clone()),
                });
                0.0
            })
        };

        Record::new(narration, amount, cheque_no, category, status)
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(records: &str) -> String {
        format!("<dataroot>{records}</dataroot>")
    }

    #[test]
    fn test_extract_full_record() {
        let extractor = RecordExtractor::new("record").unwrap();
        let doc = document(
            "<record>
                <Narration>  Electricity   bill </Narration>
                <Amount>12500</Amount>
                <ChequeNo>004512</ChequeNo>
                <Category>Utilities</Category>
                <Status>Despatched through GPO, Islamabad</Status>
            </record>",
        );

        let extraction = extractor.extract(&doc).unwrap();
        assert!(extraction.warnings.is_empty());
        assert_eq!(extraction.records.len(), 1);

        let record = &extraction.records[0];
        assert_eq!(record.value(Field::Narration), "Electricity bill");
        assert_eq!(record.value(Field::Amount), "12,500");
        assert_eq!(record.amount(), 12500.0);
        assert_eq!(record.value(Field::ChequeNo), "004512");
        assert_eq!(record.category_key(), "utilities");
    }

    #[test]
    fn test_missing_values_become_defaults() {
        let extractor = RecordExtractor::new("record").unwrap();
        let doc = document("<record><Narration>Rent</Narration><Status/></record>");

        let extraction = extractor.extract(&doc).unwrap();
        let record = &extraction.records[0];
        assert_eq!(record.value(Field::Amount), "0");
        assert_eq!(record.value(Field::Category), "");
        assert_eq!(record.value(Field::Status), "");

        let missing: Vec<Field> = extraction.warnings.iter().map(|w| w.field).collect();
        assert_eq!(missing, vec![Field::Amount, Field::ChequeNo]);
    }

    #[test]
    fn test_non_numeric_amount_is_zero() {
        let extractor = RecordExtractor::new("record").unwrap();
        let doc = document(
            "<record><Narration>x</Narration><Amount>N/A</Amount><ChequeNo>1</ChequeNo></record>",
        );

        let extraction = extractor.extract(&doc).unwrap();
        assert_eq!(extraction.records[0].value(Field::Amount), "0");
        assert_eq!(
            extraction.warnings,
            vec![FieldExtractionWarning {
                record: 0,
                field: Field::Amount,
                kind: WarningKind::NotNumeric("N/A".to_string()),
            }]
        );
    }

    #[test]
    fn test_grouped_amount_in_source() {
        let extractor = RecordExtractor::new("record").unwrap();
        let doc = document("<record><Amount>2,500.50</Amount></record>");
        let extraction = extractor.extract(&doc).unwrap();
        assert_eq!(extraction.records[0].amount(), 2500.5);
        assert_eq!(extraction.records[0].value(Field::Amount), "2,500.5");
    }

    #[test]
    fn test_records_keep_document_order() {
        let extractor = RecordExtractor::new("Record").unwrap();
        let doc = document(
            "<Record><Narration>first</Narration></Record>\
             <Record><Narration>second</Narration></Record>",
        );
        let extraction = extractor.extract(&doc).unwrap();
        let names: Vec<&str> = extraction
            .records
            .iter()
            .map(|r| r.value(Field::Narration))
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_cdata_narration_is_kept() {
        let extractor = RecordExtractor::new("record").unwrap();
        let doc = document(
            "<record><Narration><![CDATA[Rent & rates]]></Narration>\
             <Amount>10</Amount><ChequeNo>1</ChequeNo></record>",
        );

        let extraction = extractor.extract(&doc).unwrap();
        assert!(extraction.warnings.is_empty());
        assert_eq!(
            extraction.records[0].value(Field::Narration),
            "Rent & rates"
        );
    }

    #[test]
    fn test_cdata_with_record_markup_does_not_unbalance() {
        let extractor = RecordExtractor::new("record").unwrap();
        let doc = document(
            "<record><Narration><![CDATA[see <record> note]]></Narration>\
             <Amount>1</Amount><ChequeNo>2</ChequeNo></record>",
        );

        let extraction = extractor.extract(&doc).unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(
            extraction.records[0].value(Field::Narration),
            "see <record> note"
        );
    }

    #[test]
    fn test_unbalanced_document_is_parse_error() {
        let extractor = RecordExtractor::new("record").unwrap();
        let doc = document("<record><Narration>x</Narration>");
        assert!(matches!(extractor.extract(&doc), Err(AppError::Parse(_))));
    }

    #[test]
    fn test_invalid_record_tag_is_selector_error() {
        assert!(matches!(
            RecordExtractor::new("[[bad"),
            Err(AppError::Selector { .. })
        ));
    }
}
