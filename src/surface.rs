// src/surface.rs

//! Display surfaces.
//!
//! A surface receives a [`TableView`] after every state change and decides
//! how to draw it. It also declares which page elements it provides so that
//! setup can fail early when a required one is missing.

use std::io::Write;

use crate::error::{AppError, Result};
use crate::models::{Field, FieldKind, NavKind, SortDirection, TableView};

/// Page elements a surface can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceElement {
    Table,
    PageInfo,
    Pagination,
    ResultSummary,
    ErrorBanner,
    SearchInput,
    CategoryFilter,
    StatusFilter,
    PageSizeSelect,
}

/// Elements without which the table cannot be set up.
pub const REQUIRED_ELEMENTS: [SurfaceElement; 5] = [
    SurfaceElement::Table,
    SurfaceElement::PageInfo,
    SurfaceElement::Pagination,
    SurfaceElement::ResultSummary,
    SurfaceElement::ErrorBanner,
];

/// Something that can draw the table.
pub trait DisplaySurface {
    /// Elements this surface provides.
    fn elements(&self) -> Vec<SurfaceElement>;

    /// Draw the current view.
    fn show(&mut self, view: &TableView) -> Result<()>;
}

/// Fail with an initialization error if a required element is missing.
pub fn check_surface(surface: &dyn DisplaySurface) -> Result<()> {
    let provided = surface.elements();
    let missing: Vec<String> = REQUIRED_ELEMENTS
        .iter()
        .filter(|element| !provided.contains(*element))
        .map(|element| format!("{element:?}"))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::initialization(format!(
            "display surface is missing: {}",
            missing.join(", ")
        )))
    }
}

/// Plain-text rendition of the table for terminals.
pub struct TextSurface<W: Write> {
    out: W,
    max_cell_width: usize,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            max_cell_width: 40,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print an error banner line.
    pub fn show_error(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "!! {message}")?;
        self.out.flush()?;
        Ok(())
    }

    fn header_label(field: Field, view: &TableView) -> String {
        let title = field.spec().display_title;
        match (view.sort.column, view.sort.direction) {
            (Some(column), SortDirection::Asc) if column == field => format!("{title} ▲"),
            (Some(column), SortDirection::Desc) if column == field => format!("{title} ▼"),
            _ => title.to_string(),
        }
    }

    fn clip(&self, text: &str) -> String {
        if text.chars().count() <= self.max_cell_width {
            text.to_string()
        } else {
            let kept: String = text.chars().take(self.max_cell_width - 1).collect();
            format!("{kept}…")
        }
    }
}

impl<W: Write> DisplaySurface for TextSurface<W> {
    fn elements(&self) -> Vec<SurfaceElement> {
        vec![
            SurfaceElement::Table,
            SurfaceElement::PageInfo,
            SurfaceElement::Pagination,
            SurfaceElement::ResultSummary,
            SurfaceElement::ErrorBanner,
        ]
    }

    fn show(&mut self, view: &TableView) -> Result<()> {
        if let Some(error) = &view.error {
            self.show_error(error)?;
        }
        writeln!(self.out, "{}", view.summary)?;

        let headers: Vec<String> = Field::ALL
            .iter()
            .map(|field| Self::header_label(*field, view))
            .collect();
        let rows: Vec<Vec<String>> = view
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> = row.cells.iter().map(|c| self.clip(c)).collect();
                cells.push(format!("[{}]", row.status.class_name()));
                cells
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => {
                        let pad = width.saturating_sub(cell.chars().count());
                        let numeric = Field::ALL
                            .get(i)
                            .is_some_and(|field| field.spec().kind == FieldKind::Number);
                        if numeric {
                            format!("{}{}", " ".repeat(pad), cell)
                        } else {
                            format!("{}{}", cell, " ".repeat(pad))
                        }
                    }
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        writeln!(self.out, "{}", line(&headers))?;
        let rule_width = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        writeln!(self.out, "{}", "-".repeat(rule_width))?;
        if rows.is_empty() {
            writeln!(self.out, "(no records)")?;
        }
        for row in &rows {
            writeln!(self.out, "{}", line(row))?;
        }

        if view.pagination_visible {
            let controls: Vec<String> = view
                .buttons
                .iter()
                .map(|button| match (button.kind, button.active, button.disabled) {
                    (NavKind::Page, true, _) => format!("[{button}]"),
                    (_, _, true) => format!("({button})"),
                    _ => button.to_string(),
                })
                .collect();
            writeln!(self.out, "{}    {}", view.page_info, controls.join(" "))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplayRow, NavButton, SortState, StatusCategory};

    struct Headless;

    impl DisplaySurface for Headless {
        fn elements(&self) -> Vec<SurfaceElement> {
            vec![SurfaceElement::Table, SurfaceElement::ResultSummary]
        }

        fn show(&mut self, _view: &TableView) -> Result<()> {
            Ok(())
        }
    }

    fn view() -> TableView {
        TableView {
            rows: vec![DisplayRow {
                cells: vec![
                    "Rent".into(),
                    "45,000".into(),
                    "1001".into(),
                    "Office".into(),
                    "Despatched through GPO".into(),
                ],
                status: StatusCategory::Dispatched,
            }],
            page_info: "1-1 of 1".into(),
            buttons: vec![NavButton {
                kind: NavKind::Page,
                target: 1,
                disabled: false,
                active: true,
            }],
            summary: "Showing all 1 record".into(),
            pagination_visible: true,
            sort: SortState {
                column: Some(Field::Amount),
                direction: SortDirection::Desc,
            },
            error: None,
        }
    }

    #[test]
    fn test_missing_elements_fail_initialization() {
        let err = check_surface(&Headless).unwrap_err();
        assert!(matches!(err, AppError::Initialization(_)));
        assert!(err.to_string().contains("PageInfo"));
    }

    #[test]
    fn test_text_surface_is_complete() {
        assert!(check_surface(&TextSurface::new(Vec::new())).is_ok());
    }

    #[test]
    fn test_text_surface_output() {
        let mut surface = TextSurface::new(Vec::new());
        surface.show(&view()).unwrap();
        let text = String::from_utf8(surface.into_inner()).unwrap();

        assert!(text.starts_with("Showing all 1 record\n"));
        assert!(text.contains("Amount ▼"));
        assert!(text.contains("45,000"));
        assert!(text.contains("[status-dispatched]"));
        assert!(text.contains("1-1 of 1    [1]"));
        // numeric columns are right-aligned
        assert!(text.contains("       1001 | Office"));
    }

    #[test]
    fn test_show_error_writes_banner() {
        let mut surface = TextSurface::new(Vec::new());
        let err = check_surface(&Headless).unwrap_err();
        surface.show_error(&err.to_string()).unwrap();
        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert!(text.starts_with("!! Initialization error: display surface is missing"));
    }

    #[test]
    fn test_error_banner_and_hidden_pagination() {
        let mut empty = view();
        empty.rows.clear();
        empty.pagination_visible = false;
        empty.error = Some("Unable to load records".into());

        let mut surface = TextSurface::new(Vec::new());
        surface.show(&empty).unwrap();
        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert!(text.starts_with("!! Unable to load records\n"));
        assert!(text.contains("(no records)"));
        assert!(!text.contains("1-1 of 1"));
    }
}
