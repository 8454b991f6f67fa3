//! Per-pet vaccination history rendered as a single-page PDF.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::domain::{PetName, VaccinationRecord};

/// Lines that fit on one A4 page below the title.
const PAGE_LINE_CAPACITY: usize = 42;

/// Errors raised while rendering the report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("report rendering failed: {message}")]
pub struct ReportError {
    message: String,
}

impl ReportError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One text line per ledger entry, truncated to the page capacity.
fn report_lines(records: &[VaccinationRecord]) -> Vec<String> {
    records
        .iter()
        .take(PAGE_LINE_CAPACITY)
        .map(|record| {
            format!(
                "{}: {} -> {}",
                record.vaccine(),
                record.given_date().format("%Y-%m-%d"),
                record.next_due().format("%Y-%m-%d"),
            )
        })
        .collect()
}

/// Render the vaccination history for `pet` as PDF bytes.
///
/// Single A4 page; entries beyond the page capacity are dropped rather
/// than flowed onto further pages.
pub fn render_health_report(
    pet: &PetName,
    records: &[VaccinationRecord],
) -> Result<Vec<u8>, ReportError> {
    let title = format!("Health Report: {pet}");
    let (doc, page, layer) = PdfDocument::new(&title, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ReportError::new(format!("font: {err}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ReportError::new(format!("font: {err}")))?;

    layer.use_text(&title, 14.0, Mm(20.0), Mm(280.0), &bold);

    let mut y = Mm(270.0);
    for line in report_lines(records) {
        layer.use_text(&line, 10.0, Mm(20.0), y, &font);
        y -= Mm(6.0);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|err| ReportError::new(format!("save: {err}")))?;
    buf.into_inner()
        .map_err(|err| ReportError::new(format!("buffer: {err}")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn record(id: i32, vaccine: &str) -> VaccinationRecord {
        VaccinationRecord::new(
            id,
            PetName::new("Rex").expect("valid pet name"),
            vaccine.to_owned(),
            NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
        )
    }

    #[rstest]
    fn lines_format_vaccine_and_dates() {
        let lines = report_lines(&[record(1, "Rabies")]);
        assert_eq!(lines, vec!["Rabies: 2024-01-01 -> 2025-01-01"]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(PAGE_LINE_CAPACITY, PAGE_LINE_CAPACITY)]
    #[case(PAGE_LINE_CAPACITY + 1, PAGE_LINE_CAPACITY)]
    #[case(PAGE_LINE_CAPACITY + 40, PAGE_LINE_CAPACITY)]
    fn history_is_truncated_to_one_page(#[case] entries: usize, #[case] expected: usize) {
        let records: Vec<VaccinationRecord> = (0..entries)
            .map(|n| record(i32::try_from(n).expect("small index"), "Rabies"))
            .collect();
        assert_eq!(report_lines(&records).len(), expected);
    }

    #[rstest]
    fn rendered_document_is_a_pdf() {
        let pet = PetName::new("Rex").expect("valid pet name");
        let bytes = render_health_report(&pet, &[record(1, "Rabies")]).expect("render succeeds");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[rstest]
    fn empty_history_still_renders_a_titled_page() {
        let pet = PetName::new("Ghost").expect("valid pet name");
        let bytes = render_health_report(&pet, &[]).expect("render succeeds");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
