//! Standalone HTML report: per-category differences as a table plus the
//! inline bar chart rendered from the same numbers.

use crate::chart::format::format_signed;
use crate::chart::{ChartOptions, render_chart};
use crate::error::{ChartError, DataError};
use crate::models::{CostItem, Dataset};
use crate::stats::summarize;
use crate::svg::{SvgDocument, escape_xml};
use log::debug;
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Page title and chart settings for a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub title: String,
    pub chart: ChartOptions,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Expense comparison".into(),
            chart: ChartOptions::default(),
        }
    }
}

/// Render the report page for `items` (one row per category).
///
/// An empty comparison or one without any difference gets the table and a
/// note instead of a chart; every other chart failure is returned.
pub fn render_report(items: &[CostItem], options: &ReportOptions) -> Result<String, ReportError> {
    let dataset = Dataset::try_from(items)?;
    let locale = options.chart.locale.as_str();
    let summary = summarize(&dataset);

    let chart_html = match render_svg(&dataset, &options.chart) {
        Ok(svg) => svg,
        Err(ChartError::EmptyDataset) => note("No expenses to compare."),
        Err(ChartError::DegenerateRange) => note("No differences between the periods."),
        Err(e) => return Err(e.into()),
    };

    let title = escape_xml(&options.title);
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html>");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "  <meta charset=\"utf-8\">");
    let _ = writeln!(html, "  <title>{title}</title>");
    let _ = writeln!(
        html,
        "  <style>svg {{ width: 100%; height: 300px; }} td.amount {{ text-align: right; }}</style>"
    );
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(html, "  <h1>{title}</h1>");
    let _ = writeln!(
        html,
        "  <p>Total difference: <strong>{}</strong></p>",
        format_signed(summary.total, locale)
    );
    let _ = writeln!(html, "  <table id=\"report\">");
    let _ = writeln!(html, "    <thead><tr><th>Tag</th><th>Amount</th></tr></thead>");
    let _ = writeln!(html, "    <tbody>");
    if dataset.is_empty() {
        let _ = writeln!(html, "      <tr><td colspan=\"2\">No expenses found.</td></tr>");
    }
    for (tag, amount) in dataset.iter() {
        let _ = writeln!(
            html,
            "      <tr><td>{}</td><td class=\"amount\">{}</td></tr>",
            escape_xml(tag),
            format_signed(amount, locale)
        );
    }
    let _ = writeln!(html, "    </tbody>");
    let _ = writeln!(html, "  </table>");
    html.push_str(&chart_html);
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");

    debug!("report: {} rows, {} bytes", dataset.len(), html.len());
    Ok(html)
}

fn render_svg(dataset: &Dataset, options: &ChartOptions) -> Result<String, ChartError> {
    let mut doc = SvgDocument::new(options.width, options.height).with_id("graph");
    render_chart(&mut doc, dataset, options)?;
    Ok(doc.to_svg_string())
}

fn note(text: &str) -> String {
    format!("  <p class=\"note\">{}</p>\n", escape_xml(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn report_has_rows_total_and_chart() {
        let items = vec![
            CostItem::new("Food", dec!(60)),
            CostItem::new("Travel <abroad>", dec!(40)),
            CostItem::new("Rent", dec!(-800)),
        ];
        let html = render_report(&items, &ReportOptions::default()).unwrap();
        assert!(html.contains("<td>Food</td><td class=\"amount\">+60</td>"));
        assert!(html.contains("Travel &lt;abroad&gt;"));
        assert!(html.contains("Total difference: <strong>-700</strong>"));
        assert!(html.contains("<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"graph\""));
        assert_eq!(html.matches("<rect ").count(), 3);
    }

    #[test]
    fn all_zero_differences_render_a_note() {
        let items = vec![
            CostItem::new("Food", Decimal::ZERO),
            CostItem::new("Rent", Decimal::ZERO),
        ];
        let html = render_report(&items, &ReportOptions::default()).unwrap();
        assert!(html.contains("No differences between the periods."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn empty_input_renders_placeholder_row() {
        let html = render_report(&[], &ReportOptions::default()).unwrap();
        assert!(html.contains("No expenses found."));
        assert!(html.contains("No expenses to compare."));
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let items = vec![
            CostItem::new("Food", dec!(1)),
            CostItem::new("Food", dec!(2)),
        ];
        assert!(matches!(
            render_report(&items, &ReportOptions::default()),
            Err(ReportError::Data(DataError::DuplicateLabel(_)))
        ));
    }
}
