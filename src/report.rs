//! The measurement report: a banner with logos, the data source, three
//! measured values, a plot with its caption and free-form notes.

use crate::block::{ContentBlock, TableRowSpec};
use crate::composer::Composer;
use crate::style::{HorizontalAlign, Style, StyleTrait, VerticalAlign};
use crate::units::Px;
use crate::ComposeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Non-breaking spaces in front of the notes, leaving room for the label
/// that shares their first line
const NOTES_INDENT: usize = 39;

/// One measured value
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurement {
    pub label: String,
    pub value: String,
    pub unit: String,
}

impl Measurement {
    fn display(&self) -> String {
        match (self.value.is_empty(), self.unit.is_empty()) {
            (false, false) => format!("{} {}", self.value, self.unit),
            (false, true) => self.value.clone(),
            _ => self.unit.clone(),
        }
    }
}

/// The fixed captions of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    pub data_source: String,
    pub printed_at: String,
    pub measurements: String,
    pub algorithms: String,
    pub notes: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        ReportLabels {
            data_source: "Data source:".to_string(),
            printed_at: "Printed:".to_string(),
            measurements: "Calculated values:".to_string(),
            algorithms: "Processing algorithms:".to_string(),
            notes: "Notes:".to_string(),
        }
    }
}

/// Content of one report. Every field is optional in JSON.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub left_logo: Option<PathBuf>,
    pub right_logo: Option<PathBuf>,
    /// Banner text next to the left logo
    pub customer: String,
    /// Banner text next to the right logo
    pub vendor: String,
    pub data_source: String,
    pub printed_at: String,
    pub measurements: [Measurement; 3],
    pub plot: Option<PathBuf>,
    pub caption: String,
    pub algorithms: String,
    pub notes: String,
    pub labels: ReportLabels,
}

fn style(vertical: VerticalAlign, horizontal: HorizontalAlign, traits: &[StyleTrait]) -> Style {
    traits
        .iter()
        .fold(Style::new(vertical, horizontal), |s, t| s.with(*t))
}

/// An image cell; files that can't be read become empty cells
fn picture(path: &Option<PathBuf>) -> ContentBlock {
    let Some(path) = path else {
        return ContentBlock::empty();
    };
    ContentBlock::image_from_disk(path).unwrap_or_else(|e| {
        log::warn!("can't read image {}: {e}", path.display());
        ContentBlock::empty()
    })
}

impl Report {
    pub fn from_json(json: &str) -> Result<Report, ComposeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lay the report out, in order, at the composer's current position
    pub fn compose(&self, composer: &mut Composer) {
        use HorizontalAlign as H;
        use StyleTrait::{FastDraw, Italic, Small};
        use VerticalAlign as V;

        let w = composer.width();
        let label = style(V::Bottom, H::Justify, &[FastDraw]);
        let value = style(V::Bottom, H::Justify, &[Italic, Small, FastDraw]);

        composer.add_table_row(
            &TableRowSpec::new(
                [
                    Px(0.0),
                    Px(230.0),
                    Px(300.0),
                    w / 2.0 - Px(50.0),
                    w / 2.0 + Px(50.0),
                    w - Px(300.0),
                    w - Px(230.0),
                    w,
                ],
                [
                    picture(&self.left_logo),
                    ContentBlock::empty(),
                    ContentBlock::text(&self.customer),
                    ContentBlock::empty(),
                    ContentBlock::text(&self.vendor),
                    ContentBlock::empty(),
                    picture(&self.right_logo),
                ],
                vec![
                    Style::default(),
                    Style::default(),
                    style(V::Center, H::Left, &[Italic, FastDraw]),
                    Style::default(),
                    style(V::Center, H::Right, &[Italic, FastDraw]),
                    Style::default(),
                    Style::default(),
                ],
            )
            .with_max_height(Px(230.0)),
        );
        composer.skip(Px(40.0));

        composer.add_table_row(&TableRowSpec::new(
            [Px(150.0), Px(650.0), w],
            [self.labels.data_source.as_str(), self.data_source.as_str()],
            vec![label, value],
        ));
        composer.add_table_row(&TableRowSpec::new(
            [Px(150.0), Px(700.0), w],
            [self.labels.printed_at.as_str(), self.printed_at.as_str()],
            vec![label, value],
        ));
        composer.add_table_row(&TableRowSpec::new(
            [Px(150.0), w],
            [self.labels.measurements.as_str()],
            vec![label],
        ));
        composer.skip(Px(20.0));

        let ninth = w / 9.0;
        let unit = style(V::Bottom, H::Justify, &[Small, FastDraw]);
        let mut cells = Vec::with_capacity(6);
        for m in &self.measurements {
            cells.push(format!(" {}", m.label));
            cells.push(m.display());
        }
        composer.add_table_row(
            &TableRowSpec::new(
                [
                    Px(0.0),
                    ninth,
                    ninth * 3.0,
                    ninth * 4.0,
                    ninth * 6.0,
                    ninth * 7.0 + Px(100.0),
                    w,
                ],
                cells,
                vec![label, unit, label, unit, label, unit],
            )
            .with_max_height(Px(65.0))
            .with_grid(true),
        );
        composer.skip(Px(100.0));

        composer.add_table_row(
            &TableRowSpec::new([Px(0.0), w], [picture(&self.plot)], vec![Style::default()])
                .with_max_height(w),
        );
        composer.add_table_row(&TableRowSpec::new(
            [Px(0.0), w],
            [self.caption.as_str()],
            vec![style(V::Bottom, H::Center, &[Small, Italic])],
        ));
        composer.add_table_row(&TableRowSpec::new(
            [Px(150.0), Px(750.0), w],
            [self.labels.algorithms.as_str(), self.algorithms.as_str()],
            vec![label, value],
        ));
        composer.skip(Px(150.0));

        composer.add_table_row(&TableRowSpec::new(
            [Px(150.0), w],
            [self.labels.notes.as_str()],
            vec![style(V::Bottom, H::Justify, &[Italic, FastDraw])],
        ));
        composer.skip(Px(-70.0));
        let notes = format!("{}{}", "\u{a0}".repeat(NOTES_INDENT), self.notes);
        composer.add_text(&notes, style(V::Baseline, H::Justify, &[Italic, Small]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let report = Report::from_json(r#"{ "notes": "hello", "labels": { "notes": "Примечание:" } }"#)
            .expect("valid report");
        assert_eq!(report.notes, "hello");
        assert_eq!(report.labels.notes, "Примечание:");
        assert_eq!(report.labels.data_source, "Data source:");
        assert!(report.plot.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Report::from_json("{ \"notes\": 3 }"),
            Err(ComposeError::Json(_))
        ));
    }

    #[test]
    fn measurement_shows_value_and_unit() {
        let m = Measurement {
            label: "RMS:".into(),
            value: "1.25".into(),
            unit: "mm/s".into(),
        };
        assert_eq!(m.display(), "1.25 mm/s");
        assert_eq!(
            Measurement {
                unit: "______ units".into(),
                ..Default::default()
            }
            .display(),
            "______ units"
        );
    }
}
