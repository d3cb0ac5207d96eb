use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// Document metadata written to the PDF info dictionary
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Free-form; a comma separated list is conventional
    pub keywords: Option<String>,
    /// When the report was produced. Defaults to the time of writing.
    pub created: Option<DateTime<FixedOffset>>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn created(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        let created: DateTime<FixedOffset> =
            self.created.unwrap_or_else(|| Local::now().into());
        info.creation_date(pdf_date(&created));
    }
}

fn pdf_date(at: &DateTime<FixedOffset>) -> Date {
    let offset = at.offset().local_minus_utc();
    let hours = offset / 3600;
    let minutes = (offset % 3600 / 60).abs();
    Date::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(hours as i8)
        .utc_offset_minute(minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_metadata_and_creation_date() {
        let mut info = Info::new();
        info.title("Vibration report").author("Test bench").created(
            DateTime::parse_from_rfc3339("2024-03-05T10:20:30+03:00").expect("valid date"),
        );

        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        info.write(&mut refs, &mut pdf);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Vibration report)"));
        assert!(text.contains("(D:20240305102030+03'00"));
        assert!(refs.get(RefType::Info).is_some());
    }
}
