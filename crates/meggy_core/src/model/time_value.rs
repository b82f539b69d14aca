use once_cell::sync::Lazy;
use std::fmt;
use time::PrimitiveDateTime;
use time::format_description::{self, OwnedFormatItem};
use time::macros::format_description;

/// Placeholder shown and stored when a task has no time at all.
pub const NOT_FOUND: &str = "N/A";

const RENDER_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const ENCODE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[day][month][year] [hour][minute]");

/// Day-month orderings come first; they are the local convention.
const DATE_ORDERS: [[DateField; 3]; 4] = [
    [DateField::Day, DateField::Month, DateField::Year],
    [DateField::Year, DateField::Day, DateField::Month],
    [DateField::Month, DateField::Day, DateField::Year],
    [DateField::Year, DateField::Month, DateField::Day],
];
const DATE_SEPARATORS: [Option<char>; 3] = [Some('/'), Some('-'), None];
const TIME_SEPARATORS: [&str; 2] = [":", ""];

#[derive(Clone, Copy)]
enum DateField {
    Day,
    Month,
    Year,
}

impl DateField {
    fn component(self, padded: bool) -> &'static str {
        match (self, padded) {
            (Self::Day, true) => "[day]",
            (Self::Day, false) => "[day padding:none]",
            (Self::Month, true) => "[month]",
            (Self::Month, false) => "[month padding:none]",
            (Self::Year, _) => "[year]",
        }
    }
}

struct Template {
    pattern: String,
    items: OwnedFormatItem,
}

static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(build_templates);

fn build_templates() -> Vec<Template> {
    let mut templates = Vec::with_capacity(
        DATE_ORDERS.len() * DATE_SEPARATORS.len() * TIME_SEPARATORS.len() * 2,
    );

    for order in DATE_ORDERS {
        for separator in DATE_SEPARATORS {
            let date_part = match separator {
                Some(sep) => order
                    .iter()
                    .map(|field| field.component(false))
                    .collect::<Vec<_>>()
                    .join(&sep.to_string()),
                None => order.iter().map(|field| field.component(true)).collect(),
            };
            for time_sep in TIME_SEPARATORS {
                let time_part = format!("[hour]{time_sep}[minute]");
                templates.push(Template::new(format!("{date_part} {time_part}")));
                templates.push(Template::new(format!("{time_part} {date_part}")));
            }
        }
    }

    templates
}

impl Template {
    fn new(pattern: String) -> Self {
        let items = format_description::parse_owned::<2>(&pattern)
            .expect("built-in date-time template must be a valid format description");
        Self { pattern, items }
    }

    fn parse(&self, raw: &str) -> Option<PrimitiveDateTime> {
        PrimitiveDateTime::parse(raw, &self.items).ok()
    }
}

// `[year]` takes an optional sign. A template has either no `-` or exactly
// two date separators, so any other count means a signed year.
fn unsigned(raw: &str) -> bool {
    !raw.contains('+') && matches!(raw.matches('-').count(), 0 | 2)
}

/// Number of date-time spellings the parser understands.
pub fn template_count() -> usize {
    TEMPLATES.len()
}

/// Format descriptions of every accepted spelling, in matching order.
pub fn template_patterns() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|template| template.pattern.as_str())
}

/// A date-time that is either understood, kept verbatim, or missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    Formatted(PrimitiveDateTime),
    Custom(String),
    Absent,
}

impl TimeValue {
    /// Interprets an already trimmed string. The first template that
    /// consumes the whole input wins; otherwise the input is kept as is.
    pub fn parse(raw: &str) -> Self {
        unsigned(raw)
            .then(|| TEMPLATES.iter().find_map(|template| template.parse(raw)))
            .flatten()
            .map(Self::Formatted)
            .unwrap_or_else(|| Self::Custom(raw.to_string()))
    }

    /// Trims before parsing; `None` means the task has no such time.
    pub fn of(raw: Option<&str>) -> Self {
        match raw {
            Some(value) => Self::parse(value.trim()),
            None => Self::Absent,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Self::Formatted(_))
    }

    /// Text written to the data file. Custom values are stored untouched.
    pub fn encode(&self) -> String {
        match self {
            Self::Formatted(datetime) => datetime
                .format(ENCODE_FORMAT)
                .unwrap_or_else(|_| datetime.to_string()),
            Self::Custom(raw) => raw.clone(),
            Self::Absent => NOT_FOUND.to_string(),
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formatted(datetime) => {
                let rendered = datetime.format(RENDER_FORMAT).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
            Self::Custom(raw) => write!(f, "[{raw}]"),
            Self::Absent => f.write_str(NOT_FOUND),
        }
    }
}
