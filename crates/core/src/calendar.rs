//! Gregorian to Hijri conversion
//!
//! The request handler only depends on the [`CalendarConverter`] trait. The
//! production implementation, [`UmmAlQuraConverter`], parses the Gregorian
//! string with `chrono` and delegates the calendar arithmetic to
//! `icu_calendar`'s Umm al-Qura calendar. Arabic names are rendered from the
//! fixed tables below.

use chrono::{Datelike, NaiveDate};
use icu_calendar::islamic::IslamicUmmAlQura;
use icu_calendar::types::IsoWeekday;
use icu_calendar::Date;
use std::fmt;
use std::str::FromStr;

/// `strftime` layout of the accepted Gregorian input (`27/07/2025`)
pub const GREGORIAN_FORMAT: &str = "%d/%m/%Y";

/// Hijri month names (index 0 = Muharram = month 1)
const ARABIC_MONTHS: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

/// Era marker for "after Hijra"
const ARABIC_ERA: &str = "هـ";

/// Arabic comma used between fields of the long formats
const ARABIC_COMMA: char = '،';

/// Output shapes produced for every successful conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HijriFormat {
    /// `1447-02-01`
    Numeric,
    /// `1 صفر، 1447`
    LongArabic,
    /// `الأحد، 1 صفر، 1447 هـ`
    FullArabic,
}

impl HijriFormat {
    pub const ALL: [HijriFormat; 3] = [
        HijriFormat::Numeric,
        HijriFormat::LongArabic,
        HijriFormat::FullArabic,
    ];

    /// The ICU-style pattern each format corresponds to
    pub fn pattern(&self) -> &'static str {
        match self {
            HijriFormat::Numeric => "yyyy-MM-dd",
            HijriFormat::LongArabic => "d MMMM, yyyy",
            HijriFormat::FullArabic => "eeee, d MMMM, yyyy G",
        }
    }
}

/// Error type for calendar conversions
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid Gregorian date '{input}': {reason}")]
    InvalidGregorian { input: String, reason: String },

    #[error("Date '{0}' is outside the supported calendar range")]
    OutOfRange(String),
}

/// Capability that renders a Gregorian date string as a Hijri date
pub trait CalendarConverter: Send + Sync {
    fn convert(&self, gregorian: &str, format: HijriFormat) -> Result<String, ConversionError>;
}

/// Digit set used when rendering numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Numerals {
    /// `0123456789`
    #[default]
    Latin,
    /// `٠١٢٣٤٥٦٧٨٩`
    ArabicIndic,
}

impl Numerals {
    /// Re-render every ASCII digit in `text` with this digit set
    pub fn apply(&self, text: &str) -> String {
        match self {
            Numerals::Latin => text.to_string(),
            Numerals::ArabicIndic => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) if c.is_ascii_digit() => char::from_u32(0x0660 + d).unwrap_or(c),
                    _ => c,
                })
                .collect(),
        }
    }
}

impl FromStr for Numerals {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin" => Ok(Numerals::Latin),
            "arabic-indic" | "arabic" | "arab" => Ok(Numerals::ArabicIndic),
            other => Err(format!(
                "Unknown numerals '{other}'. Expected 'latin' or 'arabic-indic'"
            )),
        }
    }
}

impl fmt::Display for Numerals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numerals::Latin => write!(f, "latin"),
            Numerals::ArabicIndic => write!(f, "arabic-indic"),
        }
    }
}

/// A date in the Umm al-Qura calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HijriDate {
    pub year: i32,
    /// 1-based, 1 = Muharram
    pub month: u32,
    pub day: u32,
    pub weekday: IsoWeekday,
}

impl HijriDate {
    pub fn month_name(&self) -> &'static str {
        ARABIC_MONTHS[(self.month as usize).clamp(1, 12) - 1]
    }

    pub fn weekday_name(&self) -> &'static str {
        arabic_weekday(self.weekday)
    }

    /// Render the date in one of the supported shapes, always with Latin digits
    pub fn format(&self, format: HijriFormat) -> String {
        match format {
            HijriFormat::Numeric => {
                format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
            }
            HijriFormat::LongArabic => format!(
                "{} {}{ARABIC_COMMA} {:04}",
                self.day,
                self.month_name(),
                self.year
            ),
            HijriFormat::FullArabic => format!(
                "{}{ARABIC_COMMA} {} {}{ARABIC_COMMA} {:04} {ARABIC_ERA}",
                self.weekday_name(),
                self.day,
                self.month_name(),
                self.year
            ),
        }
    }
}

fn arabic_weekday(weekday: IsoWeekday) -> &'static str {
    match weekday {
        IsoWeekday::Monday => "الاثنين",
        IsoWeekday::Tuesday => "الثلاثاء",
        IsoWeekday::Wednesday => "الأربعاء",
        IsoWeekday::Thursday => "الخميس",
        IsoWeekday::Friday => "الجمعة",
        IsoWeekday::Saturday => "السبت",
        IsoWeekday::Sunday => "الأحد",
    }
}

/// Strictly parse a `dd/mm/yyyy` Gregorian date
///
/// Fails for days that do not exist in the given month (`31/02/2025`).
pub fn parse_gregorian(input: &str) -> Result<NaiveDate, ConversionError> {
    NaiveDate::parse_from_str(input, GREGORIAN_FORMAT).map_err(|e| {
        ConversionError::InvalidGregorian {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Umm al-Qura converter backed by `icu_calendar`
#[derive(Debug, Clone, Copy, Default)]
pub struct UmmAlQuraConverter {
    numerals: Numerals,
}

impl UmmAlQuraConverter {
    pub fn new(numerals: Numerals) -> Self {
        Self { numerals }
    }

    pub fn numerals(&self) -> Numerals {
        self.numerals
    }

    /// Convert a Gregorian date to its Umm al-Qura counterpart
    pub fn to_hijri(&self, gregorian: NaiveDate) -> Result<HijriDate, ConversionError> {
        let iso = Date::try_new_iso_date(
            gregorian.year(),
            gregorian.month() as u8,
            gregorian.day() as u8,
        )
        .map_err(|_| ConversionError::OutOfRange(gregorian.to_string()))?;

        let hijri = iso.to_calendar(IslamicUmmAlQura::new());

        Ok(HijriDate {
            year: hijri.year().number,
            month: hijri.month().ordinal,
            day: hijri.day_of_month().0,
            weekday: hijri.day_of_week(),
        })
    }
}

impl CalendarConverter for UmmAlQuraConverter {
    fn convert(&self, gregorian: &str, format: HijriFormat) -> Result<String, ConversionError> {
        let date = parse_gregorian(gregorian)?;
        let hijri = self.to_hijri(date)?;

        Ok(self.numerals.apply(&hijri.format(format)))
    }
}
