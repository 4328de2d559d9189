use nom::{
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, preceded, tuple},
    IResult,
};
use std::fmt;
use std::ops::RangeInclusive;

use super::HolidayRecord;

pub const MAX_NAME_BYTES: usize = 99;
pub const MAX_DATE_BYTES: usize = 49;

pub const YEAR_RANGE: RangeInclusive<i64> = 1900..=2100;
pub const MONTH_RANGE: RangeInclusive<i64> = 1..=12;
pub const DAY_RANGE: RangeInclusive<i64> = 1..=31;

/// Why a line of a holiday file did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Empty,
    MissingComma,
    BadDateLength,
    EmptyField,
    UnparsableDate,
    OutOfRange,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Empty => "empty line",
            SkipReason::MissingComma => "no comma separating date and name",
            SkipReason::BadDateLength => "date field empty or too long",
            SkipReason::EmptyField => "date or name is blank",
            SkipReason::UnparsableDate => "date is neither YYYY/MM/DD nor YYYY-MM-DD",
            SkipReason::OutOfRange => "date out of range",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepted spellings of the date column, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Slash,
    Dash,
}

pub const DATE_FORMATS: [DateFormat; 2] = [DateFormat::Slash, DateFormat::Dash];

impl DateFormat {
    pub fn separator(&self) -> char {
        match self {
            DateFormat::Slash => '/',
            DateFormat::Dash => '-',
        }
    }

    /// Parses the whole of `input` as `year SEP month SEP day`.
    pub fn parse(&self, input: &str) -> Option<(i64, i64, i64)> {
        let sep = self.separator();
        let (_, (year, _, month, _, day)) =
            all_consuming(tuple((integer, char(sep), integer, char(sep), integer)))(input)
                .ok()?;

        Some((year, month, day))
    }
}

/// Optionally signed decimal, leading whitespace allowed.
fn integer(input: &str) -> IResult<&str, i64> {
    preceded(
        multispace0,
        map_res(recognize(pair(opt(one_of("+-")), digit1)), |s: &str| {
            s.parse::<i64>()
        }),
    )(input)
}

pub fn parse_date(input: &str) -> Option<(i64, i64, i64)> {
    DATE_FORMATS.iter().find_map(|format| format.parse(input))
}

/// Drops line terminators and surrounding whitespace.
pub fn trim_line(line: &str) -> &str {
    line.trim_end_matches(|c: char| c == '\n' || c == '\r').trim()
}

/// Splits on the first comma, so commas inside the name survive.
pub fn split_line(line: &str) -> Result<(&str, &str), SkipReason> {
    let (date, name) = line.split_once(',').ok_or(SkipReason::MissingComma)?;

    if date.is_empty() || date.len() > MAX_DATE_BYTES {
        return Err(SkipReason::BadDateLength);
    }

    let (date, name) = (date.trim(), name.trim());
    if date.is_empty() || name.is_empty() {
        return Err(SkipReason::EmptyField);
    }

    Ok((date, name))
}

/// Cuts `name` down to at most `max_bytes`, backing off to a char boundary.
pub fn truncate_name(name: &str, max_bytes: usize) -> &str {
    if name.len() <= max_bytes {
        return name;
    }

    let mut end = max_bytes;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Turns one data line of a holiday file into a record.
pub fn parse_line(line: &str) -> Result<HolidayRecord, SkipReason> {
    let line = trim_line(line);
    if line.is_empty() {
        return Err(SkipReason::Empty);
    }

    let (date, name) = split_line(line)?;
    let (year, month, day) = parse_date(date).ok_or(SkipReason::UnparsableDate)?;

    if !YEAR_RANGE.contains(&year) || !MONTH_RANGE.contains(&month) || !DAY_RANGE.contains(&day)
    {
        return Err(SkipReason::OutOfRange);
    }

    Ok(HolidayRecord {
        year: year as i32,
        month: month as u32,
        day: day as u32,
        name: truncate_name(name, MAX_NAME_BYTES).to_owned(),
    })
}
