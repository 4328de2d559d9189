pub mod parse;

pub use parse::SkipReason;

pub const DEFAULT_CAPACITY: usize = 1100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub name: String,
}

impl HolidayRecord {
    pub fn is_on(&self, year: i32, month: u32, day: u32) -> bool {
        self.year == year && self.month == month && self.day == day
    }

    pub fn is_in(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}

/// Holiday records in file order.
///
/// The store is filled once and only read afterwards. Duplicate dates are kept;
/// lookups answer with the earliest one.
#[derive(Debug, Clone)]
pub struct HolidayStore {
    records: Vec<HolidayRecord>,
    capacity_limit: Option<usize>,
}

impl Default for HolidayStore {
    fn default() -> Self {
        HolidayStore::new()
    }
}

impl HolidayStore {
    pub fn new() -> Self {
        HolidayStore::with_capacity_limit(Some(DEFAULT_CAPACITY))
    }

    /// `None` lifts the bound on the number of records.
    pub fn with_capacity_limit(capacity_limit: Option<usize>) -> Self {
        HolidayStore {
            records: Vec::new(),
            capacity_limit,
        }
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity_limit
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        matches!(self.capacity_limit, Some(limit) if self.records.len() >= limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HolidayRecord> {
        self.records.iter()
    }

    /// Parses the contents of a holiday file and returns how many records were added.
    ///
    /// The first line is a header and never parsed. Malformed lines are skipped.
    /// Once the store is full the remaining lines are read but dropped.
    pub fn load(&mut self, raw_text: &str) -> usize {
        let before = self.records.len();
        let mut dropped = 0usize;

        for (idx, line) in raw_text.lines().enumerate().skip(1) {
            let line_num = idx + 1;

            let record = match parse::parse_line(line) {
                Ok(record) => record,
                Err(SkipReason::Empty) => continue,
                Err(reason) => {
                    log::debug!("Skipping line {}: {}", line_num, reason);
                    continue;
                }
            };

            if self.is_full() {
                dropped += 1;
                log::trace!("Store full, dropping line {}", line_num);
                continue;
            }

            self.records.push(record);
        }

        if dropped > 0 {
            log::warn!(
                "Holiday capacity of {} reached, {} further record(s) ignored",
                self.capacity_limit.unwrap_or_default(),
                dropped
            );
        }

        self.records.len() - before
    }

    pub fn lookup(&self, year: i32, month: u32, day: u32) -> Option<&HolidayRecord> {
        self.records.iter().find(|r| r.is_on(year, month, day))
    }

    pub fn records_in_month<'a>(
        &'a self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &'a HolidayRecord> + 'a {
        self.records.iter().filter(move |r| r.is_in(year, month))
    }
}
