use chrono::Month;
use num_traits::FromPrimitive;
use std::io::{self, Write};
use termion::color;

use crate::calendar;
use crate::holiday::HolidayStore;

const COLUMNS: usize = 7;
const RULE: &str = "----------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub holiday: bool,
}

/// Days of one month laid out in week rows, Sunday first.
///
/// Leading cells before the first of the month are `None`.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    first: u32,
    total: u32,
    cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32, store: &HolidayStore) -> Self {
        let first = calendar::weekday_of(year, month, 1);
        let total = calendar::days_in_month(year, month);

        let cells = (0..first)
            .map(|_| None)
            .chain((1..=total).map(|day| {
                Some(DayCell {
                    day,
                    holiday: store.lookup(year, month, day).is_some(),
                })
            }))
            .collect();

        MonthGrid {
            first,
            total,
            cells,
        }
    }

    pub fn leading_blanks(&self) -> u32 {
        self.first
    }

    pub fn days(&self) -> u32 {
        self.total
    }

    pub fn cells(&self) -> &[Option<DayCell>] {
        &self.cells
    }

    /// Week rows; only the last one may be shorter than seven cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(COLUMNS)
    }
}

pub struct Renderer {
    weekday_labels: [String; 7],
    marker: char,
    title_format: String,
    listing_header: String,
    none_text: String,
    color: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer {
            weekday_labels: calendar::default_weekday_labels(),
            marker: '*',
            title_format: "{month_name} {year}".to_owned(),
            listing_header: "Holidays".to_owned(),
            none_text: "none".to_owned(),
            color: false,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Renderer::default()
    }

    pub fn weekday_labels(mut self, labels: [String; 7]) -> Self {
        self.weekday_labels = labels;
        self
    }

    pub fn marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// `{year}`, `{month}` and `{month_name}` are substituted.
    pub fn title_format(mut self, format: &str) -> Self {
        self.title_format = format.to_owned();
        self
    }

    pub fn listing_header(mut self, header: &str) -> Self {
        self.listing_header = header.to_owned();
        self
    }

    pub fn none_text(mut self, text: &str) -> Self {
        self.none_text = text.to_owned();
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn title(&self, year: i32, month: u32) -> String {
        let month_name = Month::from_u32(month)
            .map(|m| m.name().to_owned())
            .unwrap_or_else(|| month.to_string());

        self.title_format
            .replace("{year}", &year.to_string())
            .replace("{month_name}", &month_name)
            .replace("{month}", &month.to_string())
    }

    fn write_cell<W: Write>(&self, out: &mut W, column: usize, cell: &DayCell) -> io::Result<()> {
        let marker = if cell.holiday { self.marker } else { ' ' };

        if self.color && (cell.holiday || column == 0) {
            write!(
                out,
                "{}{:3}{}{}",
                color::Fg(color::Red),
                cell.day,
                marker,
                color::Fg(color::Reset)
            )
        } else {
            write!(out, "{:3}{}", cell.day, marker)
        }
    }

    fn write_grid<W: Write>(&self, out: &mut W, grid: &MonthGrid) -> io::Result<()> {
        for row in grid.rows() {
            for (column, cell) in row.iter().enumerate() {
                match cell {
                    Some(cell) => self.write_cell(out, column, cell)?,
                    None => write!(out, "    ")?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_listing<W: Write>(
        &self,
        out: &mut W,
        year: i32,
        month: u32,
        store: &HolidayStore,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.listing_header)?;

        let mut any = false;
        for record in store.records_in_month(year, month) {
            writeln!(out, "  {:2}: {}", record.day, record.name)?;
            any = true;
        }

        if !any {
            writeln!(out, "  {}", self.none_text)?;
        }
        Ok(())
    }

    /// Writes the grid for `month` of `year` followed by that month's holidays.
    ///
    /// `month` has to be in 1..=12.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        year: i32,
        month: u32,
        store: &HolidayStore,
    ) -> io::Result<()> {
        let grid = MonthGrid::new(year, month, store);

        writeln!(out)?;
        writeln!(out, "        {}", self.title(year, month))?;
        writeln!(out, "{}", RULE)?;
        for label in self.weekday_labels.iter() {
            write!(out, " {} ", label)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", RULE)?;

        self.write_grid(out, &grid)?;
        writeln!(out, "{}", RULE)?;
        writeln!(out)?;

        self.write_listing(out, year, month, store)?;
        writeln!(out)
    }

    pub fn render_to_string(
        &self,
        year: i32,
        month: u32,
        store: &HolidayStore,
    ) -> io::Result<String> {
        let mut buf = Vec::new();
        self.render(&mut buf, year, month, store)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HolidayStore {
        let mut store = HolidayStore::new();
        store.load(
            "date,name
2025/2/11,National Foundation Day
2025/2/23,Emperor's Birthday
2025/2/24,Substitute Holiday
",
        );
        store
    }

    #[test]
    fn sunday_start_has_no_blanks() {
        // 2025-06-01 is a Sunday
        let grid = MonthGrid::new(2025, 6, &store());

        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.days(), 30);
        assert_eq!(grid.cells()[0], Some(DayCell { day: 1, holiday: false }));
        assert_eq!(grid.rows().count(), 5);
    }

    #[test]
    fn saturday_start_has_six_blanks() {
        // 2025-02-01 is a Saturday
        let grid = MonthGrid::new(2025, 2, &store());

        assert_eq!(grid.leading_blanks(), 6);
        assert!(grid.cells()[..6].iter().all(Option::is_none));
        assert_eq!(grid.cells()[6], Some(DayCell { day: 1, holiday: false }));

        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[..4].iter().all(|row| row.len() == 7));
        assert_eq!(rows[4].len(), 6);
        assert_eq!(rows[4][5], Some(DayCell { day: 28, holiday: false }));
    }

    #[test]
    fn holidays_are_marked() {
        let grid = MonthGrid::new(2025, 2, &store());
        let holidays: Vec<u32> = grid
            .cells()
            .iter()
            .flatten()
            .filter(|cell| cell.holiday)
            .map(|cell| cell.day)
            .collect();

        assert_eq!(holidays, vec![11, 23, 24]);
    }

    #[test]
    fn renders_grid_and_listing() {
        let out = Renderer::new().render_to_string(2025, 2, &store()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "        February 2025");
        assert_eq!(lines[3], " Su  Mo  Tu  We  Th  Fr  Sa ");
        assert_eq!(lines[5], format!("{}  1 ", " ".repeat(24)));
        assert_eq!(lines[6], "  2   3   4   5   6   7   8 ");
        assert_eq!(lines[7], "  9  10  11* 12  13  14  15 ");
        assert_eq!(lines[9], " 23* 24* 25  26  27  28 ");
        assert!(out.contains("Holidays\n  11: National Foundation Day\n  23: Emperor's Birthday\n  24: Substitute Holiday\n"));
    }

    #[test]
    fn empty_month_says_none() {
        let renderer = Renderer::new().none_text("nothing").marker('+');
        let out = renderer.render_to_string(2025, 6, &store()).unwrap();

        assert!(out.contains("Holidays\n  nothing\n"));
        assert!(!out.contains('+'));
        assert!(out.contains("\n  1   2   3   4   5   6   7 \n"));
    }

    #[test]
    fn impossible_day_is_listed_but_not_gridded() {
        let mut store = HolidayStore::new();
        store.load("date,name\n2025/4/31,Phantom\n");

        let grid = MonthGrid::new(2025, 4, &store);
        assert!(grid.cells().iter().flatten().all(|cell| !cell.holiday));

        let out = Renderer::new().render_to_string(2025, 4, &store).unwrap();
        assert!(out.contains("  31: Phantom"));
    }

    #[test]
    fn custom_title_and_labels() {
        let renderer = Renderer::new()
            .title_format("{year}年 {month}月")
            .weekday_labels(["日", "月", "火", "水", "木", "金", "土"].map(String::from));

        assert_eq!(renderer.title(2025, 1), "2025年 1月");
        let out = renderer.render_to_string(2025, 1, &HolidayStore::new()).unwrap();
        assert!(out.contains(" 日  月  火  水  木  金  土 "));
    }

    #[test]
    fn color_wraps_holidays_and_sundays() {
        let out = Renderer::new().color(true).render_to_string(2025, 2, &store()).unwrap();
        let red = color::Fg(color::Red).to_string();

        assert!(out.contains(&format!("{} 11*", red)));
        assert!(out.contains(&format!("{}  2 ", red)));
        assert!(!out.contains(&format!("{}  3 ", red)));
    }
}
