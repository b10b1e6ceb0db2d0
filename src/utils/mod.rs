//! Some utility functions

pub mod comparison;

use chrono::Datelike;

use crate::month::MonthView;
use crate::Catalog;

/// A debug utility that pretty-prints a month grid, with the count of events of every day
pub fn print_month(view: &MonthView, catalog: &Catalog) {
    print!("{}", format_month(view, catalog));
}

/// Renders a month grid as text. Days of the surrounding months are shown between parentheses
pub fn format_month(view: &MonthView, catalog: &Catalog) -> String {
    let mut out = format!("{}-{:02}\n", view.year(), view.month());
    out.push_str(" Sun    Mon    Tue    Wed    Thu    Fri    Sat\n");

    for week in view.day_cells(catalog).chunks(7) {
        let line: Vec<String> = week.iter()
            .map(|cell| {
                let day = if cell.in_month {
                    format!(" {:>2} ", cell.date.day())
                } else {
                    format!("({:>2})", cell.date.day())
                };
                match cell.events.len() {
                    0 => format!("{}  ", day),
                    n if n < 10 => format!("{}*{}", day, n),
                    _ => format!("{}*+", day),
                }
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
