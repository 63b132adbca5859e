use crate::stats::YearlyWinners;
use std::fmt;

/// Console rendering of the yearly winners.
///
/// One line per year: `1979 Lomma, Vellinge 95.3%`.
pub struct ConsoleReport<'a>(pub &'a YearlyWinners);

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (year, w) in self.0 {
            writeln!(f, "{} {} {:.1}%", year, w.regions.join(", "), w.value)?;
        }
        Ok(())
    }
}
