use anyhow::Result;
use sked_core::date::CalendarDate;
use sked_core::recurrence::next_date;

use crate::cli::NextDateCommand;
use crate::util::today;

/// Prints the next occurrence, mirroring `GET /api/nextdate`.
pub fn print_next_date(command: NextDateCommand) -> Result<()> {
    let now = match command.now.as_deref() {
        Some(now) => CalendarDate::parse(now)?,
        None => today(),
    };
    println!("{}", next_date(now, &command.date, &command.repeat)?);
    Ok(())
}
