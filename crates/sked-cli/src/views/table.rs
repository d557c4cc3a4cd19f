use chrono::Duration;
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use sked_core::date::CalendarDate;
use sked_core::models::Task;

/// Relative description of `date` as seen from `today`, e.g. "in 3 days".
pub fn relative_day(date: CalendarDate, today: CalendarDate) -> String {
    match date.days_since(&today) {
        0 => "today".to_string(),
        days => HumanTime::from(Duration::days(days)).to_string(),
    }
}

fn date_cell(task: &Task, today: CalendarDate) -> Cell {
    let Ok(date) = CalendarDate::parse(&task.date) else {
        return Cell::new(&task.date).fg(Color::DarkGrey);
    };

    let text = format!("{} ({})", date.as_naive().format("%Y-%m-%d"), relative_day(date, today));
    if today.is_after(&date) {
        Cell::new(text).fg(Color::Red)
    } else if date == today {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

fn repeat_text(task: &Task) -> &str {
    if task.is_recurring() {
        &task.repeat
    } else {
        "None"
    }
}

pub fn display_tasks(tasks: &[Task], today: CalendarDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Title", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(date_cell(task, today));

        let mut title = String::new();
        if task.is_recurring() {
            title.push_str("↻ ");
        }
        title.push_str(&task.title);
        row.add_cell(Cell::new(title).add_attribute(Attribute::Bold));

        row.add_cell(Cell::new(repeat_text(task)));
        row.add_cell(Cell::new(&task.comment));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task(task: &Task, today: CalendarDate) {
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(task.id)]);
    table.add_row(vec![Cell::new("Title"), Cell::new(&task.title).add_attribute(Attribute::Bold)]);
    table.add_row(vec![Cell::new("Date"), date_cell(task, today)]);
    table.add_row(vec![Cell::new("Repeat"), Cell::new(repeat_text(task))]);
    table.add_row(vec![
        Cell::new("Comment"),
        Cell::new(if task.comment.is_empty() { "None" } else { &task.comment }),
    ]);
    println!("{table}");
}
