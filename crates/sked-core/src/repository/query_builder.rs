use sqlx::{QueryBuilder, Sqlite};

use crate::models::TaskSearch;

pub const TASK_COLUMNS: &str = "id, date, title, comment, repeat";

/// Builds the listing query for a search, ordered by due date.
pub fn build_task_search<'a>(search: &'a TaskSearch, limit: i64) -> QueryBuilder<'a, Sqlite> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM scheduler", TASK_COLUMNS));

    match search {
        TaskSearch::All => {}
        TaskSearch::OnDate(date) => {
            builder.push(" WHERE date = ");
            builder.push_bind(date.to_string());
        }
        TaskSearch::Text(text) => {
            let pattern = format!("%{}%", text);
            builder.push(" WHERE title LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR comment LIKE ");
            builder.push_bind(pattern);
        }
    }

    builder.push(" ORDER BY date, id LIMIT ");
    builder.push_bind(limit);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::CalendarDate;

    #[test]
    fn test_all_has_no_where_clause() {
        let builder = build_task_search(&TaskSearch::All, 50);
        assert_eq!(
            builder.sql(),
            "SELECT id, date, title, comment, repeat FROM scheduler ORDER BY date, id LIMIT ?"
        );
    }

    #[test]
    fn test_date_search_matches_exact_date() {
        let search = TaskSearch::OnDate(CalendarDate::parse("20240208").unwrap());
        let builder = build_task_search(&search, 50);
        assert!(builder.sql().contains("WHERE date = ?"));
    }

    #[test]
    fn test_text_search_covers_title_and_comment() {
        let search = TaskSearch::Text("gym".to_string());
        let builder = build_task_search(&search, 10);
        assert!(builder.sql().contains("WHERE title LIKE ? OR comment LIKE ?"));
    }
}
