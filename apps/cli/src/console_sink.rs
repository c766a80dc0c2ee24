//! Prints domain events to the terminal.
//!
//! Successful outcomes go to stdout, rejections to stderr. With `--json`
//! every event is written as one JSON object per line.

use std::fmt::Display;
use std::io::{self, Write};

use expensebook_core::events::{DomainEvent, DomainEventSink};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDomainEventSink {
    json: bool,
}

impl ConsoleDomainEventSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Turns an event into the text to print and the stream it belongs on.
    pub fn render(&self, event: &DomainEvent) -> (Stream, String) {
        let stream = if event.is_rejection() {
            Stream::Stderr
        } else {
            Stream::Stdout
        };

        if self.json {
            let line = serde_json::to_string(event).unwrap_or_else(|err| {
                format!("{{\"type\":\"serialization_failed\",\"error\":\"{}\"}}", err)
            });
            return (stream, line);
        }

        let text = match event {
            DomainEvent::CategoriesListed { categories } => {
                list_lines(categories, "No categories")
            }
            DomainEvent::CategoryExpensesListed { expenses }
            | DomainEvent::ExpensesListed { expenses } => list_lines(expenses, "No expenses"),
            DomainEvent::CategoryAdded { category } => format!("Category added: {}", category),
            DomainEvent::CategoryUpdated { category } => {
                format!("Category updated: {}", category)
            }
            DomainEvent::CategoryDeleted { category } => {
                format!("Category deleted: {}", category)
            }
            DomainEvent::ExpenseAdded { expense } => format!("Expense added: {}", expense),
            DomainEvent::ExpenseUpdated { expense } => format!("Expense updated: {}", expense),
            DomainEvent::ExpenseDeleted { expense } => format!("Expense deleted: {}", expense),
            DomainEvent::CategoryRejected { message, .. }
            | DomainEvent::ExpenseRejected { message, .. } => format!("Error: {}", message),
            DomainEvent::ExpenseNotFound { message, .. } => format!("Not found: {}", message),
        };
        (stream, text)
    }
}

/// Writes one line, logging instead of failing when the stream is gone.
fn write_line(out: &mut dyn Write, text: &str) -> bool {
    match writeln!(out, "{}", text) {
        Ok(()) => true,
        Err(err) => {
            debug!("Dropping console output for domain event: {}", err);
            false
        }
    }
}

fn list_lines<T: Display>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl DomainEventSink for ConsoleDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        let (stream, text) = self.render(&event);
        match stream {
            Stream::Stdout => write_line(&mut io::stdout().lock(), &text),
            Stream::Stderr => write_line(&mut io::stderr().lock(), &text),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use expensebook_core::categories::Category;
    use expensebook_core::expenses::Expense;
    use rust_decimal_macros::dec;

    fn bills() -> Category {
        Category::new("bills", "utilities").with_id("c-1")
    }

    #[test]
    fn test_rejections_go_to_stderr() {
        let sink = ConsoleDomainEventSink::new(false);
        let event = DomainEvent::category_rejected(
            "Category does not exist with id c-9: Category[id=c-9, name=, description=]",
            Category::default().with_id("c-9"),
        );

        let (stream, text) = sink.render(&event);

        assert_eq!(stream, Stream::Stderr);
        assert_eq!(
            text,
            "Error: Category does not exist with id c-9: Category[id=c-9, name=, description=]"
        );
    }

    #[test]
    fn test_not_found_is_labelled() {
        let sink = ConsoleDomainEventSink::new(false);
        let expense = Expense::default().with_id("e-9");
        let event =
            DomainEvent::expense_not_found("Expense does not exist with id e-9: x", expense);

        let (stream, text) = sink.render(&event);

        assert_eq!(stream, Stream::Stderr);
        assert!(text.starts_with("Not found: Expense does not exist"));
    }

    #[test]
    fn test_lists_print_one_record_per_line() {
        let sink = ConsoleDomainEventSink::new(false);
        let other = Category::new("travel", "trips").with_id("c-2");

        let (stream, text) = sink.render(&DomainEvent::CategoriesListed {
            categories: vec![bills(), other],
        });

        assert_eq!(stream, Stream::Stdout);
        assert_eq!(
            text,
            "Category[id=c-1, name=bills, description=utilities]\n\
             Category[id=c-2, name=travel, description=trips]"
        );
        assert_eq!(
            sink.render(&DomainEvent::ExpensesListed { expenses: vec![] }).1,
            "No expenses"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_line_reports_closed_stream_without_panicking() {
        let mut buffer = Vec::new();
        assert!(write_line(&mut buffer, "Category added: x"));
        assert_eq!(buffer, b"Category added: x\n");

        assert!(!write_line(&mut ClosedPipe, "Category added: x"));
    }

    #[test]
    fn test_json_mode_writes_tagged_events() {
        let sink = ConsoleDomainEventSink::new(true);
        let expense = Expense::new(
            dec!(12.5),
            "lunch",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            bills(),
        )
        .with_id("e-1");

        let (stream, line) = sink.render(&DomainEvent::ExpenseAdded { expense });
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(stream, Stream::Stdout);
        assert_eq!(value["type"], "expense_added");
        assert_eq!(value["expense"]["id"], "e-1");
        assert_eq!(value["expense"]["category"]["name"], "bills");
    }
}
