//! Sink traits and implementations.
//!
//! Services report every outcome through a per-entity sink: `CategorySink`
//! for the category service, `ExpenseSink` for the expense service. Any
//! `DomainEventSink` is automatically both, so a runtime adapter only needs
//! to handle `DomainEvent`s.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use super::DomainEvent;
use crate::categories::Category;
use crate::expenses::Expense;

/// Receiver of category service outcomes.
///
/// Calls arrive synchronously on the caller's thread, possibly while the
/// service holds its write lock. Implementations must return quickly.
pub trait CategorySink: Send + Sync {
    fn show_all(&self, categories: Vec<Category>);
    fn show_expenses(&self, expenses: Vec<Expense>);
    fn added(&self, category: Category);
    fn updated(&self, category: Category);
    fn deleted(&self, category: Category);
    fn error(&self, message: String, subject: Category);
}

/// Receiver of expense service outcomes.
///
/// `not_found_error` carries rejections caused by a missing record; every
/// other rejection goes to `error`.
pub trait ExpenseSink: Send + Sync {
    fn show_all(&self, expenses: Vec<Expense>);
    fn added(&self, expense: Expense);
    fn updated(&self, expense: Expense);
    fn deleted(&self, expense: Expense);
    fn error(&self, message: String, subject: Expense);
    fn not_found_error(&self, message: String, subject: Expense);
}

/// Trait for receiving domain events.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls, no DB writes)
/// - Failure to emit must not affect domain operations (best-effort)
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    fn emit(&self, event: DomainEvent);

    /// Emit multiple domain events.
    ///
    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

impl<T: DomainEventSink + ?Sized> CategorySink for T {
    fn show_all(&self, categories: Vec<Category>) {
        self.emit(DomainEvent::CategoriesListed { categories });
    }

    fn show_expenses(&self, expenses: Vec<Expense>) {
        self.emit(DomainEvent::CategoryExpensesListed { expenses });
    }

    fn added(&self, category: Category) {
        self.emit(DomainEvent::CategoryAdded { category });
    }

    fn updated(&self, category: Category) {
        self.emit(DomainEvent::CategoryUpdated { category });
    }

    fn deleted(&self, category: Category) {
        self.emit(DomainEvent::CategoryDeleted { category });
    }

    fn error(&self, message: String, subject: Category) {
        self.emit(DomainEvent::category_rejected(message, subject));
    }
}

impl<T: DomainEventSink + ?Sized> ExpenseSink for T {
    fn show_all(&self, expenses: Vec<Expense>) {
        self.emit(DomainEvent::ExpensesListed { expenses });
    }

    fn added(&self, expense: Expense) {
        self.emit(DomainEvent::ExpenseAdded { expense });
    }

    fn updated(&self, expense: Expense) {
        self.emit(DomainEvent::ExpenseUpdated { expense });
    }

    fn deleted(&self, expense: Expense) {
        self.emit(DomainEvent::ExpenseDeleted { expense });
    }

    fn error(&self, message: String, subject: Expense) {
        self.emit(DomainEvent::expense_rejected(message, subject));
    }

    fn not_found_error(&self, message: String, subject: Expense) {
        self.emit(DomainEvent::expense_not_found(message, subject));
    }
}

/// No-op implementation for contexts that don't need outcomes.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Forwards events to a channel for consumption on another thread.
///
/// Sends never block. Events emitted after the receiver is dropped are lost.
#[derive(Clone)]
pub struct ChannelDomainEventSink {
    tx: Sender<DomainEvent>,
}

impl ChannelDomainEventSink {
    pub fn new() -> (Self, Receiver<DomainEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl DomainEventSink for ChannelDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("Event receiver dropped; discarding domain event");
        }
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the messages of all collected rejections, in order.
    pub fn rejection_messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| e.rejection_message().map(str::to_string))
            .collect()
    }

    /// Counts collected events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DomainEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(e)).count()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}
