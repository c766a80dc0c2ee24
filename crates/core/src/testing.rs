//! In-memory stores with call counters, shared by the service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::categories::{Category, CategoryRepositoryTrait};
use crate::errors::{DatabaseError, Result};
use crate::expenses::{Expense, ExpenseRepositoryTrait};

#[derive(Default)]
pub struct StoreCalls {
    pub reads: AtomicUsize,
    pub saves: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl StoreCalls {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.saves() + self.updates() + self.deletes()
    }

    pub fn total(&self) -> usize {
        self.reads() + self.writes()
    }
}

// --- Mock CategoryRepository ---
#[derive(Default)]
pub struct MockCategoryRepository {
    categories: Mutex<Vec<Category>>,
    next_id: AtomicUsize,
    latency: Option<Duration>,
    pub calls: StoreCalls,
}

impl MockCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read sleeps for `latency`, widening race windows in concurrency tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Inserts a category without touching the call counters.
    pub fn seed(&self, category: Category) -> Category {
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    pub fn snapshot(&self) -> Vec<Category> {
        self.categories.lock().unwrap().clone()
    }

    fn read(&self) {
        self.calls.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }
    }
}

impl CategoryRepositoryTrait for MockCategoryRepository {
    fn find_all(&self) -> Result<Vec<Category>> {
        self.read();
        Ok(self.snapshot())
    }

    fn find_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        self.read();
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == category_id)
            .cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.read();
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    fn save(&self, category: &Category) -> Result<Category> {
        self.calls.saves.fetch_add(1, Ordering::SeqCst);
        let mut saved = category.clone();
        if saved.is_transient() {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            saved.id = format!("cat-{}", n);
        }
        self.categories.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    fn update(&self, category: &Category) -> Result<Category> {
        self.calls.updates.fetch_add(1, Ordering::SeqCst);
        let mut categories = self.categories.lock().unwrap();
        let slot = categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| DatabaseError::NotFound(category.id.clone()))?;
        *slot = category.clone();
        Ok(category.clone())
    }

    fn delete(&self, category: &Category) -> Result<usize> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != category.id);
        Ok(before - categories.len())
    }
}

// --- Mock ExpenseRepository ---
#[derive(Default)]
pub struct MockExpenseRepository {
    expenses: Mutex<Vec<Expense>>,
    next_id: AtomicUsize,
    latency: Option<Duration>,
    pub calls: StoreCalls,
}

impl MockExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn seed(&self, expense: Expense) -> Expense {
        self.expenses.lock().unwrap().push(expense.clone());
        expense
    }

    pub fn snapshot(&self) -> Vec<Expense> {
        self.expenses.lock().unwrap().clone()
    }

    fn read(&self) {
        self.calls.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }
    }
}

impl ExpenseRepositoryTrait for MockExpenseRepository {
    fn find_all(&self) -> Result<Vec<Expense>> {
        self.read();
        Ok(self.snapshot())
    }

    fn find_by_id(&self, expense_id: &str) -> Result<Option<Expense>> {
        self.read();
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == expense_id)
            .cloned())
    }

    fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Expense>> {
        self.read();
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.category_id() == Some(category_id))
            .cloned()
            .collect())
    }

    fn save(&self, expense: &Expense) -> Result<Expense> {
        self.calls.saves.fetch_add(1, Ordering::SeqCst);
        let mut saved = expense.clone();
        if saved.id.is_empty() {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            saved.id = format!("exp-{}", n);
        }
        self.expenses.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    fn update(&self, expense: &Expense) -> Result<Expense> {
        self.calls.updates.fetch_add(1, Ordering::SeqCst);
        let mut expenses = self.expenses.lock().unwrap();
        let slot = expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| DatabaseError::NotFound(expense.id.clone()))?;
        *slot = expense.clone();
        Ok(expense.clone())
    }

    fn delete(&self, expense: &Expense) -> Result<usize> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        let mut expenses = self.expenses.lock().unwrap();
        let before = expenses.len();
        expenses.retain(|e| e.id != expense.id);
        Ok(before - expenses.len())
    }
}

/// A category store whose every call fails, for error propagation tests.
pub struct FailingCategoryRepository;

impl FailingCategoryRepository {
    fn fail<T>() -> Result<T> {
        Err(DatabaseError::ConnectionFailed("store offline".to_string()).into())
    }
}

impl CategoryRepositoryTrait for FailingCategoryRepository {
    fn find_all(&self) -> Result<Vec<Category>> {
        Self::fail()
    }

    fn find_by_id(&self, _category_id: &str) -> Result<Option<Category>> {
        Self::fail()
    }

    fn find_by_name(&self, _name: &str) -> Result<Option<Category>> {
        Self::fail()
    }

    fn save(&self, _category: &Category) -> Result<Category> {
        Self::fail()
    }

    fn update(&self, _category: &Category) -> Result<Category> {
        Self::fail()
    }

    fn delete(&self, _category: &Category) -> Result<usize> {
        Self::fail()
    }
}
