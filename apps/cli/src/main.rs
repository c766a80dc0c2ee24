mod config;
mod console_sink;
mod main_lib;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use rust_decimal::Decimal;

use config::Config;
use console_sink::ConsoleDomainEventSink;
use expensebook_core::{
    categories::{Category, CategoryServiceTrait},
    expenses::{Expense, ExpenseServiceTrait},
};
use main_lib::{build_state, init_tracing, AppState};

#[derive(Parser)]
#[command(
    name = "expensebook",
    about = "Track expenses filed under categories",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Print every outcome as a JSON object per line.
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Category commands.
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Expense commands.
    Expense {
        #[command(subcommand)]
        command: ExpenseCommands,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List all categories.
    List,
    /// Create a category. The id is generated when omitted.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        id: String,
    },
    /// Replace the name and description of a category.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Delete a category that has no expenses.
    Delete {
        #[arg(long)]
        id: String,
    },
    /// List the expenses filed under a category.
    Expenses {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum ExpenseCommands {
    /// List all expenses.
    List,
    /// Record an expense. The id is generated when omitted.
    Add {
        #[command(flatten)]
        fields: ExpenseFields,
        #[arg(long, default_value = "")]
        id: String,
    },
    /// Replace every field of an expense.
    Update {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: ExpenseFields,
    },
    /// Delete an expense.
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(clap::Args)]
struct ExpenseFields {
    /// Amount, must be greater than zero.
    #[arg(long, allow_negative_numbers = true)]
    amount: Decimal,
    #[arg(long)]
    description: String,
    /// Date as YYYY-MM-DD. Cannot be in the future.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Id of an existing category.
    #[arg(long)]
    category: String,
}

impl ExpenseFields {
    fn into_expense(self, id: String, state: &AppState) -> Result<Expense> {
        Ok(Expense {
            id,
            amount: self.amount,
            description: self.description,
            date: self.date,
            category: Some(state.resolve_category(&self.category)?),
        })
    }
}

fn run_category(state: &AppState, command: CategoryCommands) -> Result<()> {
    let service = &state.category_service;
    match command {
        CategoryCommands::List => service.list_categories()?,
        CategoryCommands::Add {
            name,
            description,
            id,
        } => service.create_category(Category::new(name, description).with_id(id))?,
        CategoryCommands::Update {
            id,
            name,
            description,
        } => service.update_category(Category::new(name, description).with_id(id))?,
        CategoryCommands::Delete { id } => service.delete_category(state.resolve_category(&id)?)?,
        CategoryCommands::Expenses { id } => {
            service.list_expenses_of(&state.resolve_category(&id)?)?
        }
    }
    Ok(())
}

fn run_expense(state: &AppState, command: ExpenseCommands) -> Result<()> {
    let service = &state.expense_service;
    match command {
        ExpenseCommands::List => service.list_expenses()?,
        ExpenseCommands::Add { fields, id } => {
            service.create_expense(fields.into_expense(id, state)?)?
        }
        ExpenseCommands::Update { id, fields } => {
            service.update_expense(fields.into_expense(id, state)?)?
        }
        ExpenseCommands::Delete { id } => {
            service.delete_expense(Expense::default().with_id(id))?
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config);

    let state = build_state(&config, ConsoleDomainEventSink::new(cli.json))?;

    match cli.command {
        Commands::Category { command } => run_category(&state, command),
        Commands::Expense { command } => run_expense(&state, command),
    }
}
