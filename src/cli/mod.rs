use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::ExpenseService;
use crate::config::{CATEGORIES_ENV, Config, DATABASE_ENV};
use crate::domain::{
    DEFAULT_LIST_LIMIT, DateRange, ExpenseFilter, NewExpense, non_blank, parse_amount,
};
use crate::{logging, mcp, render};

/// spendlog - expense tracking over MCP and the command line
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Record expenses and summarize spending, as an MCP server or from the shell")]
#[command(version)]
pub struct Cli {
    /// Database file path (defaults to a file under the system temp directory)
    #[arg(short, long, global = true, env = DATABASE_ENV)]
    pub database: Option<PathBuf>,

    /// JSON file mapping categories to subcategories
    #[arg(long, global = true, env = CATEGORIES_ENV)]
    pub categories: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdio
    Serve,

    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Main category (e.g., Food, Transport)
        #[arg(short, long)]
        category: String,

        /// Specific subcategory (e.g., Grocery, Uber)
        #[arg(short, long)]
        subcategory: Option<String>,

        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recent expenses, newest first
    List {
        /// Filter by exact category
        #[arg(short, long)]
        category: Option<String>,

        /// Earliest date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Maximum number of expenses to show
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: u32,
    },

    /// Spending grouped by category and subcategory
    Summary {
        /// Start date (YYYY-MM-DD, defaults to the first expense)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show the configured category hierarchy
    Categories,

    /// Show the lifetime spending total
    Total,

    /// Export all expenses
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Outcome of a subcommand: the text to show and whether it reports a failure.
struct Outcome {
    text: String,
    failed: bool,
}

impl Outcome {
    fn ok(text: String) -> Self {
        Self {
            text,
            failed: false,
        }
    }

    fn failed(text: String) -> Self {
        Self { text, failed: true }
    }
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let command = self.command.unwrap_or(Commands::Serve);
        logging::init(match (&command, self.verbose) {
            (_, true) => logging::VERBOSE_FILTER,
            (Commands::Serve, false) => logging::SERVER_FILTER,
            _ => logging::COMMAND_FILTER,
        });

        let config = Config::resolve(self.database, self.categories);
        let service = ExpenseService::init(&config.database, &config.categories_file)
            .await
            .with_context(|| {
                format!("Failed to initialize database {}", config.database.display())
            })?;

        let outcome = match command {
            Commands::Serve => {
                mcp::run_server(service)
                    .await
                    .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))?;
                return Ok(ExitCode::SUCCESS);
            }

            Commands::Init => Outcome::ok(format!(
                "Database initialized: {}",
                service.database_location().display()
            )),

            Commands::Add {
                amount,
                category,
                subcategory,
                note,
                date,
            } => {
                let amount = parse_amount(&amount)
                    .with_context(|| format!("Invalid amount '{amount}'. Use '12.50' or '12'"))?;
                let mut expense = NewExpense::new(amount, category);
                if let Some(date) = non_blank(date) {
                    expense = expense.with_date(date);
                }
                expense.subcategory = subcategory;
                expense.note = note;

                match service.add_expense(expense).await {
                    Ok(record) => Outcome::ok(render::added_expense(&record)),
                    Err(err) => Outcome::failed(render::add_expense_error(&err)),
                }
            }

            Commands::List {
                category,
                from,
                to,
                limit,
            } => {
                let filter = ExpenseFilter::new(category, DateRange::new(from, to), limit);
                match service.list_expenses(&filter).await {
                    Ok(expenses) => Outcome::ok(render::expense_table(&expenses)),
                    Err(err) => Outcome::failed(render::error(&err)),
                }
            }

            Commands::Summary { from, to } => {
                match service.get_summary(DateRange::new(from, to)).await {
                    Ok(summary) => Outcome::ok(render::spending_summary(&summary)),
                    Err(err) => Outcome::failed(render::summary_error(&err)),
                }
            }

            Commands::Categories => match service.categories().await {
                Ok(hierarchy) => Outcome::ok(render::category_outline(hierarchy.as_ref())),
                Err(err) => Outcome::failed(render::error(&err)),
            },

            Commands::Total => match service.lifetime_summary().await {
                Ok(summary) => Outcome::ok(render::lifetime_summary(&summary)),
                Err(err) => Outcome::failed(render::error(&err)),
            },

            Commands::Export { format, output } => {
                run_export_command(&service, format, output).await?;
                return Ok(ExitCode::SUCCESS);
            }
        };

        if outcome.failed {
            eprintln!("{}", outcome.text);
            Ok(ExitCode::FAILURE)
        } else {
            println!("{}", outcome.text);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_export_command(
    service: &ExpenseService,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format {
        ExportFormat::Csv => exporter.export_csv(writer).await?,
        ExportFormat::Json => exporter.export_json(writer).await?.expenses.len(),
    };

    if output.is_some() {
        eprintln!("Exported {} expenses", count);
    }
    Ok(())
}
