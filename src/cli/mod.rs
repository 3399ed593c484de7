pub mod accounts;
pub mod categories;
pub mod companies;
pub mod cost_centers;
pub mod import;
pub mod init;
pub mod rules;
pub mod staging;
pub mod transactions;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "caixa", about = "Statement-import and bookkeeping CLI for Brazilian small businesses.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up caixa: choose a data directory and initialize the database.
    Init {
        /// Path for caixa data (default: ~/Documents/caixa)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Switch the active company.
    Use {
        /// Company code
        code: String,
    },
    /// Manage companies (tenants).
    Companies {
        #[command(subcommand)]
        command: CompaniesCommands,
    },
    /// Manage bank accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage cost centers.
    CostCenters {
        #[command(subcommand)]
        command: CostCentersCommands,
    },
    /// Manage auto-classification rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Import an OFX/CSV statement into a staging batch.
    Import {
        /// Path to the statement file
        file: String,
        /// Account name to import into
        #[arg(long)]
        account: String,
    },
    /// Review, classify and commit staged batches.
    Staging {
        #[command(subcommand)]
        command: StagingCommands,
    },
    /// List committed ledger transactions.
    Transactions {
        #[command(subcommand)]
        command: TransactionsCommands,
    },
}

#[derive(Subcommand)]
pub enum CompaniesCommands {
    /// Register a new company and make it active.
    Add {
        /// Short unique code, e.g. ACME
        code: String,
        #[arg(long = "legal-name")]
        legal_name: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    List,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// Add a new account for the active company.
    Add {
        name: String,
        /// checking, savings, credit_card...
        #[arg(long = "account-type", default_value = "checking")]
        account_type: String,
        #[arg(long)]
        bank: Option<String>,
    },
    List,
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    Add {
        name: String,
        /// income or expense
        #[arg(long = "category-type")]
        category_type: String,
        #[arg(long)]
        group: Option<String>,
    },
    List,
}

#[derive(Subcommand)]
pub enum CostCentersCommands {
    Add { name: String },
    List,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Add a classification rule.
    Add {
        pattern: String,
        /// description, counterparty or payment_method
        #[arg(long, default_value = "description")]
        target: String,
        /// contains, equals, prefix, suffix or regex
        #[arg(long = "match", default_value = "contains")]
        match_kind: String,
        /// Suggested category name
        #[arg(long)]
        category: Option<String>,
        /// Suggested cost center name
        #[arg(long = "cost-center")]
        cost_center: Option<String>,
        /// Suggested description override
        #[arg(long)]
        description: Option<String>,
        /// Fixed payment method
        #[arg(long = "payment-method")]
        payment_method: Option<String>,
        #[arg(long, default_value_t = 0)]
        priority: i64,
    },
    List,
    /// Deactivate a rule.
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum StagingCommands {
    /// Show the staged lines of a batch.
    List {
        #[arg(long)]
        batch: i64,
    },
    /// Run the classifier over the batch's unknown lines.
    Classify {
        #[arg(long)]
        batch: i64,
    },
    /// Commit the batch to the ledger.
    Commit {
        #[arg(long)]
        batch: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsCommands {
    List {
        /// Substring to search in descriptions
        #[arg(long)]
        search: Option<String>,
        /// Minimum entry date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Maximum entry date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value_t = 100)]
        limit: i64,
    },
}
