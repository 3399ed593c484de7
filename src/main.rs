mod audit;
mod classifier;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod rules;
mod settings;
mod staging;
mod util;

use clap::Parser;

use cli::{
    AccountsCommands, CategoriesCommands, Cli, Commands, CompaniesCommands, CostCentersCommands,
    RulesCommands, StagingCommands, TransactionsCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Use { code } => cli::companies::use_company(&code),
        Commands::Companies { command } => match command {
            CompaniesCommands::Add {
                code,
                legal_name,
                name,
            } => cli::companies::add(&code, legal_name.as_deref(), name.as_deref()),
            CompaniesCommands::List => cli::companies::list(),
        },
        Commands::Accounts { command } => match command {
            AccountsCommands::Add {
                name,
                account_type,
                bank,
            } => cli::accounts::add(&name, &account_type, bank.as_deref()),
            AccountsCommands::List => cli::accounts::list(),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::Add {
                name,
                category_type,
                group,
            } => cli::categories::add(&name, &category_type, group.as_deref()),
            CategoriesCommands::List => cli::categories::list(),
        },
        Commands::CostCenters { command } => match command {
            CostCentersCommands::Add { name } => cli::cost_centers::add(&name),
            CostCentersCommands::List => cli::cost_centers::list(),
        },
        Commands::Rules { command } => match command {
            RulesCommands::Add {
                pattern,
                target,
                match_kind,
                category,
                cost_center,
                description,
                payment_method,
                priority,
            } => cli::rules::add(
                &pattern,
                &target,
                &match_kind,
                category.as_deref(),
                cost_center.as_deref(),
                description.as_deref(),
                payment_method.as_deref(),
                priority,
            ),
            RulesCommands::List => cli::rules::list(),
            RulesCommands::Delete { id } => cli::rules::delete(id),
        },
        Commands::Import { file, account } => cli::import::run(&file, &account),
        Commands::Staging { command } => match command {
            StagingCommands::List { batch } => cli::staging::list(batch),
            StagingCommands::Classify { batch } => cli::staging::classify(batch),
            StagingCommands::Commit { batch } => cli::staging::commit(batch),
        },
        Commands::Transactions { command } => match command {
            TransactionsCommands::List {
                search,
                from,
                to,
                limit,
            } => cli::transactions::list(search.as_deref(), from.as_deref(), to.as_deref(), limit),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
