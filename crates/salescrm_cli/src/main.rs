//! CLI entry point.
//!
//! # Responsibility
//! - Run the startup lifecycle (schema + seed) against the configured store.
//! - Print plain-text board, contact list, intel and health views.
//!
//! Usage: `salescrm [board|contacts|intel|health]` (defaults to `board`).

use log::error;
use salescrm_core::{
    health_check, init_logging, initialize_and_seed, ContactService, CrmConfig, SeedOutcome,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CrmConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let view = std::env::args().nth(1).unwrap_or_else(|| "board".to_string());
    match run(&config, view.as_str()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error view={view} error={err}");
            eprintln!("salescrm: {err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Board,
    Contacts,
    Intel,
    Health,
}

impl View {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "board" => Some(Self::Board),
            "contacts" => Some(Self::Contacts),
            "intel" => Some(Self::Intel),
            "health" => Some(Self::Health),
            _ => None,
        }
    }
}

fn run(config: &CrmConfig, view: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Reject unknown views before the store is created or seeded.
    let view = View::parse(view).ok_or_else(|| format!("unknown view `{view}`"))?;

    let (conn, outcome) = initialize_and_seed(&config.db_path)?;
    if let SeedOutcome::Seeded { contacts } = outcome {
        println!("seeded {contacts} contacts into {}", config.db_path.display());
    }

    let service = ContactService::sqlite(&conn)?;
    match view {
        View::Board => {
            for (status, contacts) in service.status_board()?.columns() {
                println!("== {status} ({})", contacts.len());
                for contact in contacts {
                    println!("  #{} {} ({})", contact.id, contact.name, contact.company);
                }
            }
        }
        View::Contacts => {
            for contact in service.list_contacts()? {
                println!(
                    "#{} {} <{}> {} [{}]",
                    contact.id, contact.name, contact.email, contact.company, contact.status
                );
            }
        }
        View::Intel => {
            for contact in service.intel_report()? {
                println!(
                    "{}: {}",
                    contact.company,
                    contact.competitive_intel.as_deref().unwrap_or("-")
                );
            }
        }
        View::Health => {
            let report = health_check(&conn)?;
            println!("status={} schema_version={}", report.status, report.schema_version);
        }
    }

    Ok(())
}
