//! Demo driver for `department_core`.
//!
//! # Responsibility
//! - Open a storage handle, bootstrap the schema explicitly and walk one
//!   department lifecycle, printing each record as it changes.
//! - Keep output deterministic for quick local sanity checks.

use clap::Parser;
use department_core::{
    core_version, default_log_level, init_logging, open_db, open_db_in_memory, Department,
};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "department-demo")]
#[command(about = "Walk a Department record through create/update/delete")]
#[command(version)]
struct Cli {
    /// SQLite database file; an in-memory database is used when omitted
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("department-demo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir)?;
    }

    let conn = match &cli.db {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    info!(
        "event=demo_start module=cli status=ok version={}",
        core_version()
    );

    run_scenario(&conn)
}

fn run_scenario(conn: &Connection) -> Result<(), Box<dyn Error>> {
    Department::drop_table(conn)?;
    Department::create_table(conn)?;

    let mut payroll = Department::new("Payroll", "Building A, 5th Floor");
    println!("{payroll}");

    Department::create(conn, "Human Resources", "Building C, East Wing")?;
    Department::create(conn, "Human Resources", "Building C, East Wing")?;
    let software = Department::create(conn, "Software Resources", "Building C, East Wing")?;
    println!("{software}");

    payroll.save(conn)?;
    println!("{payroll}");

    let mut hr = Department::new("Human Resources", "Building C, East Wing");
    println!("{hr}");

    hr.save(conn)?;
    println!("{hr}");

    hr.name = "HR".to_string();
    hr.location = "Building F, 10th Floor".to_string();
    hr.update(conn)?;
    println!("{hr}");

    println!("Delete Payroll");
    payroll.delete(conn)?;
    println!("{payroll}");

    println!("Stored departments:");
    for department in Department::all(conn)? {
        println!("  {department}");
    }

    Ok(())
}
