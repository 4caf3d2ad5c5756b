use colored::*;
use futures::FutureExt;
use migration::Migrator;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

async fn connect(url: &str) -> sea_orm::DatabaseConnection {
    sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed")
}

/// Applies every migration in order, printing one status line each.
pub async fn run_all_migrations(url: &str) {
    let db = connect(url).await;

    println!("Running migrations...");
    let schema_manager = SchemaManager::new(&db);

    for migration in <Migrator as MigratorTrait>::migrations() {
        let label = format!("Applying {}", migration.name().bold());
        report(&label, migration.up(&schema_manager)).await;
    }
}

/// Reverts every migration, newest first.
pub async fn rollback_all(url: &str) {
    let db = connect(url).await;

    println!("Rolling back migrations...");
    let schema_manager = SchemaManager::new(&db);

    for migration in <Migrator as MigratorTrait>::migrations().into_iter().rev() {
        let label = format!("Reverting {}", migration.name().bold());
        report(&label, migration.down(&schema_manager)).await;
    }
}

async fn report<F>(label: &str, step: F)
where
    F: std::future::Future<Output = Result<(), DbErr>>,
{
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{}{} ", label, dots);
    io::stdout().flush().ok();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(step).catch_unwind().await;

    match result {
        Ok(Ok(())) => {
            let time_str = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), time_str);
        }
        Ok(Err(err)) => {
            println!("{} {}", "failed".red(), err);
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}
