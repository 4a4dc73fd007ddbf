#[macro_use]
extern crate log;

use migration::MigratorTrait;
use sea_orm::prelude::*;

use page_analyzer::checker;
use page_analyzer::registry;

const USAGE: &str = "usage: page-analyzer <add <url> | list | show <id> | check <id>>";

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (command, argument) = match args.get(1) {
        Some(c) => (c.as_str(), args.get(2).map(String::as_str)),
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let db_url = std::env::var("DB_URL").expect("Environment variable DB_URL not set");
    let db: DatabaseConnection = sea_orm::Database::connect(db_url)
        .await
        .expect("Unable to connect to database");
    migration::Migrator::up(&db, None)
        .await
        .expect("Unable to apply migrations");

    let code = match (command, argument) {
        ("add", Some(raw)) => add(&db, raw).await,
        ("list", None) => list(&db).await,
        ("show", Some(id)) => show(&db, id).await,
        ("check", Some(id)) => check(&db, id).await,
        _ => {
            eprintln!("{}", USAGE);
            2
        }
    };
    std::process::exit(code);
}

async fn add(db: &DatabaseConnection, raw: &str) -> i32 {
    let name = match registry::normalize(raw) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match registry::find_or_create(db, &name).await {
        Ok((row, created)) => {
            if created {
                info!("Page added");
            } else {
                info!("Page already exists");
            }
            println!(
                "{}",
                serde_json::json!({
                    "id": row.id,
                    "name": row.name,
                    "created": created,
                })
            );
            0
        }
        Err(e) => {
            error!("Unable to store URL: {}", e);
            1
        }
    }
}

async fn list(db: &DatabaseConnection) -> i32 {
    match registry::list(db).await {
        Ok(entries) => {
            println!("{}", serde_json::to_string_pretty(&entries).unwrap());
            0
        }
        Err(e) => {
            error!("Unable to list URLs: {}", e);
            1
        }
    }
}

async fn show(db: &DatabaseConnection, id: &str) -> i32 {
    let id: i64 = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid id: {}", id);
            return 2;
        }
    };

    let row = match registry::get(db, id).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            eprintln!("Page not found");
            return 1;
        }
        Err(e) => {
            error!("Unable to load URL: {}", e);
            return 1;
        }
    };
    let checks = match registry::checks(db, id).await {
        Ok(c) => c,
        Err(e) => {
            error!("Unable to load checks: {}", e);
            return 1;
        }
    };

    let checks: Vec<serde_json::Value> = checks
        .iter()
        .map(|c| {
            serde_json::json!({
                "id": c.id,
                "status_code": c.status_code,
                "h1": c.h1,
                "title": c.title,
                "description": c.description,
                "created_at": c.created_at.to_string(),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "id": row.id,
            "name": row.name,
            "created_at": row.created_at.to_string(),
            "checks": checks,
        }))
        .unwrap()
    );
    0
}

async fn check(db: &DatabaseConnection, id: &str) -> i32 {
    let id: i64 = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid id: {}", id);
            return 2;
        }
    };

    let client = checker::http_client().expect("Unable to set up HTTP client");
    match checker::run(db, &client, id).await {
        Ok(outcome @ checker::CheckOutcome::Checked { .. }) => {
            info!("Page checked");
            println!("{}", serde_json::to_string(&outcome).unwrap());
            0
        }
        Ok(checker::CheckOutcome::ConnectionFailed) => {
            eprintln!("Could not connect to the page, no check recorded");
            1
        }
        Err(checker::CheckError::NotFound) => {
            eprintln!("Page not found");
            1
        }
        Err(checker::CheckError::Db(e)) => {
            error!("Unable to record check: {}", e);
            1
        }
    }
}
