//! Promote an existing account to admin.
//!
//! Registration always creates customers, so the first admin (and any later
//! one) is minted from the command line:
//!
//! ```text
//! cargo run --bin make_admin -- admin@example.com
//! ```

use anyhow::{Context, Result};

use loandesk_server::config::Config;
use loandesk_server::db;

#[tokio::main]
async fn main() -> Result<()> {
    let Some(email) = std::env::args().nth(1) else {
        eprintln!("Usage: make_admin <email>");
        std::process::exit(2);
    };

    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = db::create_pool(&config).await?;

    let result = sqlx::query("UPDATE users SET role = 'admin', updated_at = NOW() WHERE email = $1")
        .bind(&email)
        .execute(&pool)
        .await
        .context("Failed to update user role")?;

    if result.rows_affected() == 0 {
        eprintln!("User {} not found", email);
        std::process::exit(1);
    }

    println!("User {} is now an admin", email);

    Ok(())
}
