use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use shopfront::cli::create_admin;

#[derive(Parser)]
#[command(name = "shopfront-cli")]
#[command(about = "Shopfront CLI - Administrative tools for Shopfront", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Display name
        name: String,
        /// Email address used to log in
        email: String,
        /// Password (8-64 characters, no whitespace)
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let pool = shopfront_db::init_db_pool().await?;
    shopfront_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => {
            let id = create_admin(&pool, &name, &email, &password).await?;
            println!("✅ Admin created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", email);
        }
    }

    Ok(())
}
