//! userbase-client CLI entry point.

use clap::Parser;
use userbase_client::cli::users::{build_patch, UsersAction};
use userbase_client::cli::{Cli, Commands, OutputFormat};
use userbase_client::client::UserbaseClient;
use userbase_client::output::format_output;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = UserbaseClient::new(&cli.base_url);

    match cli.command {
        Commands::Users(users_cmd) => match users_cmd.action {
            UsersAction::Get { id } => {
                let user = client.get_user(&id).await?;
                println!("{}", format_output(&user, cli.format));
            }
            UsersAction::Create { id, fields } => {
                let user = client
                    .create_user(&fields.into_user(id.unwrap_or_default()))
                    .await?;
                if !cli.quiet && matches!(cli.format, OutputFormat::Pretty) {
                    println!("Created:");
                }
                println!("{}", format_output(&user, cli.format));
            }
            UsersAction::Update { id, fields } => {
                let user = client.update_user(&fields.into_user(id)).await?;
                if !cli.quiet && matches!(cli.format, OutputFormat::Pretty) {
                    println!("Updated:");
                }
                println!("{}", format_output(&user, cli.format));
            }
            UsersAction::Patch {
                id,
                username,
                email,
                phone,
                date_of_birth,
                clear_date_of_birth,
            } => {
                let patch = build_patch(
                    id,
                    username,
                    email,
                    phone,
                    date_of_birth,
                    clear_date_of_birth,
                );
                let applied = client.patch_user(&patch).await?;
                println!("{}", format_output(&applied, cli.format));
            }
            UsersAction::Delete { id } => {
                let rows = client.delete_user(&id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{rows}"),
                    OutputFormat::Pretty => {
                        if !cli.quiet {
                            println!("Deleted user {}", id);
                        }
                    }
                }
            }
            UsersAction::Search { criteria } => {
                let result = client.search_users(&criteria.into_filter()).await?;
                println!("{}", format_output(&result, cli.format));
            }
        },
    }

    Ok(())
}
