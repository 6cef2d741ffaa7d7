use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use common::LoginCredentials;
use rust_decimal::Decimal;
use tracing::{debug, error};

pub mod commands;

use crate::config::AppConfig;
use commands::{account, portfolio, reactors, register};

#[derive(Parser)]
#[command(name = "nuchain")]
#[command(about = "NuChain command-line client: browse reactors, invest $NUC and track your portfolio")]
#[command(version)]
pub struct Cli {
    /// Backend base URL, including the `/api` prefix
    ///
    /// Overrides `api_base_url` from nuchain.toml and NUCHAIN_API_BASE_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: Commands,
}

/// Account credentials, shared by every command that needs a session.
#[derive(Args, Clone, Default)]
pub struct Credentials {
    #[arg(short, long, global = true, env = "NUCHAIN_USERNAME")]
    pub username: Option<String>,

    #[arg(short, long, global = true, env = "NUCHAIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn to_login(&self) -> Result<LoginCredentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(LoginCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            (None, _) => bail!("A username is required (--username or NUCHAIN_USERNAME)"),
            (_, None) => bail!("A password is required (--password or NUCHAIN_PASSWORD)"),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account; new wallets start with 25,000 $NUC
    Register {
        #[arg(long)]
        email: String,

        /// Defaults to --password
        #[arg(long)]
        password_confirm: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },
    /// Check the credentials and show the account
    Login,
    /// List the reactor catalog
    Reactors,
    /// Show one reactor with projected returns for an amount
    Reactor {
        reactor_id: i32,

        /// Amount used for the projection table
        #[arg(long, default_value = "1000")]
        amount: Decimal,
    },
    /// Preview an investment without submitting it
    ///
    /// Shows the projected return and carbon offset per horizon and whether
    /// the amount would pass the balance and funding checks.
    Quote { reactor_id: i32, amount: Decimal },
    /// Invest in a reactor
    ///
    /// Give either an amount or --percent (25, 50, 75 or 100) of the smaller
    /// of your balance and the reactor's remaining funding.
    Invest {
        reactor_id: i32,

        #[arg(required_unless_present = "percent", conflicts_with = "percent")]
        amount: Option<Decimal>,

        #[arg(long, value_parser = parse_quick_pick)]
        percent: Option<u32>,
    },
    /// List your investments
    Investments,
    /// Show the portfolio summary and allocation
    Portfolio {
        /// Horizon to highlight: 1, 2, 5 or 10 years
        #[arg(long, default_value_t = 1)]
        years: u32,
    },
    /// Show your profile, balance and wallet
    Profile,
    /// Change name or email
    UpdateProfile {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
    /// Change the password used with --password
    ChangePassword {
        #[arg(long)]
        new_password: String,
    },
    /// Restore 25,000 $NUC and remove all investments
    ResetWallet,
    /// Permanently delete the account
    DeleteAccount {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

fn parse_quick_pick(value: &str) -> std::result::Result<u32, String> {
    let percent: u32 = value.parse().map_err(|_| format!("'{}' is not a number", value))?;
    if compute::QUICK_PICK_PERCENTAGES.contains(&percent) {
        Ok(percent)
    } else {
        Err(format!(
            "percent must be one of {:?}",
            compute::QUICK_PICK_PERCENTAGES
        ))
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = AppConfig::load()?.with_api_url(self.api_url);
        debug!("Using backend at {}", config.api_base_url);
        let client = config.build_client()?;

        let output = execute(&client, &self.credentials, self.command).await.map_err(|e| {
            error!("Command failed: {:#}", e);
            e
        })?;
        println!("{}", output);
        Ok(())
    }
}

/// Runs one command and returns the text to print.
pub async fn execute(client: &client::ApiClient, credentials: &Credentials, command: Commands) -> Result<String> {
    match command {
        Commands::Register {
            email,
            password_confirm,
            first_name,
            last_name,
        } => {
            register::register(
                client,
                credentials,
                register::RegisterOptions {
                    email,
                    password_confirm,
                    first_name,
                    last_name,
                },
            )
            .await
        }
        Commands::Login => account::login(client, &credentials.to_login()?).await,
        Commands::Reactors => reactors::list_reactors(client, &credentials.to_login()?).await,
        Commands::Reactor { reactor_id, amount } => {
            reactors::show_reactor(client, &credentials.to_login()?, reactor_id, amount).await
        }
        Commands::Quote { reactor_id, amount } => {
            reactors::quote(client, &credentials.to_login()?, reactor_id, amount).await
        }
        Commands::Invest {
            reactor_id,
            amount,
            percent,
        } => {
            let amount = match (amount, percent) {
                (Some(amount), _) => portfolio::InvestAmount::Exact(amount),
                (None, Some(percent)) => portfolio::InvestAmount::QuickPick(percent),
                (None, None) => bail!("Give an amount or --percent"),
            };
            portfolio::invest(client, &credentials.to_login()?, reactor_id, amount).await
        }
        Commands::Investments => portfolio::list_investments(client, &credentials.to_login()?).await,
        Commands::Portfolio { years } => portfolio::portfolio(client, &credentials.to_login()?, years).await,
        Commands::Profile => account::profile(client, &credentials.to_login()?).await,
        Commands::UpdateProfile {
            first_name,
            last_name,
            email,
        } => {
            let request = common::UpdateProfileRequest {
                first_name,
                last_name,
                email,
            };
            account::update_profile(client, &credentials.to_login()?, request).await
        }
        Commands::ChangePassword { new_password } => {
            account::change_password(client, &credentials.to_login()?, new_password).await
        }
        Commands::ResetWallet => account::reset_wallet(client, &credentials.to_login()?).await,
        Commands::DeleteAccount { yes } => {
            if !yes {
                bail!("Refusing to delete the account without --yes");
            }
            account::delete_account(client, &credentials.to_login()?).await
        }
    }
}
