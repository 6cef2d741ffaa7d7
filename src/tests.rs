#[cfg(test)]
mod integration_tests {
    use crate::cli::commands::register::RegisterOptions;
    use crate::cli::{Commands, Credentials, execute};
    use crate::test_utils::test_utils::{init_test_tracing, register_test_user, setup_test_backend};
    use common::LoginCredentials;
    use rust_decimal::Decimal;

    fn invest(reactor_id: i32, amount: i64) -> Commands {
        Commands::Invest {
            reactor_id,
            amount: Some(Decimal::from(amount)),
            percent: None,
        }
    }

    #[tokio::test]
    async fn test_register_command() {
        let _guard = init_test_tracing();
        let (_backend, client) = setup_test_backend().await;
        let credentials = Credentials {
            username: Some("carol".to_string()),
            password: Some("fission-ready".to_string()),
        };

        let output = execute(
            &client,
            &credentials,
            Commands::Register {
                email: "carol@example.com".to_string(),
                password_confirm: None,
                first_name: Some("Carol".to_string()),
                last_name: None,
            },
        )
        .await
        .unwrap();

        assert!(output.starts_with("Welcome to NuChain!"));
        assert!(output.contains("carol (Carol)"));
        assert!(output.contains("Balance: 25,000 $NUC"));
    }

    #[tokio::test]
    async fn test_register_with_mismatched_confirmation_sends_nothing() {
        let _guard = init_test_tracing();
        let (backend, client) = setup_test_backend().await;
        let credentials = Credentials {
            username: Some("carol".to_string()),
            password: Some("fission-ready".to_string()),
        };

        let result = crate::cli::commands::register::register(
            &client,
            &credentials,
            RegisterOptions {
                email: "carol@example.com".to_string(),
                password_confirm: Some("fusion-ready".to_string()),
                first_name: None,
                last_name: None,
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_commands_require_credentials() {
        let (_backend, client) = setup_test_backend().await;

        let err = execute(&client, &Credentials::default(), Commands::Reactors)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("username"));
    }

    #[tokio::test]
    async fn test_wrong_password_fails_login() {
        let (_backend, client) = setup_test_backend().await;
        register_test_user(&client, "alice").await;
        let credentials = Credentials {
            username: Some("alice".to_string()),
            password: Some("not-the-password".to_string()),
        };

        let err = execute(&client, &credentials, Commands::Login).await.unwrap_err();

        assert!(format!("{:#}", err).contains("No active account found"));
    }

    #[tokio::test]
    async fn test_reactors_command() {
        let _guard = init_test_tracing();
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let output = execute(&client, &credentials, Commands::Reactors).await.unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("NuWave"));
        assert!(lines[5].contains("Helios FusionDrive"));
        assert!(lines[5].contains("-1.50%"));
        assert!(lines[5].ends_with("95,000 $NUC"));
    }

    #[tokio::test]
    async fn test_reactor_command() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let output = execute(
            &client,
            &credentials,
            Commands::Reactor {
                reactor_id: 3,
                amount: Decimal::from(1000),
            },
        )
        .await
        .unwrap();

        assert!(output.starts_with("Nexus CORE (nexus_core)"));
        assert!(output.contains("Annual ROI:    3.80%"));
        assert!(output.contains("Projections for 1,000 $NUC:"));
        // 1000 * 1.4 * 10
        assert!(output.contains("14.00k tonnes CO₂"));
    }

    #[tokio::test]
    async fn test_unknown_reactor() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let err = execute(
            &client,
            &credentials,
            Commands::Reactor {
                reactor_id: 99,
                amount: Decimal::from(1000),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(format!("{:#}", err), "Failed to fetch reactor 99: Reactor 99 not found");
    }

    #[tokio::test]
    async fn test_quote_does_not_submit() {
        let (backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let output = execute(
            &client,
            &credentials,
            Commands::Quote {
                reactor_id: 1,
                amount: Decimal::from(30_000),
            },
        )
        .await
        .unwrap();

        assert!(output.starts_with("Investing 30,000 $NUC in NuWave"));
        assert!(output.ends_with("Status: not allowed: Insufficient balance"));
        assert_eq!(backend.investment_submissions(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_amounts_are_refused() {
        let (backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;
        let requests = backend.request_count();

        let err = execute(
            &client,
            &credentials,
            Commands::Quote {
                reactor_id: 1,
                amount: Decimal::MAX,
            },
        )
        .await
        .unwrap_err();
        assert!(format!("{:#}", err).ends_with("Amount is too large to project"));

        let err = execute(
            &client,
            &credentials,
            Commands::Reactor {
                reactor_id: 1,
                amount: Decimal::MIN,
            },
        )
        .await
        .unwrap_err();
        assert!(format!("{:#}", err).ends_with("Amount is too large to project"));

        assert_eq!(backend.request_count(), requests);
    }

    #[tokio::test]
    async fn test_invest_command() {
        let _guard = init_test_tracing();
        let (backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let output = execute(&client, &credentials, invest(1, 1000)).await.unwrap();

        assert!(output.starts_with("Successfully invested 1,000.00 $NUC in NuWave"));
        assert!(output.contains("Remaining balance: 24,000 $NUC"));
        assert!(output.ends_with("Portfolio: 1,000 $NUC across 1 investment"));
        assert_eq!(backend.balance_of("alice"), Some(Decimal::from(24_000)));
    }

    #[tokio::test]
    async fn test_invest_quick_pick_is_capped_by_funding() {
        let (backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;
        // Helios FusionDrive needs 95,000; leave 1,000 open
        backend.set_current_funding(5, Decimal::from(94_000));

        let output = execute(
            &client,
            &credentials,
            Commands::Invest {
                reactor_id: 5,
                amount: None,
                percent: Some(100),
            },
        )
        .await
        .unwrap();

        assert!(output.contains("Remaining balance: 24,000 $NUC"));

        let reactor = execute(
            &client,
            &credentials,
            Commands::Reactor {
                reactor_id: 5,
                amount: Decimal::from(1000),
            },
        )
        .await
        .unwrap();
        assert!(reactor.contains("This reactor is fully funded."));
    }

    #[tokio::test]
    async fn test_invalid_investment_is_rejected_locally() {
        let (backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let err = execute(&client, &credentials, invest(1, 30_000)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Insufficient balance"));

        let err = execute(&client, &credentials, invest(1, 0)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Investment amount must be greater than zero"));

        assert_eq!(backend.investment_submissions(), 0);
        assert_eq!(backend.balance_of("alice"), Some(Decimal::from(25_000)));
    }

    #[tokio::test]
    async fn test_portfolio_command() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let empty = execute(&client, &credentials, Commands::Portfolio { years: 1 })
            .await
            .unwrap();
        assert_eq!(empty, "Balance:        25,000 $NUC\nNo investments yet.");

        execute(&client, &credentials, invest(1, 1000)).await.unwrap();
        execute(&client, &credentials, invest(2, 2000)).await.unwrap();

        let output = execute(&client, &credentials, Commands::Portfolio { years: 10 })
            .await
            .unwrap();

        assert!(output.starts_with("Balance:        22,000 $NUC"));
        assert!(output.contains("Total invested: 3,000 $NUC in 2 investments"));
        assert!(output.contains("After 10 years:"));
        // 1000 * 0.045 * 10 + 2000 * 0.068 * 10
        assert!(output.contains("Total return:  4,810 $NUC"));
        assert!(output.contains("Gain:          1,810 $NUC (+60.33%)"));
        assert!(output.contains("Carbon offset: 31.50k tonnes CO₂"));
    }

    #[tokio::test]
    async fn test_investments_command() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let empty = execute(&client, &credentials, Commands::Investments).await.unwrap();
        assert_eq!(empty, "No investments yet.");

        execute(&client, &credentials, invest(4, 750)).await.unwrap();
        let output = execute(&client, &credentials, Commands::Investments).await.unwrap();

        let row = output.lines().nth(1).unwrap();
        assert!(row.contains("Fermi-III"));
        assert!(row.ends_with("750 $NUC"));
    }

    #[tokio::test]
    async fn test_reset_wallet_command() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;
        execute(&client, &credentials, invest(2, 5000)).await.unwrap();

        let output = execute(&client, &credentials, Commands::ResetWallet).await.unwrap();

        assert!(output.starts_with("Wallet reset successfully!"));
        assert!(output.ends_with("Balance: 25,000 $NUC"));
        let investments = execute(&client, &credentials, Commands::Investments).await.unwrap();
        assert_eq!(investments, "No investments yet.");
    }

    #[tokio::test]
    async fn test_profile_commands() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let err = execute(
            &client,
            &credentials,
            Commands::UpdateProfile {
                first_name: None,
                last_name: None,
                email: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("Nothing to update"));

        let updated = execute(
            &client,
            &credentials,
            Commands::UpdateProfile {
                first_name: Some("Alice".to_string()),
                last_name: Some("Liddell".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
        assert!(updated.contains("alice (Alice Liddell)"));

        let profile = execute(&client, &credentials, Commands::Profile).await.unwrap();
        assert!(profile.starts_with("alice (Alice Liddell)"));
        assert!(profile.contains("Email:   alice@example.com"));
    }

    #[tokio::test]
    async fn test_change_password_command() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let output = execute(
            &client,
            &credentials,
            Commands::ChangePassword {
                new_password: "breeder-blanket".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(output, "Password changed successfully");

        assert!(execute(&client, &credentials, Commands::Login).await.is_err());
        let updated = Credentials {
            username: Some("alice".to_string()),
            password: Some("breeder-blanket".to_string()),
        };
        assert!(execute(&client, &updated, Commands::Login).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_account_command() {
        let (_backend, client) = setup_test_backend().await;
        let credentials = register_test_user(&client, "alice").await;

        let refused = execute(&client, &credentials, Commands::DeleteAccount { yes: false }).await;
        assert!(refused.is_err());

        let output = execute(&client, &credentials, Commands::DeleteAccount { yes: true })
            .await
            .unwrap();
        assert_eq!(output, "Account deleted successfully");

        let login = LoginCredentials {
            username: "alice".to_string(),
            password: credentials.password.clone().unwrap(),
        };
        assert!(client.login(&login).await.unwrap_err().is_unauthorized());
    }
}
