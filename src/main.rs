use clap::Parser;
use portfolio_relay::config::cli::{Command, SendArgs, SettingsArgs};
use portfolio_relay::utils::error::{ErrorSeverity, RelayError};
use portfolio_relay::utils::{logger, validation::Validate};
use portfolio_relay::{
    build_router, CliConfig, ContactClient, ContactForm, ContactRelay, RelaySettings, SmtpMailer,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting portfolio-relay CLI");
    if config.verbose {
        tracing::debug!("CLI command: {:?}", config.command);
    }

    let result = match config.command {
        Command::Serve(args) => run_serve(&args).await,
        Command::Check(args) => run_check(&args).await,
        Command::Send(args) => run_send(args).await,
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ portfolio-relay failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 輸入錯誤
            ErrorSeverity::Medium => 2,   // 寄送或網路錯誤
            ErrorSeverity::High => 1,     // 設定錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }
}

fn load_validated(args: &SettingsArgs) -> Result<RelaySettings, RelayError> {
    let settings = args.load_settings()?;
    settings.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(settings)
}

async fn run_serve(args: &SettingsArgs) -> Result<(), RelayError> {
    let settings = load_validated(args)?;

    let mailer = SmtpMailer::new(&settings.smtp)?;
    let relay = Arc::new(ContactRelay::new(mailer, &settings));
    tracing::info!(
        "📬 Relaying contact messages to {} (timeout {:?})",
        relay.inbox(),
        relay.timeout()
    );

    let router = build_router(relay, settings.static_dir.as_deref());
    portfolio_relay::server::serve(router, settings.bind).await
}

async fn run_check(args: &SettingsArgs) -> Result<(), RelayError> {
    let settings = load_validated(args)?;
    tracing::info!("🔍 Checking SMTP connection, no server will be started");

    let mailer = SmtpMailer::new(&settings.smtp)?;
    let connected =
        match tokio::time::timeout(settings.smtp.timeout, mailer.test_connection()).await {
            Ok(result) => result?,
            Err(_) => return Err(RelayError::DeliveryTimeout(settings.smtp.timeout)),
        };

    if connected {
        println!(
            "✅ SMTP server {}:{} reachable",
            settings.smtp.host, settings.smtp.port
        );
        Ok(())
    } else {
        Err(RelayError::DeliveryError {
            message: format!(
                "SMTP server {}:{} did not accept the connection",
                settings.smtp.host, settings.smtp.port
            ),
        })
    }
}

async fn run_send(args: SendArgs) -> Result<(), RelayError> {
    let client = ContactClient::new(args.endpoint)?;
    tracing::info!("✉️ Sending contact message to: {}", client.endpoint());
    let mut form = ContactForm::from_fields([
        args.name.as_str(),
        args.email.as_str(),
        args.subject.as_str(),
        args.message.as_str(),
    ]);

    let outcome = client.submit(&mut form).await?;
    println!("{}", outcome.notification());

    if outcome.should_reset_form() {
        Ok(())
    } else {
        Err(RelayError::DeliveryError {
            message: format!("{:?}", outcome),
        })
    }
}
