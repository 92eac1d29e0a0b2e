use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use portfolio_relay::utils::{logger, validation::Validate};
use portfolio_relay::{ContactRelay, ContactSubmission, EnvConfig, RelayResponse, SmtpMailer};

async fn function_handler(
    relay: &ContactRelay<SmtpMailer>,
    event: LambdaEvent<ContactSubmission>,
) -> Result<RelayResponse, Error> {
    tracing::info!("Contact relay invoked (request {})", event.context.request_id);

    // 寄送失敗也回傳 RelayResponse，不讓錯誤穿出處理邊界
    Ok(relay.relay(&event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次 SMTP 傳輸，之後的呼叫共用
    let settings = EnvConfig::from_env()?;
    settings.validate()?;
    let mailer = SmtpMailer::new(&settings.smtp)?;
    let relay = ContactRelay::new(mailer, &settings);

    run(service_fn(|event| function_handler(&relay, event))).await
}
