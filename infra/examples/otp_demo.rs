//! OTP flow demo
//!
//! Wires the service to the in-memory store and an SMS gateway, then
//! walks a send/verify round trip:
//!
//! ```bash
//! cargo run --example otp_demo                       # mock gateway
//! SMS_PROVIDER=2factor TWO_FACTOR_API_KEY=... \
//!     cargo run --example otp_demo                   # real delivery
//! ```

use std::sync::Arc;
use std::time::Duration;

use otp_core::services::otp::{OtpResponse, OtpService};
use otp_infra::config::SmsConfig;
use otp_infra::sms::{create_sms_gateway, MockSmsGateway};
use otp_infra::store::InMemoryOtpStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = SmsConfig::from_env()?;

    let store = Arc::new(InMemoryOtpStore::new());
    let _janitor = store.clone().start_janitor(Duration::from_secs(60));

    let raw_phone = "+91 98765 43210";

    if config.provider == "mock" {
        // Wire the mock concretely so the delivered code is observable,
        // the way a user would read it off their SMS.
        let gateway = Arc::new(MockSmsGateway::new());
        let service = OtpService::new(gateway.clone(), store.clone());

        let send = service.send_otp(raw_phone).await?;
        println!(
            "send: {}",
            serde_json::to_string(&OtpResponse::from_send(&send))?
        );

        let code = gateway.last_code(&send.phone).unwrap_or_default();
        let outcome = service.verify_otp(raw_phone, &code).await?;
        println!(
            "verify: {}",
            serde_json::to_string(&OtpResponse::from_outcome(&send.phone, &outcome))?
        );
    } else {
        let gateway = create_sms_gateway(&config)?;
        let service = OtpService::new(gateway, store.clone());

        let send = service.send_otp(raw_phone).await?;
        println!(
            "send: {}",
            serde_json::to_string(&OtpResponse::from_send(&send))?
        );

        println!("enter the code you received:");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;

        let outcome = service.verify_otp(raw_phone, line.trim()).await?;
        println!(
            "verify: {}",
            serde_json::to_string(&OtpResponse::from_outcome(&send.phone, &outcome))?
        );
    }

    Ok(())
}
