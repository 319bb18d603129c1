use chrono::Utc;
use dotenvy::dotenv;
use storefront::Storefront;
use storefront::config::get_configuration;
use storefront::flash_sale::SlotPhase;
use storefront_core::SessionEvent;
use storefront_core::observability::logging::init_tracing;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "storefront",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )?;

    let mut args = std::env::args().skip(1);
    let voucher_code = args.next().filter(|arg| arg != "--use-points");
    let use_points = std::env::args().any(|arg| arg == "--use-points");

    let storefront = Storefront::from_settings(&configuration)?;

    let mut events = storefront.session_store().subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SignedIn { subject }) => info!(user_id = %subject, "Signed in"),
                Ok(SessionEvent::Refreshed) => info!("Session refreshed"),
                Ok(SessionEvent::SignedOut) => info!("Signed out"),
                Ok(SessionEvent::Invalidated { reason }) => {
                    warn!("Session invalidated, sign in again: {}", reason)
                }
                Err(RecvError::Lagged(skipped)) => warn!("Missed {} session events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let credentials = configuration
        .credentials
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("No credentials configured; set APP_CREDENTIALS__EMAIL and APP_CREDENTIALS__PASSWORD"))?;

    let session = storefront
        .auth
        .login(&credentials.email, &credentials.password)
        .await?;
    info!(admin = session.is_admin(), "Session ready");

    let now = Utc::now();
    let preview = storefront
        .checkout
        .preview(voucher_code.as_deref(), use_points, now)
        .await?;
    println!("{}", serde_json::to_string_pretty(&preview)?);

    match storefront.flash_sales.current(now).await {
        Ok(Some(current)) => {
            let label = match current.slot.phase {
                SlotPhase::Active => "Flash sale ends in",
                SlotPhase::Upcoming => "Next flash sale starts in",
            };
            println!(
                "{} {} ({} items)",
                label,
                current.slot.countdown(now),
                current.sale.items.len()
            );
        }
        Ok(None) => info!("No flash sale slots configured"),
        Err(e) => warn!("Failed to load flash sale: {}", e),
    }

    storefront.auth.logout().await;

    Ok(())
}
