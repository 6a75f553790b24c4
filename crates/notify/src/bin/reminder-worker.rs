//! reminder-worker — periodic schedule evaluation and reminder dispatch.
//!
//! On each tick, loads every active form with scheduling enabled, locates
//! the submission window containing "now", and sends the applicable
//! reminder email (period open / closing soon / not yet filled).

use std::collections::HashMap;

use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use forms_core::config::{load_dotenv, Config};
use forms_notify::ches::ChesNotifier;
use forms_notify::composer::{build_reminder_template, template_context, EmailProperties};
use forms_notify::email::EmailNotifier;
use forms_notify::templating::{TemplateRenderer, DEFAULT_BODY_TEMPLATE};
use forms_notify::traits::Notifier;
use forms_notify::{Dispatcher, Notification};
use forms_notify::reminder::select_reminder;
use forms_storage::{init_pg_pool, FormStore};

// ── CLI ─────────────────────────────────────────────────────────────

/// Hosted-forms reminder worker — dispatches submission-period emails.
#[derive(Parser, Debug)]
#[command(name = "reminder-worker", version, about)]
struct Cli {
    /// Tick interval in seconds.
    #[arg(long, env = "REMINDER_INTERVAL_SECS", default_value_t = 3600)]
    interval: u64,

    /// Run a single tick and exit.
    #[arg(long, default_value_t = false)]
    once: bool,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    let Some(pool) = init_pg_pool(&config.postgres).await else {
        anyhow::bail!("PostgreSQL is not configured; reminder worker cannot run");
    };
    let store = FormStore::new(pool);

    let dispatcher = build_dispatcher(&config)?;
    let renderer = TemplateRenderer::new();

    info!(interval = cli.interval, "reminder-worker starting");

    loop {
        if let Err(e) = run_tick(&store, &dispatcher, &renderer, &config).await {
            warn!(error = %e, "reminder tick failed");
        }
        if cli.once {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_secs(cli.interval)).await;
    }

    info!("reminder-worker exited cleanly");
    Ok(())
}

/// Prefer the hosted relay when configured, SMTP otherwise.
fn build_dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let channel: Box<dyn Notifier> = if config.ches.is_configured() {
        Box::new(ChesNotifier::from_config(&config.ches, &config.smtp.from)?)
    } else {
        Box::new(EmailNotifier::from_config(
            &config.smtp.host,
            config.smtp.port,
            config.smtp.tls,
            &config.smtp.from,
        )?)
    };
    Ok(Dispatcher::with_defaults(vec![channel]))
}

async fn run_tick(
    store: &FormStore,
    dispatcher: &Dispatcher,
    renderer: &TemplateRenderer,
    config: &Config,
) -> anyhow::Result<()> {
    let forms = store.list_reminder_forms().await?;
    let now = Utc::now();
    info!(forms = forms.len(), "evaluating reminder-eligible forms");

    for (form, schedule) in &forms {
        let report = match select_reminder(schedule, now) {
            Ok(Some(report)) => report,
            Ok(None) => continue,
            Err(e) => {
                warn!(form_id = %form.id, error = %e, "skipping form with invalid schedule");
                continue;
            }
        };

        if form.submission_received_emails.is_empty() {
            warn!(form_id = %form.id, "no reminder recipients configured");
            continue;
        }

        // One bad form must not starve the rest of the tick.
        if let Err(e) = send_reminder(form, &report, dispatcher, renderer, config).await {
            warn!(form_id = %form.id, error = %e, "reminder dispatch failed");
        }
    }

    Ok(())
}

async fn send_reminder(
    form: &forms_core::Form,
    report: &forms_notify::reminder::ReminderReport,
    dispatcher: &Dispatcher,
    renderer: &TemplateRenderer,
    config: &Config,
) -> anyhow::Result<()> {
    let props = EmailProperties::default();
    let template =
        build_reminder_template(form, report, form.submission_received_emails.clone())?;
    let ctx = template_context(
        form,
        &template,
        &config.app.base_url,
        None,
        &props,
        Some(report.close_date_text.clone()),
    );

    let notification = Notification {
        subject: renderer.render(&template.subject, &ctx)?,
        body: renderer.render(DEFAULT_BODY_TEMPLATE, &ctx)?,
        to: template.to.clone(),
        priority: template.priority,
        metadata: HashMap::from([
            ("emailType".to_string(), template.email_type.to_string()),
            ("formId".to_string(), form.id.to_string()),
        ]),
    };

    let results = dispatcher.dispatch(template.email_type, &notification).await;
    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        warn!(
            form_id = %form.id,
            email_type = %template.email_type,
            failed,
            "some reminder deliveries failed"
        );
    }

    Ok(())
}
