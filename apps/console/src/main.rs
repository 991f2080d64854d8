use anyhow::Result;
use clap::Parser;
use client_core::{bootstrap, load_settings, ApiClient, AppContext, HeadlessPage, Router};
use shared::domain::TermId;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "evals-console",
    about = "Drive the course evaluations client state"
)]
struct Args {
    /// Overrides the configured API base url.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Term to select; the configured current term when omitted.
    #[arg(long)]
    term: Option<String>,
    /// Instructor name snippet to search for.
    #[arg(long)]
    search: Option<String>,
    /// Locations to navigate to, in order.
    #[arg(default_values_t = vec!["/home".to_string()])]
    navigate: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_base_url) = args.api_base_url {
        settings.api_base_url = api_base_url;
    }

    let client = ApiClient::new(&settings.api_base_url)?;
    let router = Router::course_evaluations(&settings);
    let mut ctx = AppContext::init(&settings, HeadlessPage::default());

    if let Err(err) = bootstrap(&mut ctx, &client).await {
        error!(error = %err, "failed to load configuration");
        ctx.notifications_mut()
            .snackbar_report_error("Unable to load configuration.");
    }

    let requested_term = args.term.map(TermId::new);
    match ctx.select_term(requested_term.as_ref()) {
        Ok(term) => println!("Selected term: {} ({})", term.name, term.id),
        Err(err) => ctx
            .notifications_mut()
            .snackbar_report_error(format!("Unable to select term: {err}.")),
    }

    for location in &args.navigate {
        match router.navigate(&mut ctx, location) {
            Ok(nav) => {
                ctx.loading_start(None);
                ctx.loading_complete(nav.route.title.as_deref(), None);
                ctx.flush_next_tick();
                let title = ctx.document_title();
                println!("{location} -> {} ({title})", nav.route.full_path);
            }
            Err(err) => ctx
                .notifications_mut()
                .snackbar_report_error(err.to_string()),
        }
    }

    if let Some(snippet) = args.search.as_deref() {
        match client.search_instructors(snippet, &[]).await {
            Some(instructors) => {
                for instructor in instructors {
                    println!(
                        "{} {} ({})",
                        instructor.first_name, instructor.last_name, instructor.uid
                    );
                }
            }
            None => ctx
                .notifications_mut()
                .snackbar_report_error("Instructor search failed."),
        }
    }

    let notifications = ctx.notifications();
    if notifications.is_snackbar_visible() {
        if let Some(text) = notifications.snackbar().text.as_deref() {
            println!("[{}] {text}", notifications.snackbar().color);
        }
    }
    println!(
        "Screen reader: {}",
        notifications.screen_reader_alert().message
    );

    Ok(())
}
