//! OpenAlex Search - Entry Point
//!
//! Search works, show work details and look up topic suggestions from the
//! command line. Rendered output goes to stdout, logs to stderr.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use openalex_search::config::Config;
use openalex_search::export::{Artifact, ArtifactSink, DirectorySink};
use openalex_search::models::{DocumentType, Work};
use openalex_search::suggest::{SuggestionUpdate, TopicSuggester};
use openalex_search::view::{SearchForm, render_results, render_work_detail};
use openalex_search::{App, OpenAlexClient};

#[derive(Parser, Debug)]
#[command(name = "openalex-search")]
#[command(about = "Search the OpenAlex catalog of academic works")]
#[command(version)]
struct Cli {
    /// Catalog API base URL (for mirrors and mock servers)
    #[arg(long, env = "OPENALEX_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Contact address sent as the mailto courtesy parameter
    #[arg(long, env = "OPENALEX_MAILTO", global = true)]
    mailto: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search works and print one page of results
    Search(SearchArgs),
    /// Show the details of one work
    Work(WorkArgs),
    /// Look up topic suggestions (interactive when no prefix is given)
    Topics(TopicsArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Free-text query
    query: Vec<String>,

    /// Earliest publication date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Latest publication date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Document type (article, preprint, conference, proceedings, book, other)
    #[arg(long = "type")]
    types: Vec<DocumentType>,

    /// Topic (concept) identifier
    #[arg(long = "topic")]
    topics: Vec<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    page: u32,

    /// Page size (defaults to the configured page size)
    #[arg(long)]
    per_page: Option<u32>,

    /// Save the page as CSV
    #[arg(long)]
    csv: bool,

    /// Save an XML export of every work on the page
    #[arg(long)]
    xml: bool,

    /// Save a summary document of every work on the page
    #[arg(long)]
    summary: bool,

    /// Directory exports are saved into
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct WorkArgs {
    /// Work identifier (W123 or https://openalex.org/W123)
    id: String,

    /// Save an XML export
    #[arg(long)]
    xml: bool,

    /// Save a summary document
    #[arg(long)]
    summary: bool,

    /// Download the open access file, if one is hosted
    #[arg(long)]
    open_access: bool,

    /// Directory exports are saved into
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TopicsArgs {
    /// Topic prefix; omit to read topic input lines from stdin
    prefix: Option<String>,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(mailto) = &cli.mailto {
        config.mailto.clone_from(mailto);
    }

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = load_config(&cli)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        "Starting OpenAlex search client"
    );

    let client = Arc::new(OpenAlexClient::new(config.clone())?);

    match cli.command {
        Command::Search(args) => run_search(client, &config, args).await,
        Command::Work(args) => run_work(&client, args).await,
        Command::Topics(args) => run_topics(client, &config, args).await,
    }
}

async fn run_search(
    client: Arc<OpenAlexClient>,
    config: &Config,
    args: SearchArgs,
) -> anyhow::Result<()> {
    let mut form = SearchForm::new();
    form.set_query(args.query.join(" "));
    form.set_from_date(args.from);
    form.set_to_date(args.to);
    for doc_type in args.types {
        if !form.selected_types().contains(&doc_type) {
            form.toggle_document_type(doc_type);
        }
    }
    for topic in args.topics {
        form.add_topic(topic);
    }

    let app = App::with_per_page(client, args.per_page.unwrap_or(config.per_page));
    app.search(form.submit(), args.page).await;
    let state = app.snapshot().await;

    if let Some(error) = &state.error {
        println!("{error}");
        return Ok(());
    }

    print!("{}", render_results(&state.works, &state.pagination()));

    let sink = DirectorySink::new(args.out);

    if args.csv && !state.works.is_empty() {
        let today = chrono::Local::now().date_naive();
        save(&sink, &Artifact::csv(&state.works, today))?;
    }

    for work in &state.works {
        if args.xml {
            save(&sink, &Artifact::xml(work))?;
        }
        if args.summary {
            save(&sink, &Artifact::summary(work))?;
        }
    }

    Ok(())
}

async fn run_work(client: &OpenAlexClient, args: WorkArgs) -> anyhow::Result<()> {
    let work = match client.get_work(&args.id).await {
        Ok(work) => work,
        Err(e) => {
            tracing::error!(id = %args.id, error = %e, "Work lookup failed");
            println!("Error: {}. Please try again.", e.to_user_message());
            return Ok(());
        }
    };

    println!("{}\n", work.display_name_or_default());
    print!("{}", render_work_detail(&work));

    let sink = DirectorySink::new(args.out);

    if args.xml {
        save(&sink, &Artifact::xml(&work))?;
    }

    if args.summary {
        save(&sink, &Artifact::summary(&work))?;
    }

    if args.open_access {
        save_open_access(client, &sink, &work).await?;
    }

    Ok(())
}

async fn save_open_access(
    client: &OpenAlexClient,
    sink: &DirectorySink,
    work: &Work,
) -> anyhow::Result<()> {
    let Some(url) = work.oa_url() else {
        println!("No open access file is hosted for {}", work.key());
        return Ok(());
    };

    match client.fetch_open_access_file(url).await {
        Ok(bytes) => save(sink, &Artifact::open_access(work, bytes)),
        Err(e) => {
            tracing::error!(%url, error = %e, "Open access download failed");
            println!("Error: {}. Please try again.", e.to_user_message());
            Ok(())
        }
    }
}

fn save(sink: &DirectorySink, artifact: &Artifact) -> anyhow::Result<()> {
    let path = sink.save(artifact)?;
    println!("Saved {}", path.display());
    Ok(())
}

async fn run_topics(
    client: Arc<OpenAlexClient>,
    config: &Config,
    args: TopicsArgs,
) -> anyhow::Result<()> {
    if let Some(prefix) = args.prefix {
        for topic in client.search_topics(&prefix).await {
            println!("{}\t{}", topic.id, topic.display_name);
        }
        return Ok(());
    }

    let (mut suggester, mut updates) = TopicSuggester::new(client, config.suggestion_debounce);
    let mut form = SearchForm::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut delivered = None;

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    form.set_topic_input(line);
                    suggester.input_changed(form.topic_input());
                }
                None => break,
            },
            Some(update) = updates.recv() => {
                delivered = Some(update.generation);
                apply_suggestions(&mut form, &suggester, update);
            }
        }
    }

    // Drain the lookup for the final input before exiting.
    let grace = config.suggestion_debounce + config.request_timeout + Duration::from_millis(100);
    while delivered != Some(suggester.latest_generation()) {
        match tokio::time::timeout(grace, updates.recv()).await {
            Ok(Some(update)) => {
                delivered = Some(update.generation);
                apply_suggestions(&mut form, &suggester, update);
            }
            _ => break,
        }
    }

    Ok(())
}

fn apply_suggestions(
    form: &mut SearchForm,
    suggester: &TopicSuggester<OpenAlexClient>,
    update: SuggestionUpdate,
) {
    // Updates for inputs the form has moved past are skipped.
    if update.generation != suggester.latest_generation() {
        return;
    }

    form.set_suggestions(update.suggestions);

    let Some(input) = form.topic_lookup() else {
        println!("(enter at least 2 characters)");
        return;
    };

    if form.suggestions().is_empty() {
        println!("{input}: no suggestions");
        return;
    }

    println!("{input}:");
    for topic in form.suggestions() {
        println!("  {}\t{}", topic.id, topic.display_name);
    }
}
