use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use issuenav_cli::cli::{
    load_settings, request_messages, HashRouter, HttpController, ScopeRegistry, ScreenArgs,
    ScreenSummary, TextLayout,
};
use issuenav_core::{
    tracing_setup, Collaborators, Controller, ControllerError, Messages, Router, ScreenContext,
    StartupCoordinator,
};

#[derive(Parser)]
#[command(name = "issuenav")]
#[command(about = "Browse the issues of a project, module, directory or developer")]
struct Cli {
    #[command(flatten)]
    screen: ScreenArgs,

    /// Route to open, e.g. `severities=BLOCKER|resolved=false` or `id=12`
    #[arg(long, default_value = "")]
    route: String,

    /// Number of issue pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// Print the screen as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON settings file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Remember this resource as the default for the next run
    #[arg(long)]
    remember: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_setup::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (settings, storage) = load_settings(cli.config.as_deref())?;
    let settings = cli.screen.apply(settings);
    let screen_config = cli.screen.resolve(&settings)?;

    if cli.remember {
        if let Some(mut storage) = storage {
            storage.settings = settings.clone();
            storage
                .set_last_resource(screen_config.clone())
                .context("Failed to save settings")?;
        }
    }

    let client = reqwest::Client::new();
    let messages = Rc::new(RefCell::new(Messages::default()));
    let layout = TextLayout::default();
    let scopes = ScopeRegistry::default();

    let controller_client = client.clone();
    let controller_settings = settings.clone();
    let route = cli.route.clone();
    let collaborators = Collaborators {
        layout: Box::new(layout.clone()),
        keyboard: Box::new(scopes.clone()),
        controller: Box::new(move |screen: &ScreenContext| -> Box<dyn Controller> {
            Box::new(HttpController::new(
                controller_client,
                screen.clone(),
                &controller_settings,
            ))
        }),
        router: Box::new(move |screen: &ScreenContext| -> Box<dyn Router> {
            Box::new(HashRouter::new(screen.clone(), route))
        }),
    };

    let mut coordinator = StartupCoordinator::new(screen_config, collaborators)
        .with_initial_facets(settings.initial_facets())
        .with_page_size(settings.page_size);

    let gate = {
        let messages = messages.clone();
        let client = client.clone();
        let base_url = settings.server_url.clone();
        async move {
            let bundle = request_messages(&client, &base_url).await?;
            *messages.borrow_mut() = bundle;
            Ok::<(), ControllerError>(())
        }
    };
    coordinator
        .start(gate)
        .await
        .context("Issue screen failed to start")?;

    let controller = coordinator
        .controller()
        .context("No controller after startup")?;
    controller
        .fetch_list(true)
        .await
        .context("Failed to load issues")?;
    for _ in 1..cli.pages {
        controller
            .fetch_list(false)
            .await
            .context("Failed to load the next page of issues")?;
    }

    let screen = coordinator.screen().context("No screen after startup")?;
    let summary = ScreenSummary::collect(
        screen,
        &layout,
        &scopes,
        coordinator.phase(),
        &messages.borrow(),
    );

    if cli.json {
        let json = if cli.pretty {
            serde_json::to_string_pretty(&summary)?
        } else {
            serde_json::to_string(&summary)?
        };
        println!("{}", json);
    } else {
        print!("{}", summary.to_text());
    }
    Ok(())
}
