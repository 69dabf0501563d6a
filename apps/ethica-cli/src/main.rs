use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use runtime::{AppConfig, AppConfigProvider, CliArgs};
use std::path::PathBuf;
use std::sync::Arc;

use ethica_client::config::AuthMode;
use ethica_client::domain::editor::ProfileField;
use ethica_client::domain::image::ImageUpload;
use ethica_client::domain::notice::{Notice, NoticeLevel};
use ethica_client::domain::pages::{
    CommunitiesPage, FeedPage, ForumsPage, MessagesPage, ProfileExtras, VideoCallsPage,
};
use ethica_client::domain::privacy::{PrivacySetting, PrivacySettings, SECTIONS};
use ethica_client::domain::profile_page::ProfileLoad;
use ethica_client::domain::router::View;
use ethica_client::domain::service::{AppController, ControllerConfig};
use ethica_client::domain::shell::NAVIGATION;
use ethica_client::domain::signup::{SignupOutcome, SignupStep, PRIVACY_PROMISES};
use ethica_client::EthicaClient;

// Adapter to make AppConfigProvider implement modkit::ConfigProvider
struct ModkitConfigAdapter(Arc<AppConfigProvider>);

impl modkit::ConfigProvider for ModkitConfigAdapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get_module_config(module_name)
    }
}

/// Ethica - privacy-first social network client
#[derive(Parser)]
#[command(name = "ethica")]
#[command(about = "Ethica - privacy-first social network client")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config)
    #[arg(long)]
    api_url: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration
    Check,
    /// Walk the signup wizard with the given credentials
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Agree to the Terms of Service and Privacy Policy
        #[arg(long)]
        agree_terms: bool,
    },
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show or edit the stored user's profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Print the privacy dashboard, optionally flipping settings first
    Privacy {
        /// Setting key to flip, e.g. data-collection (repeatable)
        #[arg(long = "toggle", value_name = "SETTING")]
        toggles: Vec<PrivacySetting>,
    },
    /// Print a content page as JSON
    Browse {
        page: BrowsePage,
        /// Keep loading until every item is fetched
        #[arg(long)]
        all: bool,
    },
    /// Drive the views from landing through signup into the app and back out
    Walkthrough,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Load and print the profile
    Show,
    /// Load the profile, apply edits and save
    Edit {
        /// Set a field, e.g. --set fullName="Ada Lovelace" (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(ProfileField, String)>,
        /// Skill to add (repeatable)
        #[arg(long)]
        add_skill: Vec<String>,
        /// Skill to remove (repeatable)
        #[arg(long)]
        remove_skill: Vec<String>,
        /// Picture to upload
        #[arg(long, conflicts_with = "remove_image")]
        image: Option<PathBuf>,
        /// Clear the profile picture
        #[arg(long)]
        remove_image: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BrowsePage {
    Feed,
    Communities,
    Forums,
    Messages,
    Videocalls,
    ProfileExtras,
}

fn parse_assignment(s: &str) -> Result<(ProfileField, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    Ok((field.parse()?, value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        module: EthicaClient::NAME.to_string(),
        api_url: cli.api_url.clone(),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (api url / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("Ethica client starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let home_dir = config.home_dir();
    let provider = ModkitConfigAdapter(Arc::new(AppConfigProvider::new(config.clone())));
    let client = EthicaClient::init(&provider, &home_dir)?;

    // Execute command
    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => check_config(&config, &client),
        Commands::Signup {
            email,
            username,
            password,
            agree_terms,
        } => signup(&client, &email, &username, &password, agree_terms).await,
        Commands::Login { email, password } => login(&client, &email, &password).await,
        Commands::Logout => logout(&client),
        Commands::Profile { command } => match command {
            ProfileCommand::Show => show_profile(&client).await,
            ProfileCommand::Edit {
                fields,
                add_skill,
                remove_skill,
                image,
                remove_image,
            } => {
                let edits = ProfileEdits {
                    fields,
                    add_skill,
                    remove_skill,
                    image,
                    remove_image,
                };
                edit_profile(&client, edits).await
            }
        },
        Commands::Privacy { toggles } => {
            print_privacy(&toggles);
            Ok(())
        }
        Commands::Browse { page, all } => browse(&client, page, all).await,
        Commands::Walkthrough => walkthrough(&client).await,
    }
}

fn check_config(config: &AppConfig, client: &EthicaClient) -> Result<()> {
    tracing::info!("Checking configuration...");

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!(
        "API: {} ({:?} auth)",
        client.config().api_base_url,
        client.config().auth_mode
    );
    println!("{}", config.to_yaml()?);

    Ok(())
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}

async fn signup(
    client: &EthicaClient,
    email: &str,
    username: &str,
    password: &str,
    agree_terms: bool,
) -> Result<()> {
    let mut app = client.controller();
    app.navigate(View::Signup);

    println!("{}", SignupStep::Promises.title());
    for promise in PRIVACY_PROMISES {
        println!("  - {promise}");
    }

    loop {
        let wizard = app
            .signup_wizard()
            .ok_or_else(|| anyhow!("signup wizard is not open"))?;
        wizard.email = email.to_string();
        wizard.username = username.to_string();
        wizard.password = password.to_string();
        wizard.agreed_to_terms = agree_terms;
        let step = wizard.step();

        match app.submit_signup().await? {
            SignupOutcome::Advanced(next) => {
                println!("Step {} of {}: {}", next.number(), SignupStep::total(), next.title());
            }
            SignupOutcome::Completed(submission) => {
                println!("Welcome, {} <{}>", submission.username, submission.email);
                break;
            }
            SignupOutcome::Blocked if step == SignupStep::Terms => {
                bail!("pass --agree-terms to accept the Terms of Service and Privacy Policy")
            }
            SignupOutcome::Blocked => bail!("email, username and password are required"),
        }
    }

    if client.config().auth_mode == AuthMode::Mock {
        println!("Mock auth mode: no account was created on the server");
    }
    Ok(())
}

async fn login(client: &EthicaClient, email: &str, password: &str) -> Result<()> {
    let mut app = client.controller();
    app.navigate(View::Login);

    let form = app
        .login_form()
        .ok_or_else(|| anyhow!("login form is not open"))?;
    form.email = email.to_string();
    form.password = password.to_string();

    if !app.submit_login().await? {
        bail!("email and password are required");
    }
    match client.config().auth_mode {
        AuthMode::Remote => println!("Logged in; session stored"),
        AuthMode::Mock => println!("Logged in (mock auth mode: no session stored)"),
    }
    Ok(())
}

fn logout(client: &EthicaClient) -> Result<()> {
    client.session().clear()?;
    println!("Logged out");
    Ok(())
}

async fn show_profile(client: &EthicaClient) -> Result<()> {
    let mut page = client.profile_page();
    page.load().await;
    print_notices(&page.take_notices());

    let profile = match page.state() {
        ProfileLoad::Loaded(profile) => profile,
        ProfileLoad::Failed { message } => bail!("{}", message),
        ProfileLoad::Loading => bail!("profile did not load"),
    };

    println!("[{}] {}", profile.initials(), profile.full_name);
    if !profile.post.is_empty() {
        println!("{}", profile.post);
    }
    println!("Born: {}", profile.birth_date_label());
    if !profile.skills.is_empty() {
        println!("Skills: {}", profile.skills.join(", "));
    }
    println!("{}", serde_json::to_string_pretty(profile)?);
    Ok(())
}

struct ProfileEdits {
    fields: Vec<(ProfileField, String)>,
    add_skill: Vec<String>,
    remove_skill: Vec<String>,
    image: Option<PathBuf>,
    remove_image: bool,
}

async fn edit_profile(client: &EthicaClient, edits: ProfileEdits) -> Result<()> {
    let mut page = client.profile_page();
    page.load().await;
    if let ProfileLoad::Failed { message } = page.state() {
        bail!("{}", message);
    }
    page.open_editor()?;

    let editor = page.editor_mut();
    for (field, value) in &edits.fields {
        editor.set_field(*field, value)?;
    }
    for skill in &edits.add_skill {
        editor.set_new_skill(skill)?;
        editor.add_skill()?;
    }
    for skill in &edits.remove_skill {
        editor.remove_skill(skill)?;
    }
    if let Some(path) = &edits.image {
        let upload = ImageUpload::from_path(path)?;
        editor.select_image(&upload)?;
    }
    if edits.remove_image {
        editor.remove_image()?;
    }

    let saved = page.save().await?;
    print_notices(&page.take_notices());
    if !saved {
        bail!(
            "{}",
            page.editor().error().unwrap_or("profile was not saved")
        );
    }
    Ok(())
}

fn print_privacy(toggles: &[PrivacySetting]) {
    let mut settings = PrivacySettings::default();
    for setting in toggles {
        settings.toggle(*setting);
    }

    for section in SECTIONS {
        println!("{}: {}", section.title, section.description);
        for setting in section.settings {
            let state = if settings.get(*setting) { "on " } else { "off" };
            let marker = if setting.recommended() {
                " (recommended)"
            } else {
                ""
            };
            println!("  [{state}] {}{marker}  --toggle {}", setting.label(), setting.key());
        }
    }

    let rating = settings.rating();
    println!();
    println!("Privacy score: {}% ({})", settings.percentage(), rating.label());
    println!("{}", rating.message());
}

async fn browse(client: &EthicaClient, page: BrowsePage, all: bool) -> Result<()> {
    let sources = client.content();
    let value = match page {
        BrowsePage::Feed => {
            let mut feed = FeedPage::new(sources);
            feed.load().await?;
            while all && feed.posts.has_more() {
                feed.load_more().await?;
            }
            feed.hide_loading_message();
            serde_json::json!({ "posts": feed.posts.items() })
        }
        BrowsePage::Communities => {
            let mut communities = CommunitiesPage::new(sources);
            communities.load().await?;
            while all && communities.communities.has_more() {
                communities.communities.load_more().await?;
            }
            let joined: Vec<_> = communities.joined().map(|c| c.id).collect();
            serde_json::json!({
                "communities": communities.communities.items(),
                "joined": joined,
            })
        }
        BrowsePage::Forums => {
            let mut forums = ForumsPage::new(sources);
            forums.load().await?;
            while all && forums.threads.has_more() {
                forums.threads.load_more().await?;
            }
            serde_json::json!({
                "categories": forums.categories.items(),
                "threads": forums.threads.items(),
            })
        }
        BrowsePage::Messages => {
            let mut messages = MessagesPage::new(sources);
            messages.load().await?;
            while all && messages.messages.has_more() {
                messages.messages.load_more().await?;
            }
            serde_json::json!({
                "conversations": messages.conversations.items(),
                "selected": messages.selected_conversation(),
                "messages": messages.messages.items(),
            })
        }
        BrowsePage::Videocalls => {
            let mut calls = VideoCallsPage::new(sources);
            calls.load().await?;
            let missed = calls.missed().count();
            serde_json::json!({
                "upcoming": calls.upcoming.items(),
                "recent": calls.recent.items(),
                "missed": missed,
            })
        }
        BrowsePage::ProfileExtras => {
            let mut extras = ProfileExtras::new(sources);
            extras.load().await?;
            serde_json::json!({
                "stats": extras.stats.items(),
                "achievements": extras.achievements.items(),
                "activity": extras.activity.items(),
            })
        }
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn walkthrough(client: &EthicaClient) -> Result<()> {
    // Always mock auth: the walkthrough never touches the backend.
    let mut app = AppController::new(
        client.auth().clone(),
        client.profile().clone(),
        client.content().clone(),
        ControllerConfig {
            auth_mode: AuthMode::Mock,
            max_image_bytes: client.config().max_image_bytes,
        },
    );
    println!("view: {}", app.view());

    app.navigate(View::Signup);
    println!("view: {}", app.view());
    let wizard = app
        .signup_wizard()
        .ok_or_else(|| anyhow!("signup wizard is not open"))?;
    wizard.email = "demo@ethica.local".to_string();
    wizard.username = "demo".to_string();
    wizard.password = "demo".to_string();
    wizard.agreed_to_terms = true;

    loop {
        match app.submit_signup().await? {
            SignupOutcome::Advanced(step) => println!("  step {}: {}", step.number(), step.title()),
            SignupOutcome::Completed(_) => break,
            SignupOutcome::Blocked => bail!("walkthrough signup was blocked"),
        }
    }
    println!("view: {}", app.view());

    let shell = app.shell().ok_or_else(|| anyhow!("app shell is not open"))?;
    for section in NAVIGATION {
        shell.navigate(section);
        println!("  section: {}", section.label());
    }

    app.logout();
    println!("view: {}", app.view());
    Ok(())
}
