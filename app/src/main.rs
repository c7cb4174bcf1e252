//! `chirp`: command-line client for the Chirp micro-posting service.
//!
//! Each subcommand drives one page model against a freshly constructed
//! store. Configuration comes from the environment (and a `.env` file).

use anyhow::{bail, Context};
use chirp::pages::{
    tweets_status, ChangePasswordPage, CreateTweetPage, LoginPage, PageContext, SignUpPage, Submitted, ViewTweetsPage,
};
use chirp::router::{Route, Router};
use chirp::validation::{Field, FieldErrors};
use chirp::users::{self, UsersAction};
use chirp::{app, AppConfig};
use chirp_api::HttpChirpApi;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Chirp CLI client.
#[derive(Parser, Debug)]
#[command(name = "chirp", about = "Chirp micro-posting client", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account.
    Signup {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Password (at least 6 characters).
        #[arg(long)]
        password: String,
    },

    /// Sign in.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Password.
        #[arg(long)]
        password: String,
    },

    /// Change the current password.
    #[command(name = "change-password")]
    ChangePassword {
        /// Password currently in use.
        #[arg(long)]
        current: String,
        /// Replacement password (at least 6 characters).
        #[arg(long = "new")]
        new_password: String,
    },

    /// List tweets.
    Tweets,

    /// Post a tweet.
    Tweet {
        /// Tweet text.
        #[arg(long)]
        content: String,
        /// Comma-separated ids of users to share with.
        #[arg(long, default_value = "")]
        share: String,
    },

    /// Print the route table.
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = AppConfig::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| "chirp=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if matches!(cli.command, Commands::Routes) {
        print_routes();
        return Ok(());
    }

    let store = app::connect(&config).context("failed to build the API client")?;
    if let Some(path) = &config.users_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read users file {}", path.display()))?;
        let users = users::parse_directory(&json)
            .with_context(|| format!("failed to parse users file {}", path.display()))?;
        info!(count = users.len(), "Loaded user directory");
        store.send(UsersAction::Loaded(users).into()).await?;
    }
    info!(base_url = %config.api.base_url, "Chirp client ready");
    let ctx = PageContext::new(store.clone(), Router::default(), config.request_wait);

    let result = run(cli.command, &ctx).await;

    if let Err(error) = store.shutdown_default().await {
        tracing::warn!(%error, "Effects still running at exit");
    }
    result
}

async fn run(command: Commands, ctx: &PageContext<HttpChirpApi>) -> anyhow::Result<()> {
    match command {
        Commands::Signup { name, email, password } => {
            let mut page = SignUpPage::new();
            page.set_field(Field::Name, name);
            page.set_field(Field::Email, email);
            page.set_field(Field::Password, password);

            let outcome = page.submit(ctx).await?;
            report(&outcome, page.errors(), page.success_message())?;
            page.wait_for_redirect().await;
            println!("-> {}", ctx.router.current());
        },

        Commands::Login { email, password } => {
            let mut page = LoginPage::new();
            page.set_field(Field::Email, email);
            page.set_field(Field::Password, password);

            let outcome = page.submit(ctx).await?;
            report(&outcome, page.errors(), page.success_message())?;
            if let Some(user) = ctx.store.state(|s| s.auth.user.clone()).await {
                println!("Signed in as {}", user.email().unwrap_or("unknown user"));
            }
            page.wait_for_redirect().await;
            println!("-> {}", ctx.router.current());
        },

        Commands::ChangePassword { current, new_password } => {
            let mut page = ChangePasswordPage::new();
            page.set_field(Field::CurrentPassword, current);
            page.set_field(Field::NewPassword, new_password);

            let outcome = page.submit(ctx).await?;
            let status = ctx.store.state(ChangePasswordPage::status).await;
            for line in status.lines() {
                println!("{line}");
            }
            report(&outcome, page.errors(), page.success_message())?;
        },

        Commands::Tweets => {
            let mut page = ViewTweetsPage::new();
            let outcome = page.open(ctx).await?;
            let (tweets, status) = ctx
                .store
                .state(|s| (ViewTweetsPage::tweets(s).to_vec(), tweets_status(s)))
                .await;
            for line in status.lines() {
                println!("{line}");
            }
            for tweet in &tweets {
                println!("[{}] user {}: {}", tweet.id, tweet.user_id, tweet.content);
            }
            report(&outcome, &FieldErrors::new(), None)?;
        },

        Commands::Tweet { content, share } => {
            let mut page = CreateTweetPage::new();
            page.set_field(Field::Content, content);
            page.set_field(Field::Users, share);

            let targets = ctx.store.state(|s| page.share_targets(&s.users)).await;
            if !targets.is_empty() {
                println!("Sharing with {}", targets.join(", "));
            }

            let outcome = page.submit(ctx).await?;
            let status = ctx.store.state(CreateTweetPage::status).await;
            for line in status.lines() {
                println!("{line}");
            }
            report(&outcome, page.errors(), page.success_message())?;
        },

        Commands::Routes => print_routes(),
    }
    Ok(())
}

/// Print page feedback; fail when the submit did not succeed
fn report(outcome: &Submitted, errors: &FieldErrors, success: Option<&str>) -> anyhow::Result<()> {
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
    match outcome {
        Submitted::Succeeded => {
            if let Some(message) = success {
                println!("{message}");
            }
            Ok(())
        },
        Submitted::Invalid => bail!("invalid input"),
        Submitted::Failed(error) => bail!("request failed: {}", error.display_message()),
        Submitted::Superseded => bail!("request superseded by a newer one"),
    }
}

fn print_routes() {
    for route in Route::ALL {
        println!("{:<18} {}", route.path(), route.label());
    }
    println!("{:<18} {}", "/", Route::default().label());
}
