//! Chime CLI
//!
//! Command-line front end for the reminder service:
//! - Log in, sign up, reset a password
//! - List, create and delete reminders
//! - Print a default config file

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chime::api::{HttpClient, ReminderDraft};
use chime::auth::{
    token_from_reset_link, AuthFlow, ForgotPasswordForm, LoginForm, ResetPasswordForm,
    SignupForm,
};
use chime::config::{generate_default_config, Config};
use chime::dashboard::{parse_remind_at, ReminderController, Toast};
use chime::error::ClientResult;
use chime::model::ReminderId;
use chime::notify::build_player;
use chime::ops::Operation;
use chime::session::SessionStore;
use chime::view;

#[derive(Parser)]
#[command(name = "chime")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reminders with a sound cue when they come due")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reminder service URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Mail a password reset link
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },

    /// Set a new password with the token from the reset link
    ResetPassword {
        #[command(flatten)]
        token: ResetToken,
        #[arg(short, long)]
        new_password: String,
    },

    /// Show who is logged in
    Whoami,

    /// List reminders
    List {
        #[arg(short, long, value_enum, default_value = "table")]
        format: ListFormat,
    },

    /// Create a reminder
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        /// When: "now", "+5m", "in 2h", "2025-06-01 09:30" or RFC 3339
        #[arg(short, long)]
        at: String,
    },

    /// Delete a reminder
    Delete {
        id: ReminderId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ResetToken {
    /// Raw reset token
    #[arg(long)]
    token: Option<String>,
    /// Full reset link from the email
    #[arg(long)]
    link: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

struct App {
    client: Arc<HttpClient>,
    session: SessionStore,
    config: Config,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let client = HttpClient::new(config.api.client_config())
            .context("Failed to build HTTP client")?;
        let session = SessionStore::in_dir(&config.session.data_dir);
        Ok(Self {
            client: Arc::new(client),
            session,
            config,
        })
    }

    fn auth(&self) -> AuthFlow {
        AuthFlow::new(self.client.clone(), self.session.clone())
    }

    fn dashboard(&self) -> ReminderController {
        ReminderController::new(
            self.client.clone(),
            self.session.clone(),
            build_player(&self.config.sound),
            self.config.notify.window(),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    chime::telemetry::init(&config.logging).context("Failed to initialize logging")?;

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, &content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let app = App::new(config)?;
    let ok = run(&app, cli.command).await?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the toast for an operation outcome; returns whether it succeeded
fn report<T>(op: Operation, result: &ClientResult<T>) -> bool {
    let toast = match result {
        Ok(_) => Toast::success(op.success_message().unwrap_or_default()),
        Err(e) => Toast::error(e.user_message()),
    };
    if let Some(line) = view::render_toast(&toast) {
        match result {
            Ok(_) => println!("{}", line),
            Err(_) => eprintln!("{}", line),
        }
    }
    result.is_ok()
}

async fn run(app: &App, command: Commands) -> Result<bool> {
    match command {
        Commands::Login { email, password } => {
            let result = app.auth().login(&LoginForm { email, password }).await;
            if let Ok(session) = &result {
                if let Some(name) = session.display_name() {
                    println!("Welcome, {}", name);
                }
            }
            Ok(report(Operation::Login, &result))
        }

        Commands::Signup {
            name,
            email,
            phone,
            password,
        } => {
            let form = SignupForm {
                name,
                email,
                phone,
                password,
            };
            let result = app.auth().signup(&form).await;
            let ok = report(Operation::Signup, &result);
            if ok {
                println!("Next: chime login --email {} --password ...", form.email.trim());
            }
            Ok(ok)
        }

        Commands::Logout => {
            app.auth().logout()?;
            println!("Logged out.");
            Ok(true)
        }

        Commands::ForgotPassword { email } => {
            let result = app
                .auth()
                .forgot_password(&ForgotPasswordForm { email })
                .await;
            Ok(report(Operation::ForgotPassword, &result))
        }

        Commands::ResetPassword {
            token,
            new_password,
        } => {
            let raw = token.token.or(token.link).unwrap_or_default();
            let Some(token) = token_from_reset_link(&raw) else {
                eprintln!("✕ Invalid reset link: no token found");
                return Ok(false);
            };
            let result = app
                .auth()
                .reset_password(&ResetPasswordForm {
                    token,
                    new_password,
                })
                .await;
            Ok(report(Operation::ResetPassword, &result))
        }

        Commands::Whoami => match app.auth().current_session()? {
            Some(session) => {
                println!("{}", session.display_name().unwrap_or("(unnamed user)"));
                Ok(true)
            }
            None => {
                eprintln!("Not logged in.");
                Ok(false)
            }
        },

        Commands::List { format } => {
            let dashboard = app.dashboard();
            if let Err(e) = dashboard.refresh().await {
                eprintln!("✕ {}", e.user_message());
                return Ok(false);
            }
            let state = dashboard.state();
            match format {
                ListFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&state.reminders)?)
                }
                ListFormat::Table => {
                    if let Some(name) = &state.user_name {
                        println!("Reminders for {}\n", name);
                    }
                    print!("{}", view::render_table(&state.reminders, Utc::now()));
                }
            }
            Ok(true)
        }

        Commands::Create {
            title,
            description,
            at,
        } => {
            let result = create(app, title, description, &at).await;
            Ok(report(Operation::CreateReminder, &result))
        }

        Commands::Delete { id, yes } => {
            if !yes && !confirm_on_terminal()? {
                println!("Cancelled.");
                return Ok(true);
            }
            let dashboard = app.dashboard();
            dashboard.request_delete(id);
            let result = dashboard.confirm_delete().await;
            Ok(report(Operation::DeleteReminder, &result))
        }

        Commands::Config { .. } => Ok(true),
    }
}

async fn create(app: &App, title: String, description: String, at: &str) -> ClientResult<()> {
    let remind_at = parse_remind_at(at, Utc::now())?;
    let draft = ReminderDraft::new(title, description, remind_at)
        .map_err(chime::error::ClientError::required)?;
    app.dashboard().create_reminder(&draft).await
}

fn confirm_on_terminal() -> Result<bool> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", view::render_dialog())?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(view::is_confirmation(&answer))
}
