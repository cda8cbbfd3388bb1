//! tell - main entry point
//!
//! Sends text, files and directories to a Telegram chat.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tell::{commands, Config, SendRequest};

#[derive(Parser, Debug)]
#[command(name = "tell")]
#[command(about = "Send messages, files and directories to Telegram", long_about = None)]
#[command(version)]
struct Cli {
    /// Save the provided Telegram bot token in the config file
    #[arg(short, long, conflicts_with_all = ["authorize_user", "file", "message"])]
    token: Option<String>,

    /// Authorize a new user to use the bot
    #[arg(short, long = "authorize-user", conflicts_with_all = ["file", "message"])]
    authorize_user: bool,

    /// Send the provided file or directory
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// The type of file to send. One of: animation, audio, document, photo, sticker,
    /// video, video_note, voice or upload. Detected automatically if omitted
    #[arg(long = "file-type", requires = "file")]
    file_type: Option<String>,

    /// Do not upload files to the upload host if they are too big
    #[arg(short = 'n', long = "no-upload", requires = "file")]
    no_upload: bool,

    /// Message text, or caption when sending a file. Read from stdin if empty
    message: Vec<String>,
}

#[derive(Debug)]
enum Action {
    SetToken(String),
    Authorize,
    Send(SendRequest),
}

impl Cli {
    fn action(self) -> Action {
        if let Some(token) = self.token {
            return Action::SetToken(token);
        }
        if self.authorize_user {
            return Action::Authorize;
        }
        Action::Send(SendRequest {
            // Lets tell be used like echo, without quoting the message
            text: self.message.join(" "),
            file: self.file,
            file_type: self.file_type,
            no_upload: self.no_upload,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Config::load_dotenv();

    // Logs go to stderr so piped output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tell=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = Config::default_path().context("Could not get default config path")?;
    let config = Config::load(&config_path)
        .context("Could not load config")?
        .or_else(Config::from_env);

    execute(cli.action(), &config_path, config).await
}

async fn execute(action: Action, config_path: &Path, config: Option<Config>) -> anyhow::Result<()> {
    match action {
        Action::SetToken(token) => {
            commands::set_token::run(config_path, &token).context("Could not save config")?;
        }
        Action::Authorize => {
            let config = commands::require_token(config)?;
            commands::authorize::run(config_path, &config)
                .await
                .context("Could not authorize user")?;
        }
        Action::Send(request) => {
            let config = commands::require_chat(config)?;
            commands::send_message::run(&config, request)
                .await
                .context("Could not send message")?;
        }
    }

    Ok(())
}
