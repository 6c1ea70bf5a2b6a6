//! Demo CLI — command-line stand-in for the demo page.
//!
//! Requests a signed embed URL from a running omni-embed server for a
//! chosen user and content selection, then prints either the bare URL or
//! the full sandboxed iframe snippet.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use anyhow::bail;
use clap::{Parser, ValueEnum};

use omni_embed_client::{EmbedApi, EmbedFrame, FrameState};
use omni_embed_core::{ContentType, EmbedUser, RawSelection, Theme};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Dashboard,
    Workbook,
    Navigation,
    ContentDiscovery,
}

impl From<KindArg> for ContentType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Dashboard => Self::Dashboard,
            KindArg::Workbook => Self::Workbook,
            KindArg::Navigation => Self::Navigation,
            KindArg::ContentDiscovery => Self::ContentDiscovery,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dawn,
    Vibes,
    Breeze,
    Blank,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Dawn => Self::Dawn,
            ThemeArg::Vibes => Self::Vibes,
            ThemeArg::Breeze => Self::Breeze,
            ThemeArg::Blank => Self::Blank,
        }
    }
}

/// Fetch a signed Omni embed URL from the demo server.
#[derive(Parser)]
#[command(name = "omni-embed-demo", version, about)]
struct Cli {
    /// Base URL of the omni-embed server.
    #[arg(long, env = "OMNI_EMBED_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Content kind to embed.
    #[arg(long, value_enum, default_value_t = KindArg::Dashboard)]
    content_type: KindArg,

    /// Content ID (required for dashboard, workbook, and navigation).
    #[arg(long)]
    content_id: Option<String>,

    /// Content-discovery path (defaults to "root" server-side).
    #[arg(long)]
    path: Option<String>,

    /// External user identifier.
    #[arg(long)]
    external_id: String,

    /// Display name (defaults to the external ID server-side).
    #[arg(long)]
    name: Option<String>,

    /// User email.
    #[arg(long)]
    email: Option<String>,

    /// Theme to apply.
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Print only the signed URL instead of the iframe snippet.
    #[arg(long)]
    url_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RawSelection {
        content_type: Some(cli.content_type.into()),
        content_id: cli.content_id.clone(),
        path: cli.path.clone(),
        theme: cli.theme.map(Theme::from),
        ..RawSelection::default()
    };
    let user = EmbedUser {
        external_id: Some(cli.external_id.clone()),
        name: cli.name.clone(),
        email: cli.email.clone(),
        ..EmbedUser::default()
    };

    let api = EmbedApi::new(&cli.server)?;
    let mut frame = EmbedFrame::new(config, user);
    frame.mount(&api).await;

    match frame.state() {
        FrameState::Ready { url } => {
            if cli.url_only {
                println!("{url}");
            } else {
                println!("{}", frame.render());
            }
            Ok(())
        }
        FrameState::Error { message } => {
            bail!("failed to load analytics: {message}");
        }
        FrameState::Loading => {
            // mount() always settles; reaching this would be a bug.
            bail!("embed request did not settle");
        }
    }
}
