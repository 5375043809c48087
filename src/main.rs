use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tunedeck::{
    cli::{self, Context, PlayOptions, PlaySelection},
    config, error, logging,
    management::SessionStore,
    player::RepeatMode,
    types::{AlbumDraft, PlaylistDraft, ProfileUpdate, SongUpload, TrackPatch},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Register, sign in and out
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Update the signed-in user's profile
    Profile(ProfileOptions),

    /// Handle songs
    Songs(SongsOptions),

    /// Handle albums
    Albums(AlbumsOptions),

    /// Handle your playlists
    Playlists(PlaylistsOptions),

    /// Liked songs
    Likes(LikesOptions),

    /// Start an interactive player
    Play(PlayArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Create an account
    Register {
        #[clap(long)]
        username: String,
        #[clap(long)]
        email: String,
        /// Prompted for when omitted
        #[clap(long)]
        password: Option<String>,
    },
    /// Sign in and keep the session
    Login {
        #[clap(long)]
        email: String,
        /// Prompted for when omitted
        #[clap(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileOptions {
    #[clap(long)]
    pub username: Option<String>,
    #[clap(long)]
    pub email: Option<String>,
    #[clap(long)]
    pub password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle songs",
    args_conflicts_with_subcommands = true // disallow mixing list flags with subcommands
)]
pub struct SongsOptions {
    /// Filter by title, artist or album
    #[clap(long)]
    pub search: Option<String>,

    /// Hide songs without audio
    #[clap(long)]
    pub playable_only: bool,

    #[command(subcommand)]
    pub command: Option<SongsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SongsSubcommand {
    /// Upload an audio file
    Upload {
        file: PathBuf,
        #[clap(long)]
        cover: Option<PathBuf>,
        #[clap(long)]
        artist: Option<String>,
        #[clap(long)]
        album: Option<String>,
    },
    /// Edit a song's labels
    Update {
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        artist: Option<String>,
        #[clap(long)]
        album: Option<String>,
    },
    /// Delete a song
    Delete {
        id: String,
        /// Skip the confirmation
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle albums", args_conflicts_with_subcommands = true)]
pub struct AlbumsOptions {
    /// Filter by title or artist
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<AlbumsSubcommand>,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumFields {
    #[clap(long)]
    pub title: Option<String>,
    #[clap(long)]
    pub artist: Option<String>,
    #[clap(long)]
    pub cover_url: Option<String>,
    /// Song id; can be repeated
    #[clap(long = "song")]
    pub songs: Vec<String>,
}

impl From<AlbumFields> for AlbumDraft {
    fn from(fields: AlbumFields) -> Self {
        AlbumDraft {
            title: fields.title,
            artist: fields.artist,
            cover_url: fields.cover_url,
            songs: (!fields.songs.is_empty()).then_some(fields.songs),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlbumsSubcommand {
    /// Create an album
    Create(AlbumFields),
    /// Update an album
    Update {
        id: String,
        #[clap(flatten)]
        fields: AlbumFields,
    },
    /// Delete an album
    Delete {
        id: String,
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle your playlists")]
pub struct PlaylistsOptions {
    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistFields {
    #[clap(long)]
    pub name: Option<String>,
    #[clap(long)]
    pub description: Option<String>,
    /// Hide the playlist from other users
    #[clap(long)]
    pub private: bool,
    /// Song id; can be repeated
    #[clap(long = "song")]
    pub songs: Vec<String>,
}

impl PlaylistFields {
    fn into_draft(self, creating: bool) -> PlaylistDraft {
        PlaylistDraft {
            name: self.name,
            description: self.description,
            is_public: if self.private {
                Some(false)
            } else if creating {
                Some(true)
            } else {
                None
            },
            songs: (!self.songs.is_empty()).then_some(self.songs),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// List the songs of a playlist
    Show { id: String },
    /// Create a playlist
    Create(PlaylistFields),
    /// Update a playlist
    Update {
        id: String,
        #[clap(flatten)]
        fields: PlaylistFields,
    },
    /// Delete a playlist
    Delete {
        id: String,
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Liked songs")]
pub struct LikesOptions {
    #[command(subcommand)]
    pub command: Option<LikesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LikesSubcommand {
    /// Like or unlike a song
    Toggle { song_id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct PlayArgs {
    /// Play this song within the whole library
    #[clap(long, conflicts_with_all = ["playlist", "album", "liked"])]
    pub song: Option<String>,

    /// Play one of your playlists
    #[clap(long, conflicts_with_all = ["album", "liked"])]
    pub playlist: Option<String>,

    /// Play an album
    #[clap(long, conflicts_with = "liked")]
    pub album: Option<String>,

    /// Play your liked songs
    #[clap(long)]
    pub liked: bool,

    /// Queue position to start at (0-based)
    #[clap(long, default_value_t = 0)]
    pub start: usize,

    #[clap(long)]
    pub shuffle: bool,

    /// none, all or one
    #[clap(long, default_value = "none")]
    pub repeat: RepeatMode,

    /// Volume in percent
    #[clap(long)]
    pub volume: Option<f64>,
}

impl From<PlayArgs> for PlayOptions {
    fn from(args: PlayArgs) -> Self {
        let selection = if let Some(id) = args.song {
            PlaySelection::Song(id)
        } else if let Some(id) = args.playlist {
            PlaySelection::Playlist(id)
        } else if let Some(id) = args.album {
            PlaySelection::Album(id)
        } else if args.liked {
            PlaySelection::Liked
        } else {
            PlaySelection::Library
        };
        PlayOptions {
            selection,
            start: args.start,
            shuffle: args.shuffle,
            repeat: args.repeat,
            volume: args.volume,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = config::Settings::from_env();
    if let Err(e) = logging::init_logging(&settings.log_dir) {
        warning!("Logging disabled. Err: {}", e);
    }

    let session = Arc::new(SessionStore::load(settings.session_path.clone()).await);
    let ctx = match Context::new(settings, session) {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot create HTTP client. Err: {}", e),
    };

    match cli.command {
        Command::Auth(cmd) => match cmd {
            AuthCommand::Register {
                username,
                email,
                password,
            } => cli::register(&ctx, username, email, password).await,
            AuthCommand::Login { email, password } => cli::login(&ctx, email, password).await,
            AuthCommand::Logout => cli::logout(&ctx).await,
            AuthCommand::Whoami => cli::whoami(&ctx).await,
        },

        Command::Profile(opt) => {
            let update = ProfileUpdate {
                username: opt.username,
                email: opt.email,
                password: opt.password,
            };
            cli::profile(&ctx, update).await
        }

        Command::Songs(opt) => match opt.command {
            Some(SongsSubcommand::Upload {
                file,
                cover,
                artist,
                album,
            }) => {
                let upload = SongUpload {
                    audio_file: file,
                    cover_file: cover,
                    artist,
                    album,
                };
                cli::upload_song(&ctx, upload).await
            }
            Some(SongsSubcommand::Update {
                id,
                title,
                artist,
                album,
            }) => {
                let patch = TrackPatch {
                    title,
                    artist,
                    album,
                };
                cli::update_song(&ctx, id, patch).await
            }
            Some(SongsSubcommand::Delete { id, yes }) => cli::delete_song(&ctx, id, yes).await,
            None => cli::list_songs(&ctx, opt.search, opt.playable_only).await,
        },

        Command::Albums(opt) => match opt.command {
            Some(AlbumsSubcommand::Create(fields)) => cli::create_album(&ctx, fields.into()).await,
            Some(AlbumsSubcommand::Update { id, fields }) => {
                cli::update_album(&ctx, id, fields.into()).await
            }
            Some(AlbumsSubcommand::Delete { id, yes }) => cli::delete_album(&ctx, id, yes).await,
            None => cli::list_albums(&ctx, opt.search).await,
        },

        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::Show { id }) => cli::show_playlist(&ctx, id).await,
            Some(PlaylistsSubcommand::Create(fields)) => {
                cli::create_playlist(&ctx, fields.into_draft(true)).await
            }
            Some(PlaylistsSubcommand::Update { id, fields }) => {
                cli::update_playlist(&ctx, id, fields.into_draft(false)).await
            }
            Some(PlaylistsSubcommand::Delete { id, yes }) => {
                cli::delete_playlist(&ctx, id, yes).await
            }
            None => cli::list_playlists(&ctx).await,
        },

        Command::Likes(opt) => match opt.command {
            Some(LikesSubcommand::Toggle { song_id }) => cli::toggle_like(&ctx, song_id).await,
            None => cli::list_likes(&ctx).await,
        },

        Command::Play(args) => cli::play(&ctx, args.into()).await,

        Command::Completions(_) => {}
    }
}
