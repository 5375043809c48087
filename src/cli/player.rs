use std::sync::Arc;

use colored::Colorize;
use tokio::{sync::mpsc, time::Instant};
use tracing::debug;

use super::Context;
use crate::{
    error, info,
    management::{AlbumLibrary, PlaylistLibrary, SongLibrary},
    player::{ClockOutput, Coordinator, PlaybackStatus, PlayerStatus, RepeatMode},
    utils, warning,
};

/// What the session starts with.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaySelection {
    /// Every song in the library
    Library,
    Song(String),
    Playlist(String),
    Album(String),
    Liked,
}

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub selection: PlaySelection,
    pub start: usize,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// Percent, 0 to 100
    pub volume: Option<f64>,
}

enum Flow {
    Continue,
    LikesChanged,
    Quit,
}

const HELP: &str = "\
  p          play / pause        n        next
  b          previous            s        stop
  seek T     jump to T (secs or m:ss)
  vol N      volume 0-100        m        mute / unmute
  sh         toggle shuffle      r        cycle repeat
  l          like / unlike       goto N   play queue entry N
  queue      show the queue      i        status
  h          this help           q        quit";

/// Runs the interactive player until the user quits, stdin closes, or the
/// session is signed out from another process.
pub async fn play(ctx: &Context, opts: PlayOptions) {
    let mut songs = SongLibrary::new();
    let pb = utils::spinner("Loading songs...");
    let result = songs.fetch(&ctx.gateway).await.map(|s| s.to_vec());
    pb.finish_and_clear();

    let catalog = match result {
        Ok(catalog) => catalog,
        Err(e) => {
            warning!("Failed to load songs. Err: {}", e.reason());
            return;
        }
    };

    let (output, mut events) = ClockOutput::new(ctx.settings.fallback_track_secs);
    let mut player = Coordinator::new(output);
    player.set_catalog(catalog.clone());
    player.set_likes(ctx.load_likes().await);
    player.set_shuffle(opts.shuffle);
    player.set_repeat_mode(opts.repeat);
    if let Some(volume) = opts.volume {
        player.set_volume(volume / 100.0);
    }

    match &opts.selection {
        PlaySelection::Library => player.play_playlist(catalog, opts.start),
        PlaySelection::Song(id) => match catalog.iter().find(|t| &t.id == id) {
            Some(track) => player.load_and_play(track, None),
            None => error!("Song {} not found", id),
        },
        PlaySelection::Playlist(id) => {
            ctx.require_session();
            let mut playlists = PlaylistLibrary::new();
            if let Err(e) = playlists.fetch(&ctx.gateway).await {
                warning!("Failed to load playlists. Err: {}", e.reason());
                return;
            }
            match playlists.get(id) {
                Some(playlist) => player.play_entries(&playlist.entries, opts.start),
                None => error!("Playlist {} not found", id),
            }
        }
        PlaySelection::Album(id) => {
            let mut albums = AlbumLibrary::new();
            if let Err(e) = albums.fetch(&ctx.gateway).await {
                warning!("Failed to load albums. Err: {}", e.reason());
                return;
            }
            match albums.get(id) {
                Some(album) => player.play_entries(&album.entries, opts.start),
                None => error!("Album {} not found", id),
            }
        }
        PlaySelection::Liked => {
            let liked = player.liked_tracks();
            player.play_playlist(liked, opts.start);
        }
    }

    if player.current_track().is_none() {
        info!("Nothing to play.");
        return;
    }

    println!("{}", HELP.dimmed());
    show_notice(&mut player);
    print_now_playing(&player.snapshot());

    let watcher = Arc::clone(&ctx.session).spawn_watcher(ctx.settings.session_poll);
    let mut session = ctx.session.subscribe();
    let signed_in = ctx.session.is_signed_in();

    let mut lines = spawn_input();
    let mut ticker = tokio::time::interval(ctx.settings.tick);
    let mut last_tick = Instant::now();
    let mut last = player.snapshot();

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(line) => match handle_command(&mut player, line.trim()) {
                    Flow::Continue => {}
                    Flow::LikesChanged => ctx.save_likes(player.likes()).await,
                    Flow::Quit => break,
                },
                None => break,
            },
            Some(event) = events.recv() => {
                player.handle_event(event);
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                player.output_mut().advance(now - last_tick);
                last_tick = now;
            }
            changed = session.changed() => {
                if changed.is_err() {
                    break;
                }
                let still_signed_in = session.borrow_and_update().is_some();
                if signed_in && !still_signed_in {
                    warning!("Signed out in another session. Stopping playback.");
                    break;
                }
            }
        }

        show_notice(&mut player);
        let now = player.snapshot();
        if now.index != last.index || now.track != last.track {
            print_now_playing(&now);
        } else if now.status == PlaybackStatus::Stopped && last.status == PlaybackStatus::Playing {
            info!("Stopped.");
        }
        last = now;
    }

    watcher.abort();
    player.stop();
    ctx.save_likes(player.likes()).await;
    debug!("player session ended");
}

/// Reads stdin on a plain thread. The channel closes at end of input.
///
/// A pending read on `tokio::io::stdin` cannot be cancelled and holds up
/// runtime shutdown until Enter is pressed, which a remote sign-out would hit.
fn spawn_input() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn handle_command(player: &mut Coordinator<ClockOutput>, line: &str) -> Flow {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Flow::Continue;
    };
    let argument = parts.next();

    match command {
        "p" | "play" | "pause" => player.toggle_play_pause(),
        "n" | "next" => player.next(),
        "b" | "prev" | "previous" => player.previous(),
        "s" | "stop" => player.stop(),
        "seek" => match argument.and_then(parse_position) {
            Some(seconds) => player.seek(seconds),
            None => warning!("Usage: seek <seconds|m:ss>"),
        },
        "vol" | "volume" => match argument.and_then(|a| a.parse::<f64>().ok()) {
            Some(percent) => {
                player.set_volume(percent / 100.0);
                info!("Volume {}%", (player.state().volume * 100.0).round());
            }
            None => warning!("Usage: vol <0-100>"),
        },
        "m" | "mute" => {
            player.toggle_mute();
            info!("{}", if player.state().muted { "Muted" } else { "Unmuted" });
        }
        "sh" | "shuffle" => {
            let on = player.toggle_shuffle();
            info!("Shuffle {}", if on { "on" } else { "off" });
        }
        "r" | "repeat" => info!("Repeat {}", player.cycle_repeat_mode()),
        "l" | "like" => {
            let Some(track) = player.current_track().cloned() else {
                return Flow::Continue;
            };
            let liked = player.toggle_like(&track);
            info!("{} {}", if liked { "Liked" } else { "Unliked" }, track.title);
            return Flow::LikesChanged;
        }
        "goto" => {
            let index = argument
                .and_then(|a| a.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1));
            let target = index.and_then(|i| player.queue().tracks().get(i).cloned());
            match target {
                Some(track) => {
                    let queue = player.queue().tracks().to_vec();
                    player.load_and_play(&track, Some(queue));
                }
                None => warning!("Usage: goto <1-{}>", player.queue().len()),
            }
        }
        "queue" => print_queue(player),
        "i" | "status" => print_status(&player.snapshot()),
        "h" | "help" | "?" => println!("{}", HELP),
        "q" | "quit" | "exit" => return Flow::Quit,
        other => warning!("Unknown command: {} (h for help)", other),
    }
    Flow::Continue
}

/// Accepts plain seconds or `m:ss`.
fn parse_position(input: &str) -> Option<f64> {
    match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: f64 = minutes.parse().ok()?;
            let seconds: f64 = seconds.parse().ok()?;
            Some(minutes * 60.0 + seconds)
        }
        None => input.parse().ok(),
    }
}

fn show_notice(player: &mut Coordinator<ClockOutput>) {
    if let Some(notice) = player.take_notice() {
        warning!("{}", notice);
    }
}

fn print_now_playing(status: &PlayerStatus) {
    let Some(track) = &status.track else {
        return;
    };
    info!(
        "Now playing {} - {} [{}/{}]",
        track.artist.bold(),
        track.title.bold(),
        status.index.map(|i| i + 1).unwrap_or(0),
        status.queue_len
    );
}

fn print_status(status: &PlayerStatus) {
    let Some(track) = &status.track else {
        info!("Nothing loaded.");
        return;
    };

    let symbol = match status.status {
        PlaybackStatus::Playing => "▶",
        PlaybackStatus::Paused => "❚❚",
        PlaybackStatus::Stopped => "■",
    };
    let volume = if status.muted {
        "muted".to_string()
    } else {
        format!("vol {}%", (status.volume * 100.0).round())
    };
    let mut flags = Vec::new();
    if status.shuffle {
        flags.push("shuffle".to_string());
    }
    if status.repeat != RepeatMode::None {
        flags.push(format!("repeat {}", status.repeat));
    }
    if status.liked {
        flags.push("♥".to_string());
    }

    info!(
        "{} {} - {}  {} / {}  {}  {}",
        symbol,
        track.artist,
        track.title,
        utils::format_time(status.position),
        utils::format_time(status.duration.unwrap_or(f64::NAN)),
        volume,
        flags.join("  ")
    );
}

fn print_queue(player: &Coordinator<ClockOutput>) {
    let current = player.current_index();
    for (i, track) in player.queue().tracks().iter().enumerate() {
        let marker = if Some(i) == current { ">" } else { " " };
        let line = format!("{} {:>3}. {} - {}", marker, i + 1, track.artist, track.title);
        if Some(i) == current {
            println!("{}", line.bold());
        } else if !track.is_playable() {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}
