//! Terminal front-end for the tracker.
//!
//! Reads one command per line from stdin and prints the roster after every
//! change. Set `REALM_TRACKER_CONFIG` to a JSON file to override the
//! roster defaults, and `RUST_LOG` to adjust logging.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};

use realm_tracker::capture::UnavailableCamera;
use realm_tracker::logging::{setup_logging, DEFAULT_FILTER};
use realm_tracker::{CameraState, Intent, PlayerId, RosterConfig, Tracker};

const CONFIG_ENV: &str = "REALM_TRACKER_CONFIG";

const HELP: &str = "\
commands:
  add                   summon a new player
  rm <id>               remove a player
  name <id> [text...]   rename (empty resets to the default label)
  hp <id> <delta>       heal (+) or damage (-); shields absorb damage first
  sh <id> <delta>       raise or lower shields
  photo <id> <path>     set a portrait from an image file
  nophoto <id>          clear the portrait
  cam <id>              open the camera for a player
  snap <id>             capture from the open camera
  close <id>            close the camera
  undo | redo           step through history
  list                  show the roster
  help                  show this text
  quit                  exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Intent(Intent),
    Upload(PlayerId, PathBuf),
    List,
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>) -> anyhow::Result<PlayerId> {
    let raw = arg.ok_or_else(|| anyhow!("missing player id"))?;
    let id = raw
        .trim_start_matches('#')
        .parse::<u32>()
        .with_context(|| format!("invalid player id '{raw}'"))?;
    Ok(PlayerId::new(id))
}

fn parse_delta(arg: Option<&str>) -> anyhow::Result<i64> {
    let raw = arg.ok_or_else(|| anyhow!("missing amount"))?;
    raw.trim_start_matches('+')
        .parse::<i64>()
        .with_context(|| format!("invalid amount '{raw}'"))
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let command = match word {
        "add" => Command::Intent(Intent::Add),
        "rm" => Command::Intent(Intent::Remove(parse_id(args.next())?)),
        "name" => {
            let id = parse_id(args.next())?;
            let name = rest.split_once(char::is_whitespace).map_or("", |(_, n)| n.trim());
            // Rename goes through the card's editor like an inline edit would
            Command::Intent(Intent::EditName(id, name.to_string()))
        }
        "hp" => {
            let id = parse_id(args.next())?;
            Command::Intent(Intent::AdjustHealth(id, parse_delta(args.next())?))
        }
        "sh" => {
            let id = parse_id(args.next())?;
            Command::Intent(Intent::AdjustShields(id, parse_delta(args.next())?))
        }
        "photo" => {
            let id = parse_id(args.next())?;
            let path = rest.split_once(char::is_whitespace).map(|(_, p)| p.trim());
            match path {
                Some(path) if !path.is_empty() => Command::Upload(id, PathBuf::from(path)),
                _ => bail!("missing image path"),
            }
        }
        "nophoto" => Command::Intent(Intent::ClearPhoto(parse_id(args.next())?)),
        "cam" => Command::Intent(Intent::OpenCamera(parse_id(args.next())?)),
        "snap" => Command::Intent(Intent::Capture(parse_id(args.next())?)),
        "close" => Command::Intent(Intent::CloseCamera(parse_id(args.next())?)),
        "undo" => Command::Intent(Intent::Undo),
        "redo" => Command::Intent(Intent::Redo),
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => bail!("empty command"),
        other => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(command)
}

fn print_roster(tracker: &Tracker, now: Instant) {
    let cards = tracker.cards(now);
    if cards.is_empty() {
        println!("The realm awaits its champions...");
        return;
    }
    for card in cards {
        let player = card.player;
        let mut line = format!(
            "{:>4}  {:<20} health {:>4} [{}]  shields {:>3}",
            player.id.to_string(),
            player.name,
            player.health,
            card.tier,
            player.shields,
        );
        if let Some(photo) = &player.photo {
            line.push_str(&format!("  portrait: {photo}"));
        }
        if let Some(flash) = card.flash {
            line.push_str(&format!("  {}", flash.label()));
        }
        match card.camera {
            CameraState::Closed => {}
            CameraState::Live { .. } => line.push_str("  camera: live"),
            CameraState::Failed { message } => line.push_str(&format!("  camera: {message}")),
        }
        println!("{line}");
    }
}

/// `rm` is refused while the card's camera is live or showing an error.
fn remove_blocked(tracker: &Tracker, id: PlayerId) -> bool {
    tracker.card(id).is_some_and(|card| !card.can_remove())
}

fn unchanged_upload_message(tracker: &Tracker, id: PlayerId) -> String {
    if tracker.roster().contains(id) {
        format!("portrait of {id} unchanged")
    } else {
        format!("no player {id}")
    }
}

async fn run(mut tracker: Tracker) -> anyhow::Result<Tracker> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_roster(&tracker, Instant::now());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let now = Instant::now();
                tracker.tick(now);

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::List) => print_roster(&tracker, now),
                    Ok(Command::Upload(id, path)) => {
                        match tracker.upload_photo(id, &path, now).await {
                            Ok(true) => print_roster(&tracker, now),
                            Ok(false) => println!("{}", unchanged_upload_message(&tracker, id)),
                            Err(e) => println!("error: {e}"),
                        }
                    }
                    Ok(Command::Intent(Intent::EditName(id, name))) => {
                        tracker.handle(Intent::BeginRename(id), now);
                        tracker.handle(Intent::EditName(id, name), now);
                        if tracker.handle(Intent::CommitRename(id), now) {
                            print_roster(&tracker, now);
                        }
                    }
                    Ok(Command::Intent(Intent::Remove(id)))
                        if remove_blocked(&tracker, id) =>
                    {
                        println!("close the camera for {id} first");
                    }
                    Ok(Command::Intent(intent)) => {
                        let show = matches!(
                            intent,
                            Intent::OpenCamera(_) | Intent::CloseCamera(_)
                        );
                        if tracker.handle(intent, now) || show {
                            print_roster(&tracker, now);
                        }
                    }
                    Err(e) => println!("error: {e:#}"),
                }
            }
            Some(event) = tracker.next_capture_event() => {
                let now = Instant::now();
                tracker.on_capture_event(event, now);
                print_roster(&tracker, now);
            }
        }
    }

    Ok(tracker)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging(DEFAULT_FILTER);

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => RosterConfig::load(&path)
            .with_context(|| format!("loading {CONFIG_ENV}={}", PathBuf::from(&path).display()))?,
        None => RosterConfig::default(),
    };
    tracing::info!(?config, "starting realm tracker");

    let camera = Arc::new(UnavailableCamera::new("no camera backend in the terminal"));
    let tracker = Tracker::new(config, camera);

    let tracker = run(tracker).await?;
    tracker.shutdown().await;
    Ok(())
}
