use clap::{Parser, Subcommand};
use family_gallery::catalog::Catalog;
use family_gallery::config::{self, GalleryConfig};
use family_gallery::lightbox::Key;
use family_gallery::session::{LoginOutcome, Session, SessionError};
use family_gallery::store::{AuthStore, FileStore};
use family_gallery::{drive, generate, output};
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "family-gallery")]
#[command(about = "Password-gated family photo and video gallery")]
#[command(long_about = "\
Password-gated family photo and video gallery

Albums live in a catalog file. Media is hosted on Google Drive and linked by
its share URL; links are resolved to embeddable preview (video) or thumbnail
(photo) URLs at render time.

Catalog structure:

  [[albums]]
  id = \"navidad-2023\"             # Directory name in the built site
  title = \"Navidad 2023\"
  date = \"Diciembre 2023\"
  cover_image = \"https://drive.google.com/file/d/COVER/view\"

  [[albums.media]]
  id = \"brindis\"
  kind = \"video\"                  # photo | video
  source_url = \"https://drive.google.com/file/d/XYZ/view\"
  caption = \"El brindis\"          # Optional
  thumbnail_url = \"...\"           # Optional, videos only

Run 'family-gallery gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Catalog file (.toml or .json)
    #[arg(long, default_value = "catalog.toml", global = true)]
    catalog: PathBuf,

    /// Directory holding config.toml [default: the catalog's directory]
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// File that persists the login flag between browse sessions
    #[arg(long, default_value = ".family-gallery-state.json", global = true)]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the embeddable URL for a share link
    Resolve {
        /// Raw share link
        url: String,
        /// Resolve as a video (preview player) instead of a photo
        #[arg(long)]
        video: bool,
    },
    /// Validate catalog and config without building
    Check,
    /// Generate the static site
    Build,
    /// Browse the gallery interactively, one command per line on stdin
    Browse,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Resolve { url, video } => {
            println!("{}", drive::resolve(url, *video));
        }
        Command::Check => {
            println!("==> Checking {}", cli.catalog.display());
            let (catalog, _) = load_inputs(&cli)?;
            output::print_catalog_output(&catalog);
            println!("==> Catalog is valid");
        }
        Command::Build => {
            println!("==> Loading {}", cli.catalog.display());
            let (catalog, config) = load_inputs(&cli)?;

            println!("==> Generating HTML → {}", cli.output.display());
            let summary = generate::generate(&catalog, &config, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Browse => {
            let (catalog, config) = load_inputs(&cli)?;
            let store = FileStore::new(&cli.state_file);
            let session = Session::start(catalog, config.auth.clone(), store)?;
            browse(session, &config, std::io::stdin().lock())?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the catalog and the config that sits next to it.
fn load_inputs(cli: &Cli) -> Result<(Catalog, GalleryConfig), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&cli.catalog)?;
    let config_dir = resolve_config_dir(cli.config_dir.as_deref(), &cli.catalog);
    let config = config::load_config(&config_dir)?;
    Ok((catalog, config))
}

fn resolve_config_dir(explicit: Option<&Path>, catalog: &Path) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => match catalog.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

const BROWSE_HELP: &str = "\
Commands: login <password>, logout, albums, album <id>, back,
          view <n>, next, prev, key <escape|left|right>, close, quit";

/// Drive a session from line commands, printing the screen after each one.
fn browse<S: AuthStore>(
    mut session: Session<S>,
    config: &GalleryConfig,
    input: impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    output::print_screen(&session.screen(), config);

    for line in input.lines() {
        let line = line?;
        let (command, arg) = match line.trim().split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", BROWSE_HELP);
                continue;
            }
            "login" => {
                if session.login(arg)? == LoginOutcome::Granted {
                    println!("Welcome.");
                }
            }
            "logout" => session.logout()?,
            "albums" | "back" => session.back(),
            "album" => match session.select_album(arg) {
                Ok(_) => {}
                Err(SessionError::Store(e)) => return Err(e.into()),
                Err(e) => println!("{}", e),
            },
            "view" if session.selected_album().is_none() => {
                println!("Select an album first");
            }
            "view" => match arg.parse::<usize>() {
                Ok(n) if n > 0 => {
                    if session.open(n - 1).is_none() {
                        println!("No item {} in this album", n);
                    }
                }
                _ => println!("Usage: view <n> (1-based)"),
            },
            "next" => {
                session.next();
            }
            "prev" => {
                session.prev();
            }
            "key" => {
                session.handle_key(arg.parse::<Key>().unwrap_or(Key::Other));
            }
            "close" => {
                session.close();
            }
            _ => {
                println!("Unknown command '{}'", command);
                println!("{}", BROWSE_HELP);
                continue;
            }
        }

        output::print_screen(&session.screen(), config);
    }

    Ok(())
}
