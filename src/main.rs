//! # NewHome CLI
//!
//! Command-line interface for the flyer form and PDF server.
//!
//! ## Usage
//!
//! ```bash
//! # Run the PDF backend
//! newhome serve --listen 0.0.0.0:5000
//!
//! # Inspect or edit the saved form
//! newhome show
//! newhome set precio "129.000€"
//! newhome reset
//!
//! # Talk to a running backend
//! newhome login --server http://localhost:5000 newhome newhome
//! newhome generate --server http://localhost:5000 --out flyer.pdf
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use newhome::{
    api::ApiClient,
    error::NewHomeError,
    flyer::{adjust, energy, Field, FileSlot, FlyerEditor, ImageSlot},
    server::{serve, ServerConfig},
    storage::{JsonFileRepository, DEFAULT_STATE_FILE},
};

/// NewHome - Real estate flyer form and PDF generator
#[derive(Parser, Debug)]
#[command(name = "newhome")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path of the saved form document
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    state_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the login and PDF HTTP endpoints
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:5000")]
        listen: String,

        /// JSON file with the accepted username/password pair
        #[arg(long)]
        credentials: Option<PathBuf>,
    },

    /// Print every form field and its current value
    Show,

    /// Set one form field by its wire key
    Set {
        /// Field key (e.g. "precio", "imagen2_escala")
        key: String,
        /// New value, normalized on write
        value: String,
    },

    /// Restore the form to its defaults and drop the saved document
    Reset,

    /// Check a username/password pair against a running backend
    Login {
        /// Backend base URL
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
        username: String,
        password: String,
    },

    /// Ask a running backend to render the saved form as a PDF
    Generate {
        /// Backend base URL
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,

        /// Photo for a grid slot
        #[arg(long)]
        image1: Option<PathBuf>,
        #[arg(long)]
        image2: Option<PathBuf>,
        #[arg(long)]
        image3: Option<PathBuf>,
        #[arg(long)]
        image4: Option<PathBuf>,

        /// QR code image
        #[arg(long)]
        qr: Option<PathBuf>,

        /// Output path for the PDF
        #[arg(long, default_value = "NewHomeGenerator.pdf")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), NewHomeError> {
    let cli = Cli::parse();
    let repo = JsonFileRepository::new(&cli.state_file);

    match cli.command {
        Commands::Serve {
            listen,
            credentials,
        } => {
            serve(ServerConfig {
                listen_addr: listen,
                credentials_path: credentials,
            })
            .await
        }

        Commands::Show => {
            let editor = FlyerEditor::open(repo);
            for field in Field::all() {
                println!("{:32} {}", field.key(), editor.state().get(field));
            }
            println!();
            for slot in ImageSlot::ALL {
                let adj = adjust::resolve(editor.state(), slot);
                println!(
                    "{}: scale {:.2}, offset ({:.0}, {:.0}), mode {}",
                    slot, adj.scale, adj.offset_x, adj.offset_y, adj.mode
                );
            }
            let marker = energy::marker(editor.state().energy);
            println!(
                "energy {}: marker at {:.1}% from top, nudge {:.0}px",
                editor.state().energy,
                marker.top_pct,
                marker.nudge_px
            );
            println!(
                "description: {} words, {} chars",
                editor.drafts().description_words(),
                editor.drafts().description_chars()
            );
            Ok(())
        }

        Commands::Set { key, value } => {
            let Some(field) = Field::from_key(&key) else {
                eprintln!("Valid field keys:");
                for field in Field::all() {
                    eprintln!("  {}", field.key());
                }
                return Err(NewHomeError::UnknownField(key));
            };
            let mut editor = FlyerEditor::open(repo);
            editor.set(field, &value);
            println!("{} = {}", field.key(), editor.state().get(field));
            Ok(())
        }

        Commands::Reset => {
            let mut editor = FlyerEditor::open(repo);
            editor.reset();
            println!("Form restored to defaults");
            Ok(())
        }

        Commands::Login {
            server,
            username,
            password,
        } => {
            let client = ApiClient::new(server);
            client.login(&username, &password).await?;
            println!("Login accepted");
            Ok(())
        }

        Commands::Generate {
            server,
            image1,
            image2,
            image3,
            image4,
            qr,
            out,
        } => {
            let mut editor = FlyerEditor::open(repo);
            let uploads = [
                (FileSlot::Image(ImageSlot::One), image1),
                (FileSlot::Image(ImageSlot::Two), image2),
                (FileSlot::Image(ImageSlot::Three), image3),
                (FileSlot::Image(ImageSlot::Four), image4),
                (FileSlot::Qr, qr),
            ];
            for (slot, path) in uploads {
                if let Some(path) = path {
                    let bytes = std::fs::read(&path)?;
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| slot.key().to_string());
                    editor.assign_file(slot, filename, bytes);
                }
            }
            let client = ApiClient::new(server);
            let pdf = client.generate_pdf(editor.payload()).await?;
            std::fs::write(&out, &pdf)?;
            println!("Wrote {} ({} bytes)", out.display(), pdf.len());
            Ok(())
        }
    }
}
