use std::path::{Path, PathBuf};

use clap::{
    ArgGroup, CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tidalfav::{cli, config, error, warning};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["backup", "restore", "completions"])
))]
struct Cli {
    /// Backup favorites
    #[clap(long, short = 'b')]
    backup: bool,

    /// Restore favorites
    #[clap(long, short = 'c')]
    restore: bool,

    /// INI file with a [session] section to reuse a previous login
    #[clap(long, short = 'i', value_name = "PATH")]
    ini: Option<PathBuf>,

    /// Snapshot file name (written inside --dir on backup, read as given on restore)
    #[clap(long, short = 'o', value_name = "NAME", default_value = config::DEFAULT_SNAPSHOT_FILENAME)]
    filename: String,

    /// Directory for the snapshot and playlist covers on backup
    #[clap(long, short = 'd', value_name = "DIR", default_value = config::DEFAULT_BACKUP_DIR)]
    dir: PathBuf,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }
    let settings = config::ApiSettings::from_env();

    let tidal = match cli::bootstrap(&settings, cli.ini.as_deref()).await {
        Ok(tidal) => tidal,
        Err(e) => error!("Authentication failed: {}", e),
    };

    if cli.backup {
        if let Err(e) = cli::backup(&tidal, &cli.filename, &cli.dir).await {
            error!("Backup failed: {}", e);
        }
    }

    if cli.restore {
        if let Err(e) = cli::restore(&tidal, Path::new(&cli.filename)).await {
            error!("Restore failed: {}", e);
        }
    }
}
