use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lconf_version::config;
use lconf_version::domain::{extract_keywords, VersionRecord};
use lconf_version::ui;
use lconf_version::Resolver;

#[derive(clap::Parser)]
#[command(
    name = "lconf-version",
    about = "Resolve the version of a source tree from git-archive keywords, a live checkout or its directory name"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        long,
        help = "Location of the version file [default: <cwd>/<versionfile_source>]"
    )]
    versionfile: Option<PathBuf>,

    #[arg(long, help = "Read git_refnames/git_full keywords from this file")]
    keywords_from: Option<PathBuf>,

    #[arg(long, help = "Version to report when nothing can be resolved")]
    default: Option<String>,

    #[arg(long, help = "Also print the full commit id")]
    full: bool,

    #[arg(short, long, help = "Print diagnostics to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let mut resolver = Resolver::new(config);

    let versionfile = match args.versionfile {
        Some(path) => path,
        None => std::env::current_dir()?.join(&resolver.config().versionfile_source),
    };
    resolver = resolver.with_versionfile(versionfile);

    if let Some(path) = args.keywords_from.as_deref() {
        let keywords = extract_keywords(path);
        if keywords.is_empty() {
            ui::display_warning(&format!("no keywords found in {}", path.display()));
        }
        resolver = resolver.with_keywords(Some(keywords));
    }

    let default = args
        .default
        .filter(|version| !version.is_empty())
        .map(|version| VersionRecord::new(version, ""));
    let record = resolver.resolve(default, args.verbose);

    println!("{}", record.version());
    if args.full {
        println!("{}", record.full());
    }

    Ok(())
}
