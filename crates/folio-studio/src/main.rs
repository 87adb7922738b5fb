mod script;
mod session;

use std::path::PathBuf;

use anyhow::{bail, Context};
use folio_engine::env::JsonFileStore;
use folio_engine::logging::{init_logging, LoggingConfig};
use folio_motion::config::MotionConfig;

use crate::script::parse_script;
use crate::session::Session;

const TOUR: &str = include_str!("../scripts/tour.folio");

#[derive(Debug)]
struct Options {
    store: PathBuf,
    script: Option<PathBuf>,
    reduced_motion: bool,
    log: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            store: PathBuf::from(".folio/prefs.json"),
            script: None,
            reduced_motion: false,
            log: None,
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Options> {
    let mut opts = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--store" => opts.store = args.next().context("--store needs a path")?.into(),
            "--script" => opts.script = Some(args.next().context("--script needs a path")?.into()),
            "--log" => opts.log = Some(args.next().context("--log needs a filter")?),
            "--reduced-motion" => opts.reduced_motion = true,
            other => bail!("unknown argument `{other}` (expected --store, --script, --reduced-motion, --log)"),
        }
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    let opts = parse_args(std::env::args().skip(1))?;

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &opts.log {
        logging = logging.filter(filter.clone());
    }
    init_logging(logging);

    let (name, src) = match &opts.script {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            (path.display().to_string(), src)
        }
        None => ("built-in tour".to_string(), TOUR.to_string()),
    };
    let commands = parse_script(&src).with_context(|| format!("parsing {name}"))?;

    let store = JsonFileStore::open(&opts.store)
        .with_context(|| format!("opening preference store {}", opts.store.display()))?;

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║           FOLIO MOTION STUDIO          ║");
    println!("  ║   theme bursts  ·  hero scroll engine  ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();
    println!("  script  >  {name} ({} commands)", commands.len());
    println!("  store   >  {}", opts.store.display());
    println!("  motion  >  {}", if opts.reduced_motion { "reduced" } else { "full" });
    println!();

    let mut session = Session::new(store, opts.reduced_motion, MotionConfig::default());
    session.run(&commands);

    println!();
    println!("  final   >  {} after {}ms", session.themes().current(), session.now().as_millis());
    println!("  events  >  {}", session.events().len());
    println!("  hero    >  progress {:.3}", session.hero().progress());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse_args(Vec::new()).unwrap();
        assert_eq!(opts.store, PathBuf::from(".folio/prefs.json"));
        assert!(opts.script.is_none());
        assert!(!opts.reduced_motion);
    }

    #[test]
    fn all_flags() {
        let opts = parse_args(args(&[
            "--store", "/tmp/p.json", "--script", "a.folio", "--reduced-motion", "--log", "debug",
        ]))
        .unwrap();
        assert_eq!(opts.store, PathBuf::from("/tmp/p.json"));
        assert_eq!(opts.script, Some(PathBuf::from("a.folio")));
        assert!(opts.reduced_motion);
        assert_eq!(opts.log.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_value_and_unknown_flag_are_errors() {
        assert!(parse_args(args(&["--store"])).is_err());
        let err = parse_args(args(&["--fast"])).unwrap_err();
        assert!(err.to_string().contains("--fast"));
    }
}
