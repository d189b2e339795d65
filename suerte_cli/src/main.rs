mod play;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use suerte_core::{
    CoinFlip, ManualScheduler, Mounted, Picker, RandomSource, Scheduler, SeededSource, Settings,
    SourceFactory, Tab, ThreadSource, Wheel,
};
use suerte_shared::DrawRecord;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "suerte", about = "Coin flips, roulette spins and lucky draws")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Replay draws from this seed instead of OS randomness
    #[arg(long, global = true)]
    seed: Option<String>,
    /// Skip the animation delays
    #[arg(long, global = true)]
    instant: bool,
    /// Print each result as a JSON line
    #[arg(long, global = true)]
    json: bool,
    /// JSON settings file; missing fields keep their defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Flip a coin
    Coin {
        #[arg(short = 'n', long, default_value_t = 1)]
        times: u32,
    },
    /// Spin the roulette wheel; without options the default four are used
    Wheel {
        options: Vec<String>,
        #[arg(short = 'n', long, default_value_t = 1)]
        times: u32,
    },
    /// Draw one lucky participant
    Draw {
        #[arg(required = true)]
        participants: Vec<String>,
    },
    /// Interactive session with all three panels
    Play,
}

/// Drives the virtual-time scheduler, sleeping for real unless `instant`.
#[derive(Clone)]
pub(crate) struct Clock {
    scheduler: ManualScheduler,
    instant: bool,
}

impl Clock {
    pub(crate) fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    /// Runs pending timers until none are left.
    pub(crate) fn settle(&self) {
        while let Some(due) = self.scheduler.next_due() {
            if !self.instant {
                std::thread::sleep(due.saturating_sub(self.scheduler.now()));
            }
            self.scheduler.advance_to(due);
        }
    }
}

pub(crate) struct Reporter {
    json: bool,
    seed_hash: Option<String>,
}

impl Reporter {
    pub(crate) fn result(&self, tab: Tab, result: &str) -> anyhow::Result<()> {
        if self.json {
            let record = DrawRecord {
                ts: Utc::now(),
                tab,
                result: result.to_string(),
                seed_hash: self.seed_hash.clone(),
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{tab}: {result}");
        }
        Ok(())
    }

    pub(crate) fn chatty(&self) -> bool {
        !self.json
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings = serde_json::from_str(&raw)
        .with_context(|| format!("parsing settings in {}", path.display()))?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

fn sources(seed: Option<String>) -> SourceFactory {
    let mut mounts = 0u64;
    Box::new(move |tab: Tab| -> Box<dyn RandomSource> {
        mounts += 1;
        match &seed {
            Some(seed) => Box::new(SeededSource::new(seed.clone(), format!("{tab}:{mounts}"))),
            None => Box::new(ThreadSource::new()),
        }
    })
}

fn flip_coins(
    settings: &Settings,
    clock: &Clock,
    rng: Box<dyn RandomSource>,
    out: &Reporter,
    times: u32,
) -> anyhow::Result<()> {
    let coin = CoinFlip::new(settings.coin.clone());
    let mut coin = Mounted::new(coin, rng, clock.scheduler().clone());
    for _ in 0..times {
        coin.trigger()?;
        if out.chatty() && !clock.instant {
            eprintln!("flipping...");
        }
        clock.settle();
        let Some(face) = coin.with(|c| c.face()) else {
            bail!("coin did not land");
        };
        out.result(Tab::Coin, &face.to_string())?;
    }
    Ok(())
}

fn spin_wheel(
    settings: &Settings,
    clock: &Clock,
    rng: Box<dyn RandomSource>,
    out: &Reporter,
    options: Vec<String>,
    times: u32,
) -> anyhow::Result<()> {
    let mut wheel_settings = settings.wheel.clone();
    if !options.is_empty() {
        wheel_settings.options = options;
    }
    let mut wheel = Mounted::new(Wheel::new(wheel_settings), rng, clock.scheduler().clone());
    for _ in 0..times {
        wheel.trigger().context("wheel cannot spin")?;
        if out.chatty() && !clock.instant {
            eprintln!("spinning...");
        }
        clock.settle();
        let Some(label) = wheel.with(|w| w.winner().map(|w| w.label.clone())) else {
            bail!("wheel did not stop");
        };
        out.result(Tab::Wheel, &label)?;
    }
    Ok(())
}

fn draw(
    settings: &Settings,
    clock: &Clock,
    rng: Box<dyn RandomSource>,
    out: &Reporter,
    participants: Vec<String>,
) -> anyhow::Result<()> {
    let picker = Picker::new(settings.picker.clone());
    let mut picker = Mounted::new(picker, rng, clock.scheduler().clone());
    for name in &participants {
        if let Err(why) = picker.edit(|p| p.add(name)) {
            warn!(%name, %why, "participant skipped");
        }
    }
    if out.chatty() && !clock.instant {
        picker.subscribe(|p: &Picker| {
            if let Some(h) = p.highlight() {
                eprintln!("  > {h}");
            }
        });
    }
    picker.trigger().context("nobody to draw")?;
    clock.settle();
    let Some(winner) = picker.with(|p| p.winner().map(str::to_string)) else {
        bail!("draw did not finish");
    };
    out.result(Tab::Picker, &winner)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let clock = Clock {
        scheduler: ManualScheduler::new(),
        instant: cli.instant,
    };
    let out = Reporter {
        json: cli.json,
        seed_hash: cli.seed.as_deref().map(|s| SeededSource::new(s, "").seed_hash_hex()),
    };
    let mut next_source = sources(cli.seed);
    debug!(instant = cli.instant, now = ?clock.scheduler().now(), "starting");

    match cli.command {
        Commands::Coin { times } => {
            flip_coins(&settings, &clock, next_source(Tab::Coin), &out, times)?
        }
        Commands::Wheel { options, times } => {
            spin_wheel(&settings, &clock, next_source(Tab::Wheel), &out, options, times)?
        }
        Commands::Draw { participants } => {
            draw(&settings, &clock, next_source(Tab::Picker), &out, participants)?
        }
        Commands::Play => play::run(settings, clock, next_source, &out)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` with warnings routed to a buffer, as `main` would print them.
    fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("warn"))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (out, log)
    }

    fn quiet() -> Reporter {
        Reporter {
            json: true,
            seed_hash: None,
        }
    }

    fn instant() -> Clock {
        Clock {
            scheduler: ManualScheduler::new(),
            instant: true,
        }
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let args = ["suerte", "wheel", "a", "b", "--seed", "x", "-n", "3", "--instant"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.seed.as_deref(), Some("x"));
        assert!(cli.instant);
        match cli.command {
            Commands::Wheel { options, times } => {
                assert_eq!(options, ["a", "b"]);
                assert_eq!(times, 3);
            }
            _ => panic!("expected wheel"),
        }
    }

    #[test]
    fn draw_needs_participants() {
        assert!(Cli::try_parse_from(["suerte", "draw"]).is_err());
    }

    #[test]
    fn seeded_sources_replay() {
        let mut a = sources(Some("same".into()));
        let mut b = sources(Some("same".into()));
        assert_eq!(a(Tab::Wheel).next_f64(), b(Tab::Wheel).next_f64());
    }

    #[test]
    fn wheel_with_one_option_fails() {
        let clock = instant();
        let err = spin_wheel(
            &Settings::default(),
            &clock,
            Box::new(ThreadSource::new()),
            &quiet(),
            vec!["alone".into()],
            1,
        )
        .unwrap_err();
        assert!(err.to_string().contains("wheel cannot spin"));
    }

    #[test]
    fn wheel_from_arguments_spins_without_warnings() {
        let clock = instant();
        let names = vec!["Ana".to_string(), "Luis".to_string(), "Marta".to_string()];
        let rng = Box::new(SeededSource::new("x", "wheel:1"));
        let (result, log) = warnings_during(|| {
            spin_wheel(&Settings::default(), &clock, rng, &quiet(), names, 1)
        });
        result.unwrap();
        assert!(log.is_empty(), "unexpected warnings: {log}");
        assert_eq!(clock.scheduler().now(), Duration::from_millis(4000));
    }

    #[test]
    fn invalid_wheel_argument_is_named() {
        let clock = instant();
        let names = vec!["Ana".to_string(), "x".repeat(21), "Marta".to_string()];
        let (result, log) = warnings_during(|| {
            spin_wheel(&Settings::default(), &clock, Box::new(ThreadSource::new()), &quiet(), names, 1)
        });
        result.unwrap();
        assert!(log.contains(&"x".repeat(21)), "{log}");
    }

    #[test]
    fn instant_runs_finish_on_virtual_time() {
        let clock = instant();
        let settings = Settings::default();
        let names = vec!["A".to_string(), "B".to_string()];
        draw(&settings, &clock, Box::new(SeededSource::new("t", "p")), &quiet(), names).unwrap();
        let rng = Box::new(SeededSource::new("t", "c"));
        flip_coins(&settings, &clock, rng, &quiet(), 2).unwrap();
        assert_eq!(clock.scheduler().now(), Duration::from_millis(2000 + 2 * 1500));
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        assert!(load_settings(Some(Path::new("/definitely/not/here.json"))).is_err());
        assert_eq!(load_settings(None).unwrap(), Settings::default());
    }
}
