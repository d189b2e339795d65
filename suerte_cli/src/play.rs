//! Line-oriented shell over the three panels.

use crate::{Clock, Reporter};
use std::io::{self, BufRead, Write};
use suerte_core::{ManualScheduler, Panel, Rejection, Settings, Shell, SourceFactory, Tab, Widget};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Switch(Tab),
    Add(String),
    /// 1-based, as shown by `show`
    Remove(usize),
    Clear,
    Go,
    Show,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  coin | wheel | picker   switch panel (the old one is discarded)
  add <label>             add an option or participant
  rm <n>                  remove entry n
  clear                   remove every participant
  go                      flip / spin / draw
  show                    print the panel
  quit";

fn parse_line(line: &str) -> Result<Option<Action>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let action = match word.to_ascii_lowercase().as_str() {
        "coin" => Action::Switch(Tab::Coin),
        "wheel" => Action::Switch(Tab::Wheel),
        "picker" | "draw" => Action::Switch(Tab::Picker),
        "add" => Action::Add(rest.to_string()),
        "rm" | "remove" => {
            let n: usize = rest.parse().map_err(|_| format!("not an entry number: {rest:?}"))?;
            if n == 0 {
                return Err("entries are numbered from 1".into());
            }
            Action::Remove(n)
        }
        "clear" => Action::Clear,
        "go" | "spin" | "flip" => Action::Go,
        "show" | "ls" => Action::Show,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(format!("unknown command {other:?}, try help")),
    };
    Ok(Some(action))
}

fn no_list() -> Result<(), String> {
    Err("the coin has no list".into())
}

fn apply_edit(panel: &mut Panel<ManualScheduler>, action: &Action) -> Result<(), String> {
    let outcome: Result<(), Rejection> = match (panel, action) {
        (Panel::Coin(_), _) => return no_list(),
        (Panel::Wheel(m), Action::Add(label)) => m.edit(|w| w.add(label)).map(drop),
        (Panel::Wheel(m), Action::Remove(n)) => m.edit(|w| w.remove(n - 1)).map(drop),
        (Panel::Wheel(_), Action::Clear) => Err(Rejection::AtMinimum { min: 2 }),
        (Panel::Picker(m), Action::Add(label)) => m.edit(|p| p.add(label)).map(drop),
        (Panel::Picker(m), Action::Remove(n)) => m.edit(|p| p.remove(n - 1)).map(drop),
        (Panel::Picker(m), Action::Clear) => m.edit(|p| p.clear()),
        _ => Ok(()),
    };
    outcome.map_err(|why| format!("ignored: {why}"))
}

fn render(panel: &Panel<ManualScheduler>) -> String {
    let mut out = String::new();
    let list = |out: &mut String, items: &[String], marked: Option<&str>| {
        for (i, item) in items.iter().enumerate() {
            let mark = if marked == Some(item.as_str()) { " <-" } else { "" };
            out.push_str(&format!("  {:>2}. {item}{mark}\n", i + 1));
        }
    };
    match panel {
        Panel::Coin(m) => {
            let view = m.view();
            out.push_str(&format!("[coin] {:?}", view.phase).to_lowercase());
            if let Some(face) = view.face {
                out.push_str(&format!(" -> {face}"));
            }
            out.push('\n');
        }
        Panel::Wheel(m) => {
            let view = m.view();
            out.push_str(&format!(
                "[wheel] {} options, resting at {:.1} deg\n",
                view.options.len(),
                view.rotation_deg.rem_euclid(360.0)
            ));
            list(&mut out, &view.options, view.winner.as_deref());
        }
        Panel::Picker(m) => {
            let view = m.view();
            out.push_str(&format!("[picker] {} participants\n", view.participants.len()));
            if view.participants.is_empty() {
                out.push_str("  add participants to start\n");
            }
            list(&mut out, &view.participants, view.winner.as_deref());
        }
    }
    out
}

fn announce(shell: &Shell<ManualScheduler>, out: &Reporter) -> anyhow::Result<()> {
    let result = match shell.panel() {
        Panel::Coin(m) => m.with(|c| c.face().map(|f| f.to_string())),
        Panel::Wheel(m) => m.with(|w| w.winner().map(|w| w.label.clone())),
        Panel::Picker(m) => m.with(|p| p.winner().map(str::to_string)),
    };
    if let Some(result) = result {
        out.result(shell.active(), &result)?;
    }
    Ok(())
}

fn watch_highlights(shell: &Shell<ManualScheduler>) {
    if let Panel::Picker(m) = shell.panel() {
        m.subscribe(|p| {
            if p.reveal().is_animating() {
                if let Some(h) = p.highlight() {
                    eprintln!("  > {h}");
                }
            }
        });
    }
}

pub(crate) fn run(
    settings: Settings,
    clock: Clock,
    sources: SourceFactory,
    out: &Reporter,
) -> anyhow::Result<()> {
    let mut shell = Shell::new(settings, clock.scheduler().clone(), sources);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if out.chatty() {
        println!("{HELP}");
    }
    loop {
        if out.chatty() {
            print!("{}> ", shell.active().title().to_lowercase());
            stdout.flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        debug!(?action, "play");
        match action {
            Action::Quit => break,
            Action::Help => println!("{HELP}"),
            Action::Show => print!("{}", render(shell.panel())),
            Action::Switch(tab) => {
                if shell.select(tab) && out.chatty() && !clock.instant {
                    watch_highlights(&shell);
                }
                if out.chatty() {
                    print!("{}", render(shell.panel()));
                }
            }
            Action::Go => match shell.panel_mut().trigger() {
                Ok(()) => {
                    clock.settle();
                    announce(&shell, out)?;
                }
                Err(why) => eprintln!("ignored: {why}"),
            },
            edit => match apply_edit(shell.panel_mut(), &edit) {
                Ok(()) if out.chatty() => print!("{}", render(shell.panel())),
                Ok(()) => {}
                Err(msg) => eprintln!("{msg}"),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use suerte_core::SeededSource;

    fn seeded_shell(sched: &ManualScheduler) -> Shell<ManualScheduler> {
        Shell::new(
            Settings::default(),
            sched.clone(),
            Box::new(|tab: Tab| -> Box<dyn suerte_core::RandomSource> {
                Box::new(SeededSource::new("play", tab.to_string()))
            }),
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("add  Ana María "), Ok(Some(Action::Add("Ana María".into()))));
        assert_eq!(parse_line("rm 2"), Ok(Some(Action::Remove(2))));
        assert_eq!(parse_line("WHEEL"), Ok(Some(Action::Switch(Tab::Wheel))));
        assert!(parse_line("rm 0").is_err());
        assert!(parse_line("rm two").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn edits_follow_the_active_panel() {
        let mut shell = seeded_shell(&ManualScheduler::new());
        assert!(apply_edit(shell.panel_mut(), &Action::Add("x".into())).is_err());

        shell.select(Tab::Picker);
        apply_edit(shell.panel_mut(), &Action::Add("Ana".into())).unwrap();
        apply_edit(shell.panel_mut(), &Action::Add("Luis".into())).unwrap();
        assert!(render(shell.panel()).contains(" 2. Luis"));
        apply_edit(shell.panel_mut(), &Action::Remove(1)).unwrap();
        assert!(render(shell.panel()).contains(" 1. Luis"));
        apply_edit(shell.panel_mut(), &Action::Clear).unwrap();
        assert!(render(shell.panel()).contains("add participants"));

        shell.select(Tab::Wheel);
        let err = apply_edit(shell.panel_mut(), &Action::Remove(9)).unwrap_err();
        assert!(err.starts_with("ignored:"));
    }

    #[test]
    fn coin_render_shows_face_after_flip() {
        let sched = ManualScheduler::new();
        let mut shell = seeded_shell(&sched);
        assert!(render(shell.panel()).starts_with("[coin] idle"));
        shell.panel_mut().trigger().unwrap();
        assert!(render(shell.panel()).starts_with("[coin] animating"));
        sched.advance(Duration::from_millis(1500));
        let shown = render(shell.panel());
        assert!(shown.contains("-> heads") || shown.contains("-> tails"), "{shown}");
    }
}
