//! Interactive browsing session.
//!
//! Lines are read on a background thread so the session can wait for either
//! the next line or the search debounce deadline, whichever comes first.
//! Search input (`/text`) only hits the network once typing has been quiet
//! for the configured delay; a newer search replaces a pending one.

use crate::commands::copy::report;
use crate::commands::list::show_grid;
use crate::core::{
    context::HubContext,
    detail::{BodyState, ClipboardSink, CopyOutcome, DetailModal, SystemClipboard},
    error::{Result, ScriptHubError},
    filter::ScriptFilter,
    grid::{GridController, QueryOutcome},
    print_error, print_info, print_section_header, print_warning,
    selection::{resolve, Target},
    templates::render_detail,
};
use colored::*;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Filter(ScriptFilter),
    More,
    View(Target),
    /// `None` copies the script open in the detail view
    Copy(Option<Target>),
    Close,
    Refresh,
    Help,
    Quit,
}

impl BrowseCommand {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(text) = line.strip_prefix('/') {
            return Ok(Some(BrowseCommand::Search(text.trim().to_string())));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word, rest.is_empty()) {
            ("f" | "filter", false) => BrowseCommand::Filter(rest.parse()?),
            ("m" | "more", true) => BrowseCommand::More,
            ("v" | "view", false) => BrowseCommand::View(Target::parse(rest)?),
            ("c" | "copy", true) => BrowseCommand::Copy(None),
            ("c" | "copy", false) => BrowseCommand::Copy(Some(Target::parse(rest)?)),
            ("x" | "close", true) => BrowseCommand::Close,
            ("r" | "refresh", true) => BrowseCommand::Refresh,
            ("h" | "help" | "?", true) => BrowseCommand::Help,
            ("q" | "quit" | "exit", true) => BrowseCommand::Quit,
            _ => return Err(ScriptHubError::unknown_command(line)),
        };
        Ok(Some(command))
    }
}

struct Session {
    ctx: HubContext,
    grid: GridController,
    modal: DetailModal,
    clipboard: Option<SystemClipboard>,
}

pub fn execute_browse() -> Result<()> {
    let ctx = HubContext::initialize()?;
    let grid = GridController::new(ctx.config.debounce());
    let mut session = Session {
        ctx,
        grid,
        modal: DetailModal::new(),
        clipboard: None,
    };

    let lines = spawn_line_reader();
    let outcome = session.grid.refresh(&mut session.ctx.catalog);
    session.after_grid_change(outcome)?;
    print_help();

    loop {
        prompt();
        let line = match session.grid.search_deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                match lines.recv_timeout(wait) {
                    Ok(line) => line,
                    Err(RecvTimeoutError::Timeout) => {
                        println!();
                        session.poll_search()?;
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        session.flush_search()?;
                        break;
                    }
                }
            }
            None => match lines.recv() {
                Ok(line) => line,
                Err(_) => break,
            },
        };

        let command = match BrowseCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                print_error(&e.to_string());
                continue;
            }
        };

        if command == BrowseCommand::Quit {
            break;
        }
        if let Err(e) = session.run(command) {
            print_error(&e.to_string());
        }
    }

    println!();
    Ok(())
}

impl Session {
    fn run(&mut self, command: BrowseCommand) -> Result<()> {
        let catalog = &mut self.ctx.catalog;
        match command {
            BrowseCommand::Search(text) => {
                log::debug!("Search input: {text:?}");
                self.grid.input_search(text, Instant::now());
                Ok(())
            }
            BrowseCommand::Filter(filter) => {
                let outcome = self.grid.select_filter(catalog, filter);
                self.after_grid_change(outcome)
            }
            BrowseCommand::More => {
                let outcome = self.grid.load_more(catalog);
                self.after_grid_change(outcome)
            }
            BrowseCommand::Refresh => {
                let outcome = self.grid.refresh(catalog);
                self.after_grid_change(outcome)
            }
            BrowseCommand::View(target) => self.view(&target),
            BrowseCommand::Copy(target) => self.copy(target.as_ref()),
            BrowseCommand::Close => {
                self.modal.close();
                Ok(())
            }
            BrowseCommand::Help => {
                print_help();
                Ok(())
            }
            BrowseCommand::Quit => Ok(()),
        }
    }

    fn poll_search(&mut self) -> Result<()> {
        match self.grid.poll_search(&mut self.ctx.catalog, Instant::now()) {
            Some(outcome) => self.after_grid_change(outcome),
            None => Ok(()),
        }
    }

    /// Input closed with a search still pending: run it once it is due.
    fn flush_search(&mut self) -> Result<()> {
        if let Some(deadline) = self.grid.search_deadline() {
            thread::sleep(deadline.saturating_duration_since(Instant::now()));
            self.poll_search()?;
        }
        Ok(())
    }

    fn after_grid_change(&mut self, outcome: QueryOutcome) -> Result<()> {
        log::debug!("Grid updated: {outcome:?}");
        if outcome == QueryOutcome::Exhausted {
            print_info("No more scripts.");
            return Ok(());
        }
        self.modal.close();
        if outcome == QueryOutcome::Failed && !self.grid.cards().is_empty() {
            print_warning("Failed to load more scripts. (CORS or API Error)");
            return Ok(());
        }
        show_grid(&self.ctx, &self.grid)
    }

    fn view(&mut self, target: &Target) -> Result<()> {
        let snapshot = self.grid.snapshot();
        let selection = resolve(target, Some(&snapshot), &self.ctx.catalog.style)?;

        let view = self.modal.open_with(
            &mut self.ctx.catalog,
            &selection.identifier,
            &selection.title,
            &selection.image_url,
            |view| {
                if view.body == BodyState::Fetching {
                    println!("{}", view.body.display_text().bright_black());
                }
            },
        );
        print!("{}", render_detail(view));
        Ok(())
    }

    fn copy(&mut self, target: Option<&Target>) -> Result<()> {
        let (identifier, title) = match target {
            Some(target) => {
                let snapshot = self.grid.snapshot();
                let selection = resolve(target, Some(&snapshot), &self.ctx.catalog.style)?;
                (selection.identifier, selection.title)
            }
            None => match self.modal.current() {
                Some(view) => (view.identifier.clone(), view.title.clone()),
                None => return Err(ScriptHubError::NoTarget),
            },
        };

        if self.clipboard.is_none() {
            match SystemClipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => log::warn!("{e}"),
            }
        }

        let outcome = match self.clipboard.as_mut() {
            Some(clipboard) => {
                let sink: &mut dyn ClipboardSink = clipboard;
                self.modal.copy(&mut self.ctx.catalog, &identifier, sink)
            }
            None => CopyOutcome::Error,
        };
        report(outcome, &title);
        Ok(())
    }
}

fn spawn_line_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn prompt() {
    print!("{} ", "script-hub>".blue());
    let _ = io::stdout().flush();
}

fn print_help() {
    print_section_header("Commands");
    for (keys, description) in [
        ("/text", "search (runs once typing pauses)"),
        ("f <filter>", "all, universal, keyless or trending"),
        ("m", "load more"),
        ("v <n|slug>", "view a script"),
        ("c [n|slug]", "copy a script, or the one being viewed"),
        ("slug:<slug>", "a slug made only of digits, e.g. v slug:12345"),
        ("x", "close the script view"),
        ("r", "reload page 1"),
        ("q", "quit"),
    ] {
        println!("  {:<12} {}", keys.white(), description.bright_black());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_line() -> Result<()> {
        assert_eq!(
            BrowseCommand::parse("/ aimbot ")?,
            Some(BrowseCommand::Search("aimbot".to_string()))
        );
        assert_eq!(
            BrowseCommand::parse("/")?,
            Some(BrowseCommand::Search(String::new()))
        );
        Ok(())
    }

    #[test]
    fn test_parse_short_commands() -> Result<()> {
        assert_eq!(
            BrowseCommand::parse("f trending")?,
            Some(BrowseCommand::Filter(ScriptFilter::Trending))
        );
        assert_eq!(BrowseCommand::parse("m")?, Some(BrowseCommand::More));
        assert_eq!(
            BrowseCommand::parse("v 3")?,
            Some(BrowseCommand::View(Target::Card(3)))
        );
        assert_eq!(BrowseCommand::parse("c")?, Some(BrowseCommand::Copy(None)));
        assert_eq!(
            BrowseCommand::parse("copy some-slug")?,
            Some(BrowseCommand::Copy(Some(Target::Identifier(
                "some-slug".to_string()
            ))))
        );
        assert_eq!(
            BrowseCommand::parse("v slug:12345")?,
            Some(BrowseCommand::View(Target::Identifier("12345".to_string())))
        );
        assert_eq!(BrowseCommand::parse("q")?, Some(BrowseCommand::Quit));
        assert_eq!(BrowseCommand::parse("   ")?, None);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(matches!(
            BrowseCommand::parse("dance"),
            Err(ScriptHubError::UnknownCommand { .. })
        ));
        assert!(matches!(
            BrowseCommand::parse("f popular"),
            Err(ScriptHubError::UnknownFilter { .. })
        ));
        assert!(matches!(
            BrowseCommand::parse("m 2"),
            Err(ScriptHubError::UnknownCommand { .. })
        ));
    }
}
