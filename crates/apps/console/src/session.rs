//! Console state: scrollback, command history and the built-in command set.

use chrono::Local;
use desktop_app_contract::ApplicationId;

/// Prompt shown before the input and echoed with every submitted line.
pub const PROMPT: &str = "C:\\PortOS>";
const MAX_CONSOLE_LINES: usize = 200;

/// One row of scrollback. Ids are never reused, so `cls` never recycles a rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub id: u64,
    pub text: String,
}

/// Work a command hands back to the desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleRequest {
    OpenApp(ApplicationId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSession {
    lines: Vec<ConsoleLine>,
    next_line_id: u64,
    /// Most recent first.
    history: Vec<String>,
    history_index: Option<usize>,
    app_ids: Vec<ApplicationId>,
}

impl ConsoleSession {
    pub fn new(app_ids: Vec<ApplicationId>) -> Self {
        let mut session = Self {
            lines: Vec::new(),
            next_line_id: 0,
            history: Vec::new(),
            history_index: None,
            app_ids,
        };
        session.push("PortOS Console [Version 0.1]");
        session.push("Type HELP for a list of commands.");
        session.push("");
        session
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn push(&mut self, text: impl Into<String>) {
        self.lines.push(ConsoleLine {
            id: self.next_line_id,
            text: text.into(),
        });
        self.next_line_id += 1;
        if self.lines.len() > MAX_CONSOLE_LINES {
            let overflow = self.lines.len() - MAX_CONSOLE_LINES;
            self.lines.drain(..overflow);
        }
    }

    /// Runs one input line. Empty input only echoes the prompt.
    pub fn run(&mut self, raw: &str) -> Option<ConsoleRequest> {
        let line = raw.trim();
        self.push(format!("{PROMPT}{line}"));
        if line.is_empty() {
            return None;
        }
        self.history.insert(0, line.to_string());
        self.history_index = None;

        let mut args = split_args(line).into_iter();
        let command = args.next()?;
        let args: Vec<String> = args.collect();
        match command.to_lowercase().as_str() {
            "help" => {
                for row in [
                    "CLS        Clears the screen.",
                    "ECHO       Displays messages.",
                    "HELP       Lists the available commands.",
                    "TIME       Displays the system time.",
                    "APPS       Lists PortOS apps.",
                    "OPEN       Opens a PortOS app. Usage: OPEN <appId>",
                    "",
                ] {
                    self.push(row);
                }
            }
            "cls" => self.lines.clear(),
            "echo" => self.push(args.join(" ")),
            "time" => self.push(Local::now().format("%H:%M:%S").to_string()),
            "apps" => {
                if self.app_ids.is_empty() {
                    self.push("No app list available.");
                } else {
                    let ids: Vec<&str> = self.app_ids.iter().map(ApplicationId::as_str).collect();
                    let listing = ids.join("  ");
                    self.push(listing);
                }
            }
            "open" => {
                let Some(target) = args.first() else {
                    self.push("Usage: OPEN <appId>");
                    return None;
                };
                match ApplicationId::new(target.as_str()) {
                    Ok(app_id) => return Some(ConsoleRequest::OpenApp(app_id)),
                    Err(err) => self.push(err),
                }
            }
            _ => {
                self.push(format!(
                    "'{command}' is not recognized as an internal or external command,"
                ));
                self.push("operable program or batch file.");
            }
        }
        None
    }

    /// Steps back through history; `None` when there is none.
    pub fn history_older(&mut self) -> Option<String> {
        if self.history.is_empty() {
            return None;
        }
        let index = self
            .history_index
            .map_or(0, |index| (index + 1).min(self.history.len() - 1));
        self.history_index = Some(index);
        self.history.get(index).cloned()
    }

    /// Steps forward through history; past the newest entry the input is cleared.
    pub fn history_newer(&mut self) -> Option<String> {
        if self.history.is_empty() {
            return None;
        }
        match self.history_index {
            None | Some(0) => {
                self.history_index = None;
                Some(String::new())
            }
            Some(index) => {
                self.history_index = Some(index - 1);
                self.history.get(index - 1).cloned()
            }
        }
    }
}

/// Splits on whitespace; double quotes group words and are dropped.
pub fn split_args(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ch if ch.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn session() -> ConsoleSession {
        ConsoleSession::new(vec![
            ApplicationId::trusted("about"),
            ApplicationId::trusted("notes"),
        ])
    }

    fn texts(session: &ConsoleSession) -> Vec<&str> {
        session.lines().iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn quoted_arguments_stay_together() {
        assert_eq!(
            split_args(r#"echo "hello  world" again"#),
            vec!["echo", "hello  world", "again"]
        );
        assert_eq!(split_args("   "), Vec::<String>::new());
        assert_eq!(split_args(r#"open """#), vec!["open"]);
    }

    #[test]
    fn empty_input_echoes_prompt_only() {
        let mut session = session();
        let before = session.lines().len();
        assert_eq!(session.run("   "), None);
        assert_eq!(session.lines().len(), before + 1);
        assert_eq!(texts(&session).last(), Some(&PROMPT));
        assert!(session.history().is_empty());
    }

    #[test]
    fn echo_and_unknown_commands() {
        let mut session = session();
        session.run("  ECHO \"hi there\" you ");
        session.run("dir /w");
        let tail: Vec<&str> = texts(&session).into_iter().rev().take(5).rev().collect();
        assert_eq!(
            tail,
            vec![
                "C:\\PortOS>ECHO \"hi there\" you",
                "hi there you",
                "C:\\PortOS>dir /w",
                "'dir' is not recognized as an internal or external command,",
                "operable program or batch file.",
            ]
        );
    }

    #[test]
    fn cls_clears_without_reusing_line_ids() {
        let mut session = session();
        let last_id = session.lines().last().map(|line| line.id);
        session.run("cls");
        assert!(session.lines().is_empty());
        session.run("echo again");
        assert!(session.lines()[0].id > last_id.unwrap_or_default());
    }

    #[test]
    fn apps_lists_catalog_ids() {
        let mut session = session();
        session.run("apps");
        assert_eq!(texts(&session).last(), Some(&"about  notes"));

        let mut empty = ConsoleSession::new(Vec::new());
        empty.run("apps");
        assert_eq!(texts(&empty).last(), Some(&"No app list available."));
    }

    #[test]
    fn open_returns_a_request_for_valid_ids() {
        let mut session = session();
        assert_eq!(
            session.run("open about"),
            Some(ConsoleRequest::OpenApp(ApplicationId::trusted("about")))
        );
        assert_eq!(session.run("OPEN"), None);
        assert_eq!(texts(&session).last(), Some(&"Usage: OPEN <appId>"));
        assert_eq!(session.run("open \"Not An Id\""), None);
        assert_eq!(texts(&session).last().map(|t| t.starts_with(PROMPT)), Some(false));
    }

    #[test]
    fn history_walks_both_directions() {
        let mut session = session();
        assert_eq!(session.history_older(), None);
        session.run("echo one");
        session.run("echo two");

        assert_eq!(session.history_older().as_deref(), Some("echo two"));
        assert_eq!(session.history_older().as_deref(), Some("echo one"));
        assert_eq!(session.history_older().as_deref(), Some("echo one"));
        assert_eq!(session.history_newer().as_deref(), Some("echo two"));
        assert_eq!(session.history_newer().as_deref(), Some(""));

        session.history_older();
        session.run("time");
        assert_eq!(session.history_older().as_deref(), Some("time"));
    }

    #[test]
    fn scrollback_is_capped() {
        let mut session = session();
        for n in 0..150 {
            session.run(&format!("echo {n}"));
        }
        assert_eq!(session.lines().len(), MAX_CONSOLE_LINES);
        assert_eq!(texts(&session).last(), Some(&"149"));
    }
}
