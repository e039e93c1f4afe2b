//! Interactive read-eval-print loop
//!
//! One root environment lives for the whole session, so `let` bindings made on
//! one line are visible on the next.

use miette::{IntoDiagnostic, Result};
use rustyline::error::ReadlineError;

use crate::interp::{builtins, Interpreter};
use crate::parser;

pub const PROMPT: &str = ">> ";

const HELP: &str = "\
Commands:
  :help, :h    Show this help
  :quit, :q    Exit the REPL
  :env         List bindings of the session";

/// What the loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text
    Print(String),
    /// Print nothing
    Silent,
    /// End the session
    Quit,
}

/// REPL session state
pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    /// Handle one line of input
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();
        match trimmed {
            "" => Reply::Silent,
            ":quit" | ":q" => Reply::Quit,
            ":help" | ":h" => Reply::Print(HELP.to_string()),
            ":env" => Reply::Print(self.describe_env()),
            _ => self.eval_source(trimmed),
        }
    }

    fn eval_source(&mut self, source: &str) -> Reply {
        let (program, errors) = parser::parse(source);
        if !errors.is_empty() {
            let mut out = String::from("parser errors:");
            for error in &errors {
                out.push_str("\n\t");
                out.push_str(&error.to_string());
            }
            return Reply::Print(out);
        }

        let result = self.interpreter.eval(&program);
        Reply::Print(result.inspect())
    }

    fn describe_env(&self) -> String {
        let env = self.interpreter.env().borrow();
        let mut lines: Vec<String> = env
            .bindings()
            .into_iter()
            .map(|(name, value)| format!("{} = {}", name, value.inspect()))
            .collect();
        lines.extend(
            builtins::names()
                .into_iter()
                .filter(|name| !env.contains(name))
                .map(|name| format!("{} = builtin function", name)),
        );
        lines.join("\n")
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the REPL on the terminal until `:quit`, Ctrl-C or Ctrl-D
pub fn run() -> Result<()> {
    println!("Monkey REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut editor = rustyline::DefaultEditor::new().into_diagnostic()?;
    let mut session = Session::new();

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).into_diagnostic(),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str()).into_diagnostic()?;
        }

        match session.handle_line(&line) {
            Reply::Print(text) => println!("{}", text),
            Reply::Silent => {}
            Reply::Quit => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}
