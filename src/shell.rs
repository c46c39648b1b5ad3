// Line-oriented presentation layer driving a TaskListStore

use crate::command::{self, Command};
use crate::config::Config;
use crate::observer::{Change, Snapshot};
use crate::render::{self, Renderer};
use crate::store::TaskListStore;
use eyre::Result;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Whether the session continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Forwards parsed commands into the store and re-renders what changed
pub struct Shell {
    store: TaskListStore,
    renderer: Renderer,
    prompt: String,
    pending: Rc<RefCell<Vec<Change>>>,
    echo: bool,
}

impl Shell {
    /// Interactive session: state is re-rendered after every change
    pub fn new(config: &Config) -> Self {
        let mut store = TaskListStore::with_filter(config.default_filter);
        let pending = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&pending);
        store.subscribe(move |change: &Change, snapshot: &Snapshot| {
            debug!(revision = snapshot.revision, ?change, "shell: store changed");
            sink.borrow_mut().push(change.clone());
        });

        Self {
            store,
            renderer: Renderer::new(config.color),
            prompt: config.prompt.clone(),
            pending,
            echo: true,
        }
    }

    /// Script session: only explicit output commands and errors print
    pub fn quiet(config: &Config) -> Self {
        Self {
            echo: false,
            ..Self::new(config)
        }
    }

    pub fn store(&self) -> &TaskListStore {
        &self.store
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    /// Read commands until `quit` or end of input
    ///
    /// The prompt is only written when `interactive` is set. Bad commands and
    /// rejected indices are reported and the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, interactive: bool) -> Result<()> {
        info!(interactive, "Shell session started");

        if interactive {
            write!(out, "{}", self.prompt)?;
            out.flush()?;
        }

        for (line_num, bytes) in input.split(b'\n').enumerate() {
            let line_num = line_num + 1;
            let mut bytes = bytes?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            let flow = match String::from_utf8(bytes) {
                Ok(line) => self.execute_line(&line, line_num, out)?,
                Err(e) => {
                    warn!(line_num, error = %e, "run: skipping line that is not valid UTF-8");
                    write!(out, "{}", self.error_text(line_num, "invalid UTF-8"))?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }

            if interactive {
                write!(out, "{}", self.prompt)?;
                out.flush()?;
            }
        }

        info!(revision = self.store.revision(), "Shell session ended");
        Ok(())
    }

    /// Parse and execute one line of input
    pub fn execute_line<W: Write>(&mut self, line: &str, line_num: usize, out: &mut W) -> Result<Flow> {
        let command = match command::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                debug!(line_num, error = %e, "execute_line: parse failed");
                write!(out, "{}", self.error_text(line_num, &format!("{:#}", e)))?;
                return Ok(Flow::Continue);
            }
        };

        self.execute(command, line_num, out)
    }

    /// Execute one command against the store
    pub fn execute<W: Write>(&mut self, command: Command, line_num: usize, out: &mut W) -> Result<Flow> {
        let result = match command {
            Command::SetField(field, value) => {
                self.store.update_draft_field(field, value);
                Ok(())
            }
            Command::Submit => {
                self.store.submit_task();
                Ok(())
            }
            Command::Edit(index) => self.store.begin_edit(index),
            Command::Cancel => {
                self.store.cancel_edit();
                Ok(())
            }
            Command::SetStatus(index, status) => self.store.set_task_status(index, status),
            Command::Delete(index) => self.store.delete_task(index).map(|_| ()),
            Command::Filter(filter) => {
                self.store.set_status_filter(filter);
                Ok(())
            }
            Command::List => {
                write!(out, "{}", self.renderer.list(&self.store))?;
                Ok(())
            }
            Command::Draft => {
                write!(out, "{}", self.renderer.draft(&self.store))?;
                Ok(())
            }
            Command::Json => {
                writeln!(out, "{}", render::json(&self.store.snapshot())?)?;
                Ok(())
            }
            Command::Help => {
                writeln!(out, "{}", command::HELP)?;
                Ok(())
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        if let Err(e) = result {
            write!(out, "{}", self.error_text(line_num, &e.to_string()))?;
        }

        self.flush_changes(out)?;
        Ok(Flow::Continue)
    }

    /// Re-render whatever the queued changes touched
    fn flush_changes<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let changes: Vec<Change> = self.pending.borrow_mut().drain(..).collect();
        if !self.echo || changes.is_empty() {
            return Ok(());
        }

        if changes.iter().any(Change::touches_list) {
            write!(out, "{}", self.renderer.list(&self.store))?;
        }
        if changes.iter().any(Change::touches_draft) {
            write!(out, "{}", self.renderer.draft(&self.store))?;
        }
        Ok(())
    }

    fn error_text(&self, line_num: usize, message: &str) -> String {
        if self.echo {
            self.renderer.error(message)
        } else {
            self.renderer.error(&format!("line {}: {}", line_num, message))
        }
    }
}
