//! Command loop driving the mirror: `pwd`, `ls`, `cd`, `select`, `exit`.
//!
//! Navigation failures never end the session: they are printed and the
//! session stays where it was. Authorization failures from the remote always
//! end it, propagated to the caller as [`SessionError::Auth`].

use std::io::{BufRead, Write};

use crate::config::SessionOptions;
use crate::enumerate::enumerate;
use crate::mirror::{Mirror, NodeId, ScratchMirror};
use crate::model::Selection;
use crate::remote::{ListingClient, RemoteError};
use crate::resolve::{ResolveError, SessionContext, resolve};

mod commands;
mod input;
mod render;

pub use self::commands::{Command, CommandDef, command_defs};
pub use self::input::tokenize;

const ABORT_SELECTION: &str = "Aborting selection...";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Auth(String),

    #[error(transparent)]
    Remote(RemoteError),

    #[error(transparent)]
    Resolve(ResolveError),

    #[error("scratch mirror: {0:#}")]
    Scratch(anyhow::Error),

    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RemoteError> for SessionError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Auth(msg) => SessionError::Auth(msg),
            err => SessionError::Remote(err),
        }
    }
}

impl From<ResolveError> for SessionError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Remote(err) => err.into(),
            err => SessionError::Resolve(err),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Cancelled; nothing is selected.
    Exiting,
    Finishing { chosen: NodeId },
}

pub struct Session<C> {
    mirror: Mirror<C>,
    ctx: SessionContext,
    state: SessionState,
}

impl<C: ListingClient> Session<C> {
    /// Binds the root, populates it, and leaves the session `Running` at the root.
    pub fn start(client: C, options: &SessionOptions) -> Result<Self, SessionError> {
        let scratch = match &options.scratch_dir {
            Some(dir) => Some(ScratchMirror::create_in(dir).map_err(SessionError::Scratch)?),
            None => None,
        };
        let mut mirror = Mirror::new(client, &options.root_id, scratch);
        let root = mirror.root();
        mirror.populate(root)?;
        Ok(Self {
            mirror,
            ctx: SessionContext::at(root),
            state: SessionState::Running,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn mirror(&self) -> &Mirror<C> {
        &self.mirror
    }

    pub fn pwd(&self) -> &str {
        self.mirror.path(self.ctx.current)
    }

    /// Runs one input line. Only fatal errors are returned; everything else
    /// is reported on `out`.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<SessionState, SessionError> {
        if self.state != SessionState::Running {
            return Ok(self.state);
        }

        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(out, "error: {:#}", err)?;
                return Ok(self.state);
            }
        };
        if tokens.is_empty() {
            return Ok(self.state);
        }
        let command = match Command::parse(&tokens) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{:#}", err)?;
                return Ok(self.state);
            }
        };

        let before = self.ctx.current;
        self.dispatch(command, out)?;
        if self.ctx.current != before {
            self.ctx.previous = before;
        }
        Ok(self.state)
    }

    fn dispatch(&mut self, command: Command, out: &mut dyn Write) -> Result<(), SessionError> {
        match command {
            Command::Pwd => {
                writeln!(out, "{}", self.pwd())?;
            }
            Command::Ls { path, recursive } => {
                let target = match path.filter(|p| !p.is_empty()) {
                    None => self.ctx.current,
                    Some(path) => match resolve(&mut self.mirror, &self.ctx, &path) {
                        // A path that does not move is a failed navigation.
                        Ok(target) if target == self.ctx.current => return Ok(()),
                        Ok(target) => target,
                        Err(err) => return report(err, out),
                    },
                };
                match render::render_listing(&mut self.mirror, target, recursive, out) {
                    Ok(()) => {}
                    Err(SessionError::Remote(err)) => writeln!(out, "error: {}", err)?,
                    Err(err) => return Err(err),
                }
            }
            Command::Cd { path } => match resolve(&mut self.mirror, &self.ctx, &path) {
                Ok(target) => self.ctx.current = target,
                Err(err) => return report(err, out),
            },
            Command::Select { path } => {
                let target = match path.filter(|p| !p.is_empty()) {
                    None => self.ctx.current,
                    Some(path) => match resolve(&mut self.mirror, &self.ctx, &path) {
                        Ok(target) if target == self.ctx.current => {
                            writeln!(out, "{}", ABORT_SELECTION)?;
                            return Ok(());
                        }
                        Ok(target) => target,
                        Err(err) => {
                            report(err, out)?;
                            writeln!(out, "{}", ABORT_SELECTION)?;
                            return Ok(());
                        }
                    },
                };
                if let Err(err) = enumerate(&mut self.mirror, target) {
                    report(err.into(), out)?;
                    writeln!(out, "{}", ABORT_SELECTION)?;
                    return Ok(());
                }
                self.ctx.current = target;
                self.state = SessionState::Finishing { chosen: target };
                writeln!(out, "Selected {}", self.mirror.path(target))?;
            }
            Command::Exit => {
                self.state = SessionState::Exiting;
            }
            Command::Help => {
                for def in command_defs() {
                    writeln!(out, "  {:<28} {}", def.usage, def.help)?;
                }
            }
        }
        Ok(())
    }

    /// Reads commands until the session terminates. End of input counts as
    /// `exit`. The mirror and any scratch directory are released before this
    /// returns, whatever the outcome.
    pub fn run(
        mut self,
        mut input: impl BufRead,
        mut out: impl Write,
    ) -> Result<Option<Selection>, SessionError> {
        let mut line = String::new();
        while self.state == SessionState::Running {
            write!(out, "{} > ", self.pwd())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                self.state = SessionState::Exiting;
                break;
            }
            self.execute(line.trim_end_matches(['\n', '\r']), &mut out)?;
        }
        Ok(self.finish())
    }

    /// Extracts the selection (if one was made) and tears the mirror down.
    pub fn finish(self) -> Option<Selection> {
        let selection = match self.state {
            SessionState::Finishing { chosen } => Some(self.extract(chosen)),
            SessionState::Running | SessionState::Exiting => None,
        };
        self.mirror.close();
        selection
    }

    fn extract(&self, chosen: NodeId) -> Selection {
        let chosen_path = self.mirror.path(chosen).to_string();
        let files = self.mirror.snapshot(chosen);
        tracing::info!(path = %chosen_path, files = files.len(), "directory selected");
        Selection::new(chosen_path, files)
    }
}

/// Prints a non-fatal resolution error, or escalates a fatal one.
fn report(err: ResolveError, out: &mut dyn Write) -> Result<(), SessionError> {
    if err.is_fatal() {
        return Err(err.into());
    }
    if let ResolveError::Remote(remote) = &err {
        tracing::warn!(%remote, "listing failed during navigation");
    }
    writeln!(out, "error: {}", err)?;
    Ok(())
}

/// Full interactive session over `input`/`output`. `Ok(None)` means the user
/// left without choosing.
pub fn run_interactive_session<C: ListingClient>(
    client: C,
    options: &SessionOptions,
    input: impl BufRead,
    output: impl Write,
) -> Result<Option<Selection>, SessionError> {
    Session::start(client, options)?.run(input, output)
}

/// Resolve, enumerate and extract without a command loop.
pub fn resolve_and_snapshot<C: ListingClient>(
    client: C,
    options: &SessionOptions,
    known_path: &str,
) -> Result<Selection, SessionError> {
    let mut session = Session::start(client, options)?;
    let target = resolve(&mut session.mirror, &session.ctx, known_path)?;
    enumerate(&mut session.mirror, target)?;
    let selection = session.extract(target);
    session.mirror.close();
    Ok(selection)
}

#[cfg(test)]
#[path = "tests/session/session_tests.rs"]
mod tests;
