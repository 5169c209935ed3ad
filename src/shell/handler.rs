use super::Reply;
use crate::list::{ListError, SharedListStore};
use crate::metrics::{Metrics, Timer};
use crate::protocol::InlineParser;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

/// Why a shell command could not be carried out.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("wrong number of arguments for '{0}' command")]
    WrongArity(&'static str),
    #[error("value is not an integer or out of range")]
    NotAnInteger,
    #[error("key is not valid UTF-8")]
    InvalidKey,
    #[error(transparent)]
    List(#[from] ListError),
}

impl CommandError {
    /// Label used when recording error metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::WrongArity(_) => "wrong_arity",
            CommandError::NotAnInteger => "not_an_integer",
            CommandError::InvalidKey => "invalid_key",
            CommandError::List(e) => e.kind(),
        }
    }
}

type CommandResult = Result<Reply, CommandError>;

/// Dispatches shell commands onto a shared list store.
///
/// Several handlers may share one store; each command runs as a single
/// store call and is therefore atomic for its key.
pub struct Handler {
    store: Arc<SharedListStore>,
}

impl Handler {
    pub fn new(store: Arc<SharedListStore>) -> Self {
        Self { store }
    }

    /// Parse and execute one command line. Returns `None` for a blank line.
    pub fn handle_line(&self, line: &str) -> Option<Reply> {
        match InlineParser::parse(line) {
            Ok(args) if args.is_empty() => None,
            Ok(args) => Some(self.handle_command(&args)),
            Err(e) => {
                warn!("Protocol error: {}", e);
                Metrics::get().record_error("protocol_error", None);
                Some(Reply::Error(format!("ERR Protocol error: {}", e)))
            }
        }
    }

    /// Dispatch a tokenized command to the matching list operation.
    pub fn handle_command(&self, parts: &[Bytes]) -> Reply {
        let metrics = Metrics::get();

        let Some((name, args)) = parts.split_first() else {
            metrics.record_error("invalid_command_format", None);
            return Reply::Error("ERR empty command".to_string());
        };
        let command = String::from_utf8_lossy(name).to_ascii_lowercase();
        debug!(command = %command, args = args.len(), "dispatching command");

        let timer = Timer::new();
        let result = match command.as_str() {
            "ping" => self.handle_ping(args),
            "rpush" => self.handle_push(args, false),
            "lpush" => self.handle_push(args, true),
            "lpop" => self.handle_pop(args, true),
            "rpop" => self.handle_pop(args, false),
            "lpeek" => self.handle_peek(args, true),
            "rpeek" => self.handle_peek(args, false),
            "llen" => self.handle_llen(args),
            "lrange" => self.handle_lrange(args),
            "lindex" => self.handle_lindex(args),
            "lrem" => self.handle_lrem(args),
            "lset" => self.handle_lset(args),
            "ltrim" => self.handle_ltrim(args),
            "exists" => self.handle_exists(args),
            "del" => self.handle_del(args),
            "dbsize" => Ok(Reply::Integer(self.store.keys_count() as i64)),
            "flushdb" => {
                self.store.flush();
                Ok(Reply::ok())
            }
            _ => {
                metrics.record_error("unknown_command", Some(command.as_str()));
                return Reply::Error(format!("ERR unknown command '{}'", command));
            }
        };

        metrics.record_command(&command, timer.elapsed_seconds());

        match result {
            Ok(reply) => reply,
            Err(e) => {
                metrics.record_error(e.kind(), Some(command.as_str()));
                Reply::Error(format!("ERR {}", e))
            }
        }
    }

    fn handle_ping(&self, args: &[Bytes]) -> CommandResult {
        match args {
            [] => Ok(Reply::Status("PONG".to_string())),
            [message] => Ok(Reply::Bulk(Some(message.clone()))),
            _ => Err(CommandError::WrongArity("ping")),
        }
    }

    fn handle_push(&self, args: &[Bytes], head: bool) -> CommandResult {
        let Some((key, items)) = args.split_first().filter(|(_, items)| !items.is_empty()) else {
            return Err(CommandError::WrongArity(if head { "lpush" } else { "rpush" }));
        };
        let key = key_str(key)?;

        let pushed = items.len();
        let items = items.iter().cloned();
        let len = if head {
            self.store.lpush(key, items)
        } else {
            self.store.rpush(key, items)
        };

        Metrics::get().record_pushed(pushed as u64);
        Ok(Reply::Integer(len as i64))
    }

    fn handle_pop(&self, args: &[Bytes], head: bool) -> CommandResult {
        let [key] = args else {
            return Err(CommandError::WrongArity(if head { "lpop" } else { "rpop" }));
        };
        let key = key_str(key)?;

        let result = if head {
            self.store.lpop(key)
        } else {
            self.store.rpop(key)
        };

        match result {
            Ok(item) => {
                Metrics::get().record_removed(1);
                Ok(Reply::Bulk(Some(item)))
            }
            Err(ListError::NotFound(_) | ListError::Empty(_)) => Ok(Reply::Bulk(None)),
            Err(e) => Err(e.into()),
        }
    }

    fn handle_peek(&self, args: &[Bytes], head: bool) -> CommandResult {
        let [key] = args else {
            return Err(CommandError::WrongArity(if head { "lpeek" } else { "rpeek" }));
        };
        let key = key_str(key)?;

        let result = if head {
            self.store.lpeek(key)
        } else {
            self.store.rpeek(key)
        };

        match result {
            Ok(item) => Ok(Reply::Bulk(Some(item))),
            Err(ListError::NotFound(_) | ListError::Empty(_)) => Ok(Reply::Bulk(None)),
            Err(e) => Err(e.into()),
        }
    }

    fn handle_llen(&self, args: &[Bytes]) -> CommandResult {
        let [key] = args else {
            return Err(CommandError::WrongArity("llen"));
        };

        let len = self.store.size(key_str(key)?)?;
        Ok(Reply::Integer(len as i64))
    }

    fn handle_lrange(&self, args: &[Bytes]) -> CommandResult {
        let [key, start, end] = args else {
            return Err(CommandError::WrongArity("lrange"));
        };

        let items = self.store.lrange(key_str(key)?, int_arg(start)?, int_arg(end)?)?;
        Ok(Reply::Array(items))
    }

    fn handle_lindex(&self, args: &[Bytes]) -> CommandResult {
        let [key, index] = args else {
            return Err(CommandError::WrongArity("lindex"));
        };

        match self.store.lindex(key_str(key)?, int_arg(index)?) {
            Ok(item) => Ok(Reply::Bulk(Some(item))),
            Err(ListError::OutOfRange { .. }) => Ok(Reply::Bulk(None)),
            Err(e) => Err(e.into()),
        }
    }

    fn handle_lrem(&self, args: &[Bytes]) -> CommandResult {
        let [key, count, value] = args else {
            return Err(CommandError::WrongArity("lrem"));
        };

        let removed = self.store.lrem(key_str(key)?, int_arg(count)?, value)?;
        Metrics::get().record_removed(removed as u64);
        Ok(Reply::Integer(removed as i64))
    }

    fn handle_lset(&self, args: &[Bytes]) -> CommandResult {
        let [key, index, value] = args else {
            return Err(CommandError::WrongArity("lset"));
        };

        self.store.lset(key_str(key)?, int_arg(index)?, value.clone())?;
        Ok(Reply::ok())
    }

    fn handle_ltrim(&self, args: &[Bytes]) -> CommandResult {
        let [key, start, end] = args else {
            return Err(CommandError::WrongArity("ltrim"));
        };

        let dropped = self.store.ltrim(key_str(key)?, int_arg(start)?, int_arg(end)?)?;
        Metrics::get().record_removed(dropped as u64);
        Ok(Reply::ok())
    }

    fn handle_exists(&self, args: &[Bytes]) -> CommandResult {
        if args.is_empty() {
            return Err(CommandError::WrongArity("exists"));
        }

        let mut exists_count = 0;
        for arg in args {
            match key_str(arg) {
                Ok(key) if self.store.exists(key) => exists_count += 1,
                Ok(_) => {}
                Err(_) => warn!("Invalid key in EXISTS command"),
            }
        }

        Ok(Reply::Integer(exists_count))
    }

    fn handle_del(&self, args: &[Bytes]) -> CommandResult {
        if args.is_empty() {
            return Err(CommandError::WrongArity("del"));
        }

        let mut deleted_count = 0;
        for arg in args {
            match key_str(arg) {
                Ok(key) if self.store.delete(key) => deleted_count += 1,
                Ok(_) => {}
                Err(_) => warn!("Invalid key in DEL command"),
            }
        }

        Ok(Reply::Integer(deleted_count))
    }
}

fn key_str(arg: &Bytes) -> Result<&str, CommandError> {
    std::str::from_utf8(arg).map_err(|_| CommandError::InvalidKey)
}

fn int_arg(arg: &Bytes) -> Result<i64, CommandError> {
    std::str::from_utf8(arg)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(CommandError::NotAnInteger)
}
