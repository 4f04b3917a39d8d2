//! Executes parsed commands against a cache

use std::fmt;
use std::io::BufRead;

use anyhow::{Context, Result};
use recency::RecencyCache;
use serde::Serialize;
use tracing::debug;

use crate::script::Command;

/// Reply to one command, printed redis-cli style
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Value(String),
    Nil,
    Integer(usize),
    List(Vec<String>),
    Stats(StatsReport),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(v) => write!(f, "\"{}\"", v),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::List(items) if items.is_empty() => write!(f, "(empty list)"),
            Reply::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) \"{}\"", i + 1, item)?;
                }
                Ok(())
            }
            Reply::Stats(s) => write!(
                f,
                "len={} capacity={} hits={} misses={} inserts={} updates={} evictions={} removals={} hit_ratio={:.3}",
                s.len,
                s.capacity,
                s.hits,
                s.misses,
                s.inserts,
                s.updates,
                s.evictions,
                s.removals,
                s.hit_ratio
            ),
        }
    }
}

/// Point-in-time cache statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub capacity: usize,
    pub len: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub removals: u64,
    pub hit_ratio: f64,
}

/// Owns the cache for the length of one replay
pub struct Replayer {
    cache: RecencyCache<String, String>,
}

impl Replayer {
    pub fn new(capacity: usize) -> Result<Self> {
        let cache = RecencyCache::new(capacity).context("failed to create cache")?;
        Ok(Self { cache })
    }

    pub fn execute(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Put { key, value } => {
                self.cache.put(key, value);
                Reply::Ok
            }
            Command::Get { key } => match self.cache.get(&key) {
                Some(v) => Reply::Value(v.clone()),
                None => Reply::Nil,
            },
            Command::Peek { key } => match self.cache.peek(&key) {
                Some(v) => Reply::Value(v.clone()),
                None => Reply::Nil,
            },
            Command::Del { key } => Reply::Integer(usize::from(self.cache.remove(&key).is_some())),
            Command::Exists { key } => Reply::Integer(usize::from(self.cache.contains(&key))),
            Command::Len => Reply::Integer(self.cache.len()),
            Command::Keys => Reply::List(self.cache.iter().map(|(k, _)| k.clone()).collect()),
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
            Command::Stats => Reply::Stats(self.report()),
        }
    }

    /// Parse and execute every line of `input`, handing each reply to `emit`
    ///
    /// Stops at the first malformed line. Returns the number of commands run.
    pub fn run<R, F>(&mut self, input: R, mut emit: F) -> Result<usize>
    where
        R: BufRead,
        F: FnMut(&Reply) -> Result<()>,
    {
        let mut executed = 0;

        for (idx, line) in input.lines().enumerate() {
            let lineno = idx + 1;
            let line = line.with_context(|| format!("failed to read line {}", lineno))?;

            let cmd = match Command::parse(&line).with_context(|| format!("line {}", lineno))? {
                Some(cmd) => cmd,
                None => continue,
            };

            debug!(line = lineno, ?cmd, "executing");
            let reply = self.execute(cmd);
            emit(&reply)?;
            executed += 1;
        }

        Ok(executed)
    }

    pub fn report(&self) -> StatsReport {
        let stats = self.cache.stats();
        StatsReport {
            capacity: self.cache.capacity(),
            len: self.cache.len(),
            hits: stats.hits(),
            misses: stats.misses(),
            inserts: stats.inserts(),
            updates: stats.updates(),
            evictions: stats.evictions(),
            removals: stats.removals(),
            hit_ratio: stats.hit_ratio(),
        }
    }
}
