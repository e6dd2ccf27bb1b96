use crate::applet::Applet;
use anyhow::Error as Anyhow;
use clap::Parser;
use std::io::stderr;
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// A chess rules engine.
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level of the diagnostics written to the standard error.
    #[clap(short, long, default_value_t = Level::WARN)]
    verbosity: Level,

    /// Whether diagnostics should include spans closing, with their timings.
    #[clap(long)]
    timings: bool,

    #[clap(subcommand)]
    applet: Option<Applet>,
}

impl Cli {
    fn subscribe(&self) {
        let filter = Targets::new()
            .with_target("cli", self.verbosity)
            .with_target("lib", self.verbosity);

        let spans = match self.timings {
            true => FmtSpan::CLOSE,
            false => FmtSpan::NONE,
        };

        let writer = layer()
            .pretty()
            .with_span_events(spans)
            .with_writer(stderr);

        registry().with(filter).with(writer).init();
    }

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        self.subscribe();
        self.applet.unwrap_or_default().execute()
    }
}
