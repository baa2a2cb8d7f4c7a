//! Stream drivers connecting the codecs to a [`WindowedGraph`].
//!
//! Records are handled strictly one at a time: each accepted record's output
//! line is written and flushed before the next record is read.

use anyhow::{Context, Result};
use bytes::BytesMut;
use serde::Serialize;
use std::io::{BufRead, ErrorKind, Write};
use tracing::{debug, info, warn};

use tagdegree_codec::{binary, format_record, parse_line, BinaryReader, TextLine, TweetFilter};
use tagdegree_core::{GraphStats, ProcessorConfig, Record, WindowedGraph};

/// Record format read by [`run_degree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputFormat {
    /// `timestamp,node1,node2,...` lines
    #[default]
    Text,
    /// Big-endian binary frames
    Binary,
    /// Raw tweet JSON, one object per line
    Tweets,
}

/// Record format written by [`run_clean`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CleanFormat {
    #[default]
    Text,
    Binary,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub format: InputFormat,
    pub config: ProcessorConfig,
    /// Decimal places in each output line.
    pub precision: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            format: InputFormat::Text,
            config: ProcessorConfig::default(),
            precision: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Average-degree lines written, one per accepted record.
    pub lines_written: u64,
    /// Input lines or frames dropped before reaching the graph.
    pub skipped: u64,
    pub stats: GraphStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub records: u64,
    pub dropped: u64,
    pub tags: usize,
}

struct DegreeSink<W> {
    graph: WindowedGraph,
    output: W,
    precision: usize,
    lines_written: u64,
    skipped: u64,
}

impl<W: Write> DegreeSink<W> {
    fn accept(&mut self, record: &Record) -> Result<()> {
        if let Some(avg) = self.graph.process(record) {
            writeln!(self.output, "{:.*}", self.precision, avg)?;
            self.output.flush()?;
            self.lines_written += 1;
        }
        Ok(())
    }

    fn echo(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()?;
        Ok(())
    }

    fn skip(&mut self, error: &dyn std::fmt::Display) {
        warn!(%error, "skipping input");
        self.skipped += 1;
    }

    fn finish(self) -> RunSummary {
        RunSummary {
            lines_written: self.lines_written,
            skipped: self.skipped,
            stats: self.graph.stats(),
        }
    }
}

/// Read records from `input` and write the average degree after every
/// accepted record to `output`.
pub fn run_degree<R, W>(input: R, output: W, options: &RunOptions) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    let graph = WindowedGraph::new(options.config).context("invalid processor configuration")?;
    info!(
        window = options.config.window,
        format = ?options.format,
        "processing records"
    );

    let mut sink = DegreeSink {
        graph,
        output,
        precision: options.precision,
        lines_written: 0,
        skipped: 0,
    };

    match options.format {
        InputFormat::Text => {
            for_each_line(input, |line| match parse_line(line) {
                Ok(TextLine::Record(record)) => sink.accept(&record),
                Ok(TextLine::Debug(text)) => sink.echo(&text),
                Ok(TextLine::Comment) | Ok(TextLine::Blank) => Ok(()),
                Err(e) => {
                    sink.skip(&e);
                    Ok(())
                }
            })?;
        }
        InputFormat::Binary => {
            for item in BinaryReader::new(input) {
                match item {
                    Ok(record) => sink.accept(&record)?,
                    Err(e) => sink.skip(&e),
                }
            }
        }
        InputFormat::Tweets => {
            let mut filter = TweetFilter::new();
            for_each_line(input, |line| match filter.filter_line(line) {
                Some(record) => sink.accept(&record),
                None => Ok(()),
            })?;
            sink.skipped += filter.dropped();
        }
    }

    let summary = sink.finish();
    info!(
        lines = summary.lines_written,
        skipped = summary.skipped,
        discarded = summary.stats.discarded,
        "input exhausted"
    );
    Ok(summary)
}

/// Filter raw tweets into records and write them in `format`.
pub fn run_clean<R, W>(input: R, mut output: W, format: CleanFormat) -> Result<CleanSummary>
where
    R: BufRead,
    W: Write,
{
    let mut filter = TweetFilter::new();
    let mut frame = BytesMut::new();
    let mut records = 0u64;

    for_each_line(input, |line| {
        let Some(record) = filter.filter_line(line) else {
            return Ok(());
        };
        match format {
            CleanFormat::Text => writeln!(output, "{}", format_record(&record))?,
            CleanFormat::Binary => {
                frame.clear();
                if let Err(e) = binary::encode(&record, &mut frame) {
                    warn!(error = %e, "cannot encode record");
                    return Ok(());
                }
                output.write_all(&frame)?;
            }
        }
        output.flush()?;
        records += 1;
        Ok(())
    })?;

    let summary = CleanSummary {
        records,
        dropped: filter.dropped(),
        tags: filter.tags().len(),
    };
    debug!(?summary, "clean finished");
    Ok(summary)
}

/// Feed every line of `input` to `f`, skipping lines that are not valid UTF-8.
fn for_each_line<R, F>(mut input: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str) -> Result<()>,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = match input.read_until(b'\n', &mut buf) {
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("failed to read input"),
        };
        if read == 0 {
            return Ok(());
        }
        match std::str::from_utf8(&buf) {
            Ok(line) => f(line)?,
            Err(e) => warn!(error = %e, "skipping line that is not UTF-8"),
        }
    }
}
