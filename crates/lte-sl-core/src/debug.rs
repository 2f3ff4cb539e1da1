use core::fmt;
use std::fs::OpenOptions;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::{FmtContext, layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

#[macro_export]
macro_rules! unimplemented_log {
    ( $($arg:tt)* ) => {{
        tracing::warn!(
            "unimplemented: {}",
            format_args!($($arg)*),
        );
    }};
}

/// if `cond` is false, logs a warning with your message.
#[macro_export]
macro_rules! assert_warn {
    ($cond:expr, $($arg:tt)+) => {{
        if !$cond {
            tracing::warn!(
                target: module_path!(),
                "assertion warning: `{}` failed: {} at {}:{}",
                stringify!($cond),
                format_args!($($arg)+),
                file!(),
                line!(),
            );
        }
    }};
}

/// Column where the message starts
const MESSAGE_COLUMN: usize = 56;

/// One line per event: level, short target and line, then the message in a
/// fixed column. Messages leaving or entering an entity ("-> ", "<- ") start
/// three columns earlier so the primitive names line up with plain messages.
struct AlignedFormatter {
    ansi: bool,
}

/// "lte_sl_entities::pool::comm_pool" -> "entities::pool::comm_pool"
fn short_target(target: &str) -> &str {
    target.strip_prefix("lte_sl_").unwrap_or(target)
}

fn level_color(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::ERROR => "\x1b[31m",
        tracing::Level::WARN => "\x1b[33m",
        tracing::Level::INFO => "\x1b[32m",
        tracing::Level::DEBUG => "\x1b[34m",
        tracing::Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for AlignedFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: format::Writer<'_>, event: &tracing::Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();
        let prefix = format!("{:<5} {}:{}", level, short_target(meta.target()), meta.line().unwrap_or(0));

        let mut message = String::new();
        ctx.field_format().format_fields(format::Writer::new(&mut message), event)?;

        let mut width = MESSAGE_COLUMN;
        if message.starts_with("->") || message.starts_with("<-") {
            width -= 3;
        }

        if self.ansi {
            // Escape codes take no columns, pad the visible part only
            let pad = width.saturating_sub(prefix.len());
            write!(writer, "{}{:<5}\x1b[0m{} {:pad$}{}", level_color(level), level, &prefix[5..], "", message, pad = pad)?;
        } else {
            write!(writer, "{:<width$} {}", prefix, message, width = width)?;
        }
        writeln!(writer)
    }
}

static INIT_LOG: Once = Once::new();

fn directive(d: &str) -> tracing_subscriber::filter::Directive {
    // Only called with the static strings below
    d.parse().unwrap_or_else(|e| panic!("invalid log directive {}: {}", d, e))
}

/// Trace level on stdout. For tests; later calls are no-ops.
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Info level on stdout with the control plane at debug, plus an optional
/// debug level log file. The returned guard must outlive all logging to the file.
pub fn setup_logging_default(verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let logfile = verbose_logfile.map(|file| (file, EnvFilter::new("debug")));
    setup_logging(default_stdout_filter(), logfile)
}

pub fn default_stdout_filter() -> EnvFilter {
    EnvFilter::new("info")
        // Per-primitive routing
        .add_directive(directive("lte_sl_entities::messagerouter=warn"))
        // Pool derivation is verbose, keep the summary lines
        .add_directive(directive("lte_sl_entities::pool=info"))
        .add_directive(directive("lte_sl_entities::nas=debug"))
        .add_directive(directive("lte_sl_entities::controller=debug"))
}

fn stdout_layer<S>(filter: EnvFilter) -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    layer().event_format(AlignedFormatter { ansi: true }).with_filter(filter)
}

fn setup_logging(stdout_filter: EnvFilter, logfile: Option<(String, EnvFilter)>) -> Option<WorkerGuard> {
    let Some((path, file_filter)) = logfile else {
        INIT_LOG.call_once(|| tracing_subscriber::registry().with(stdout_layer(stdout_filter)).init());
        return None;
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .unwrap_or_else(|e| panic!("Failed to open log file {}: {}", path, e));
    let (file_writer, guard) = tracing_appender::non_blocking(file);
    let file_layer = layer()
        .event_format(AlignedFormatter { ansi: false })
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(file_filter);

    INIT_LOG.call_once(|| tracing_subscriber::registry().with(file_layer).with(stdout_layer(stdout_filter)).init());
    Some(guard)
}
