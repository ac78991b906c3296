//! Path resolution: format suffix, output-mode suffix, route.

use crate::format::Format;
use crate::projection::OutputMode;
use crate::routing::router::Route;

/// Everything a request path selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub route: Route,
    pub mode: OutputMode,
    pub format: Format,
}

/// Resolve a raw request path.
///
/// A trailing `.json`, `.yaml` or `.xml` selects the format, otherwise
/// `default_format` applies. A trailing `/list` or `/state` on what
/// remains selects the output mode. Returns `None` when the rest matches
/// no route.
pub fn resolve(path: &str, default_format: Format) -> Option<ResolvedPath> {
    let (path, format) = split_format(path, default_format);
    let (path, mode) = split_mode(path);
    let route = Route::match_path(path)?;
    Some(ResolvedPath { route, mode, format })
}

fn split_format(path: &str, default_format: Format) -> (&str, Format) {
    Format::ALL
        .into_iter()
        .find_map(|format| {
            path.strip_suffix(format.extension())
                .and_then(|rest| rest.strip_suffix('.'))
                .map(|rest| (rest, format))
        })
        .unwrap_or((path, default_format))
}

fn split_mode(path: &str) -> (&str, OutputMode) {
    if let Some(rest) = path.strip_suffix("/list") {
        (rest, OutputMode::List)
    } else if let Some(rest) = path.strip_suffix("/state") {
        (rest, OutputMode::State)
    } else {
        (path, OutputMode::Full)
    }
}
