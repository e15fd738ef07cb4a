//! Shared plumbing for the data commands: build the session, report
//! inputs that failed, apply filter overrides.

use crate::cli::parser::{FilterArgs, SourceArgs};
use crate::config::Config;
use crate::core::{Selection, Session};
use crate::errors::AppResult;
use crate::ui::messages::{file_error, info, warning};
use crate::utils::path::{expand_all, expand_tilde};
use std::collections::BTreeSet;

/// Open a session over the given inputs. Failed inputs are printed one per
/// line (stderr); the session still holds whatever the other inputs
/// produced. `verbose` adds a one-line summary on stdout.
pub fn open_session(source: &SourceArgs, cfg: &Config, verbose: bool) -> AppResult<Session> {
    let files = expand_all(&source.files);
    let saved = source
        .saved
        .as_ref()
        .map(|p| expand_tilde(&p.to_string_lossy()));

    let session = Session::open(&files, saved.as_deref(), cfg)?;

    for failure in session.failures() {
        file_error(failure.path.display(), &failure.reason);
    }

    let ok = files.len() + usize::from(saved.is_some()) - session.failures().len();
    if verbose && ok > 0 {
        info(format!(
            "{} input(s) read, {} rows after merge",
            ok,
            session.dataset().len()
        ));
    }

    Ok(session)
}

/// Replace the default selection of every dimension the user constrained.
pub fn apply_filters(session: &mut Session, filter: &FilterArgs) {
    let facets = session.facets();
    let mut selection = session.selection().clone();

    if filter.all_contents {
        selection.contents = Selection::all(&facets).contents;
    }

    override_dimension(&mut selection.months, &filter.months, &facets.months, "month");
    override_dimension(&mut selection.staff, &filter.staff, &facets.staff, "staff id");
    override_dimension(&mut selection.branches, &filter.branches, &facets.branches, "branch");
    override_dimension(
        &mut selection.contents,
        &filter.contents,
        &facets.contents,
        "work content",
    );

    session.set_selection(selection);
}

fn override_dimension(
    selected: &mut BTreeSet<String>,
    requested: &[String],
    candidates: &[String],
    what: &str,
) {
    if requested.is_empty() {
        return;
    }

    for value in requested {
        if !candidates.contains(value) {
            warning(format!("Unknown {what} '{value}': it matches no rows."));
        }
    }

    *selected = requested.iter().cloned().collect();
}

/// True (and a warning is printed) when there is nothing to work on.
pub fn warn_if_empty(session: &Session) -> bool {
    if session.dataset().is_empty() {
        warning("No data: pass timesheet workbooks and/or --saved CSV.");
        return true;
    }
    false
}
