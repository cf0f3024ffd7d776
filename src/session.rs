// Interactive state: the loaded dataset, the chosen chart kind and axes,
// and the chart currently on screen.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chart::{AxisControl, AxisRole, AxisSelection, ChartKind};
use crate::csv_reader;
use crate::data::Dataset;
use crate::error::{ChartError, Result};
use crate::parser::ChartRequest;
use crate::series::{build_series, Series};

/// Handle for one in-flight load; only the newest ticket may install its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct ChartSession {
    dataset: Option<Arc<Dataset>>,
    latest_ticket: u64,
    kind: ChartKind,
    selection: AxisSelection,
    current: Option<Series>,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load. Any load started earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        LoadTicket(self.latest_ticket)
    }

    /// Finish the load identified by `ticket`.
    ///
    /// Returns `Ok(true)` when the dataset was installed and `Ok(false)` when
    /// the ticket is stale and the result was discarded. A parse error leaves
    /// the current dataset untouched.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Dataset>) -> Result<bool> {
        if ticket.0 != self.latest_ticket {
            warn!(ticket = ticket.0, latest = self.latest_ticket, "ignoring stale load");
            return Ok(false);
        }
        let dataset = result?;
        info!(rows = dataset.len(), columns = dataset.headers().len(), "dataset loaded");
        self.selection = default_selection(dataset.headers());
        self.dataset = Some(Arc::new(dataset));
        Ok(true)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let ticket = self.begin_load();
        self.complete_load(ticket, csv_reader::read_csv_file(path))
            .map(|_| ())
    }

    pub fn load_stdin(&mut self) -> Result<()> {
        let ticket = self.begin_load();
        self.complete_load(ticket, csv_reader::read_csv_from_stdin())
            .map(|_| ())
    }

    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let ticket = self.begin_load();
        self.complete_load(ticket, csv_reader::read_csv_str(content))
            .map(|_| ())
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    /// The loaded dataset, or `EmptyData` when nothing with rows is loaded.
    pub fn require_data(&self) -> Result<&Arc<Dataset>> {
        match &self.dataset {
            Some(d) if !d.is_empty() => Ok(d),
            _ => Err(ChartError::EmptyData),
        }
    }

    /// Column names offered to the axis selectors.
    pub fn headers(&self) -> &[String] {
        self.dataset.as_deref().map(Dataset::headers).unwrap_or(&[])
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Switch chart kind and return the axis controls to show for it.
    pub fn set_kind(&mut self, kind: ChartKind) -> &'static [AxisControl] {
        debug!(%kind, "chart kind changed");
        self.kind = kind;
        kind.axis_controls()
    }

    pub fn selection(&self) -> &AxisSelection {
        &self.selection
    }

    /// Choose the column for one axis role. Only loaded columns are accepted.
    pub fn select(&mut self, role: AxisRole, column: &str) -> Result<()> {
        let dataset = self.dataset.as_ref().ok_or(ChartError::EmptyData)?;
        if !dataset.has_column(column) {
            return Err(ChartError::UnknownColumn(column.to_string()));
        }
        self.selection.set(role, column);
        Ok(())
    }

    /// Apply a parsed chart expression: its kind, then each axis it names.
    pub fn apply_request(&mut self, request: &ChartRequest) -> Result<()> {
        self.set_kind(request.kind);
        for role in request.kind.roles() {
            if let Some(column) = request.selection.get(role) {
                self.select(role, column)?;
            }
        }
        Ok(())
    }

    /// Build the chart for the current kind and selection, replacing the
    /// previous chart.
    pub fn generate(&mut self) -> Result<&Series> {
        let dataset = Arc::clone(self.require_data()?);

        let series = build_series(&dataset, self.kind, &self.selection)?;
        debug!(kind = %self.kind, points = series.len(), "chart generated");
        Ok(self.current.insert(series))
    }

    /// The chart produced by the last successful [`generate`](Self::generate).
    pub fn current_chart(&self) -> Option<&Series> {
        self.current.as_ref()
    }
}

/// First column on the primary selector, second (or first) on the secondary.
fn default_selection(headers: &[String]) -> AxisSelection {
    let Some(primary) = headers.first() else {
        return AxisSelection::new();
    };
    let secondary = headers.get(1).unwrap_or(primary);
    AxisSelection::new()
        .with(AxisRole::X, primary.as_str())
        .with(AxisRole::Label, primary.as_str())
        .with(AxisRole::Data, primary.as_str())
        .with(AxisRole::Y, secondary.as_str())
        .with(AxisRole::Value, secondary.as_str())
}
