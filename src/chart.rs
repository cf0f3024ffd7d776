use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
    Line,
    Scatter,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Histogram,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
        }
    }

    /// The axis controls this kind shows, in display order.
    pub fn axis_controls(self) -> &'static [AxisControl] {
        const XY: [AxisControl; 2] = [
            AxisControl { role: AxisRole::X, label: "X-Axis" },
            AxisControl { role: AxisRole::Y, label: "Y-Axis" },
        ];
        const PIE: [AxisControl; 2] = [
            AxisControl { role: AxisRole::Label, label: "Labels" },
            AxisControl { role: AxisRole::Value, label: "Values" },
        ];
        const HISTOGRAM: [AxisControl; 1] = [AxisControl {
            role: AxisRole::Data,
            label: "Data Column",
        }];

        match self {
            ChartKind::Bar | ChartKind::Line | ChartKind::Scatter => &XY,
            ChartKind::Pie => &PIE,
            ChartKind::Histogram => &HISTOGRAM,
        }
    }

    pub fn roles(self) -> impl Iterator<Item = AxisRole> {
        self.axis_controls().iter().map(|c| c.role)
    }

    pub fn uses_role(self, role: AxisRole) -> bool {
        self.roles().any(|r| r == role)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        ChartKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::UnsupportedKind(s.to_string()))
    }
}

/// A named slot a chart kind needs filled with a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisRole {
    X,
    Y,
    Label,
    Value,
    Data,
}

impl AxisRole {
    pub fn name(self) -> &'static str {
        match self {
            AxisRole::X => "x",
            AxisRole::Y => "y",
            AxisRole::Label => "label",
            AxisRole::Value => "value",
            AxisRole::Data => "data",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            AxisRole::X,
            AxisRole::Y,
            AxisRole::Label,
            AxisRole::Value,
            AxisRole::Data,
        ]
        .into_iter()
        .find(|r| r.name() == name)
    }
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One visible axis selector: which role it fills and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisControl {
    pub role: AxisRole,
    pub label: &'static str,
}

/// Column chosen for each axis role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisSelection {
    pub x: Option<String>,
    pub y: Option<String>,
    pub label: Option<String>,
    pub value: Option<String>,
    pub data: Option<String>,
}

impl AxisSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xy(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new().with(AxisRole::X, x).with(AxisRole::Y, y)
    }

    pub fn pie(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new()
            .with(AxisRole::Label, label)
            .with(AxisRole::Value, value)
    }

    pub fn histogram(data: impl Into<String>) -> Self {
        Self::new().with(AxisRole::Data, data)
    }

    pub fn with(mut self, role: AxisRole, column: impl Into<String>) -> Self {
        self.set(role, column);
        self
    }

    pub fn set(&mut self, role: AxisRole, column: impl Into<String>) {
        *self.slot_mut(role) = Some(column.into());
    }

    pub fn get(&self, role: AxisRole) -> Option<&str> {
        match role {
            AxisRole::X => self.x.as_deref(),
            AxisRole::Y => self.y.as_deref(),
            AxisRole::Label => self.label.as_deref(),
            AxisRole::Value => self.value.as_deref(),
            AxisRole::Data => self.data.as_deref(),
        }
    }

    /// Column for `role`, or `MissingAxis` when nothing is selected.
    pub fn column(&self, role: AxisRole) -> Result<&str> {
        self.get(role).ok_or(ChartError::MissingAxis(role))
    }

    fn slot_mut(&mut self, role: AxisRole) -> &mut Option<String> {
        match role {
            AxisRole::X => &mut self.x,
            AxisRole::Y => &mut self.y,
            AxisRole::Label => &mut self.label,
            AxisRole::Value => &mut self.value,
            AxisRole::Data => &mut self.data,
        }
    }
}
