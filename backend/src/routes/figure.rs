use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =========================================================
// Figure types (Plotly JSON schema subset)
// =========================================================

/// Page and plot background of the dark theme.
pub const DARK_BACKGROUND: &str = "rgb(17,17,17)";
/// Font colour of the dark theme.
pub const DARK_FOREGROUND: &str = "#f2f5fa";
/// Grid line colour of the dark theme.
pub const DARK_GRID: &str = "#283442";
pub const FONT_FAMILY: &str = "Open Sans";
pub const FONT_SIZE: u32 = 14;

/// A chart: traces plus layout, serialized the way Plotly.js expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }
}

/// One scatter series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub mode: String,
    pub name: String,
    pub x: Vec<NaiveDateTime>,
    /// Missing buckets serialize as `null` and leave a gap in the line.
    pub y: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_y: Option<ErrorBars>,
}

impl Trace {
    /// Scatter trace drawn with lines and markers.
    pub fn lines_markers(name: impl Into<String>, x: Vec<NaiveDateTime>, y: Vec<Option<f64>>) -> Self {
        Self {
            trace_type: "scatter".to_string(),
            mode: "lines+markers".to_string(),
            name: name.into(),
            x,
            y,
            error_y: None,
        }
    }

    pub fn with_error_y(mut self, error_y: ErrorBars) -> Self {
        self.error_y = Some(error_y);
        self
    }
}

/// Vertical error bars given per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBars {
    #[serde(rename = "type")]
    pub kind: String,
    /// `null` entries draw no bar.
    pub array: Vec<Option<f64>>,
    pub visible: bool,
    pub color: String,
    pub thickness: f64,
    pub width: f64,
}

impl ErrorBars {
    /// Gray bars sized by `array`.
    pub fn data(array: Vec<Option<f64>>) -> Self {
        Self {
            kind: "data".to_string(),
            array,
            visible: true,
            color: "gray".to_string(),
            thickness: 1.5,
            width: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
    pub gridcolor: String,
}

impl Axis {
    fn dark(title: &str) -> Self {
        Self {
            title: Title::new(title),
            gridcolor: DARK_GRID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub hovermode: String,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
}

impl Layout {
    /// Timestamp / temperature layout in the dashboard's dark theme.
    pub fn dark(title: impl Into<String>) -> Self {
        Self {
            title: Title::new(title),
            xaxis: Axis::dark("Timestamp"),
            yaxis: Axis::dark("Temperature (°C)"),
            hovermode: "x".to_string(),
            paper_bgcolor: DARK_BACKGROUND.to_string(),
            plot_bgcolor: DARK_BACKGROUND.to_string(),
            font: Font {
                family: FONT_FAMILY.to_string(),
                size: FONT_SIZE,
                color: DARK_FOREGROUND.to_string(),
            },
        }
    }
}
