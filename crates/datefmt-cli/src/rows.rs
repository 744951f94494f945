//! Output rows shared by the table and JSON renderers.

use serde::Serialize;

use datefmt_core::{
    DateFormatter, Dialect, Grammar, Layout, Parsed, ZoneSuffixKind, inspect, shape_table,
};

/// Inference outcome for one value.
///
/// A dialect that was not requested is omitted from JSON; a requested dialect
/// with no pattern serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferRow {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modern: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<Grammar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneSuffixKind>,
    /// Why no pattern exists, when inference failed outright.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

impl InferRow {
    pub fn new(input: &str, dialects: &[Dialect]) -> Self {
        let wants = |dialect| dialects.contains(&dialect);
        match inspect(input) {
            Ok(inference) => Self {
                input: input.to_string(),
                legacy: wants(Dialect::Legacy).then(|| inference.legacy().map(str::to_string)),
                modern: wants(Dialect::Modern).then(|| Some(inference.modern().to_string())),
                grammar: Some(inference.layout().grammar()),
                zone: Some(inference.zone().kind),
                rejection: None,
            },
            Err(reason) => Self {
                input: input.to_string(),
                legacy: wants(Dialect::Legacy).then_some(None),
                modern: wants(Dialect::Modern).then_some(None),
                grammar: None,
                zone: None,
                rejection: Some(reason.to_string()),
            },
        }
    }

    /// Whether every requested dialect produced a pattern.
    pub fn is_match(&self) -> bool {
        self.rejection.is_none() && !matches!(self.legacy, Some(None))
    }
}

/// Outcome of parsing one value with a bound pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseRow {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Parsed>,
    /// The calendar value in ISO form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseRow {
    pub fn new(formatter: &DateFormatter, input: &str) -> Self {
        let outcome = formatter
            .parse(input)
            .and_then(|fields| Ok((formatter.temporal(&fields)?, fields)));
        match outcome {
            Ok((value, fields)) => Self {
                input: input.to_string(),
                fields: Some(fields),
                value: Some(value.to_string()),
                error: None,
            },
            Err(error) => Self {
                input: input.to_string(),
                fields: None,
                value: None,
                error: Some(error.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// One catalogue layout with its renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeRow {
    pub index: usize,
    pub grammar: Grammar,
    pub sample: String,
    pub legacy: String,
    pub modern: String,
}

impl ShapeRow {
    /// Renders `layout` through inference on its own sample.
    pub fn from_layout(index: usize, layout: &Layout) -> Option<Self> {
        let sample = layout.sample();
        let inference = inspect(&sample).ok()?;
        Some(Self {
            index,
            grammar: layout.grammar(),
            legacy: inference.legacy()?.to_string(),
            modern: inference.modern().to_string(),
            sample,
        })
    }
}

/// Rows for the whole catalogue, in catalogue order.
pub fn shape_rows() -> Vec<ShapeRow> {
    shape_table()
        .layouts()
        .iter()
        .enumerate()
        .filter_map(|(index, layout)| ShapeRow::from_layout(index + 1, layout))
        .collect()
}
