//! Keyed, read-only projection of pivot records for serialization collaborators.

use {
    crate::models::Pivot,
    anyhow::Result,
    itertools::Itertools,
    serde::{Deserialize, Serialize},
    strum::IntoEnumIterator,
    strum_macros::{Display, EnumIter, EnumString, IntoStaticStr},
};

/// Every field of a pivot record, in default key order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum PivotField {
    Index,
    Time,
    Price,
    Dir,
    Level,
    ComponentIndex,
    SubComponents,
    MicroComponents,
    Ratio,
    SizeRatio,
    BarRatio,
    SubPivots,
    IndicatorNames,
    IndicatorValues,
    IndicatorRatios,
}

impl PivotField {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
pub enum KeyOrder {
    #[value(alias = "asc")]
    Ascending,
    #[value(alias = "desc")]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Number(f64),
    Ratio(Option<f64>),
    Names(Vec<String>),
    Numbers(Vec<f64>),
    Ratios(Vec<Option<f64>>),
    Pivots(Vec<Pivot>),
}

impl Pivot {
    /// Typed accessor for one field.
    pub fn field(&self, field: PivotField) -> FieldValue {
        match field {
            PivotField::Index => FieldValue::Integer(self.point.index as i64),
            PivotField::Time => FieldValue::Integer(self.point.time),
            PivotField::Price => FieldValue::Number(self.point.price),
            PivotField::Dir => FieldValue::Integer(self.dir.value() as i64),
            PivotField::Level => FieldValue::Integer(self.level as i64),
            PivotField::ComponentIndex => FieldValue::Integer(self.component_index as i64),
            PivotField::SubComponents => FieldValue::Integer(self.sub_components as i64),
            PivotField::MicroComponents => FieldValue::Integer(self.micro_components as i64),
            PivotField::Ratio => FieldValue::Ratio(self.ratio),
            PivotField::SizeRatio => FieldValue::Ratio(self.size_ratio),
            PivotField::BarRatio => FieldValue::Ratio(self.bar_ratio),
            PivotField::SubPivots => FieldValue::Pivots(self.sub_pivots.clone()),
            PivotField::IndicatorNames => FieldValue::Names(self.indicator_names.clone()),
            PivotField::IndicatorValues => FieldValue::Numbers(self.indicator_values.clone()),
            PivotField::IndicatorRatios => FieldValue::Ratios(self.indicator_ratios.clone()),
        }
    }
}

/// Resolves the key list: an absent or empty allow-list means every field.
fn select_keys(keys: Option<&[PivotField]>, order: Option<KeyOrder>) -> Vec<PivotField> {
    let mut fields: Vec<PivotField> = match keys {
        Some(keys) if !keys.is_empty() => keys.iter().copied().unique().collect(),
        _ => PivotField::iter().collect(),
    };
    match order {
        Some(KeyOrder::Ascending) => fields.sort_by_key(|f| f.key()),
        Some(KeyOrder::Descending) => fields.sort_by_key(|f| std::cmp::Reverse(f.key())),
        None => {}
    }
    fields
}

pub fn project(
    pivot: &Pivot,
    keys: Option<&[PivotField]>,
    order: Option<KeyOrder>,
) -> Vec<(PivotField, FieldValue)> {
    select_keys(keys, order)
        .into_iter()
        .map(|field| (field, pivot.field(field)))
        .collect()
}

/// JSON object text with keys in projection order.
pub fn to_json(pivot: &Pivot, keys: Option<&[PivotField]>, order: Option<KeyOrder>) -> Result<String> {
    let entries = project(pivot, keys, order)
        .into_iter()
        .map(|(field, value)| {
            Ok(format!(
                "{}:{}",
                serde_json::to_string(field.key())?,
                serde_json::to_string(&value)?
            ))
        })
        .collect::<Result<Vec<String>>>()?;
    Ok(format!("{{{}}}", entries.join(",")))
}

pub fn sequence_to_json<'a>(
    pivots: impl IntoIterator<Item = &'a Pivot>,
    keys: Option<&[PivotField]>,
    order: Option<KeyOrder>,
) -> Result<String> {
    let items = pivots
        .into_iter()
        .map(|pivot| to_json(pivot, keys, order))
        .collect::<Result<Vec<String>>>()?;
    Ok(format!("[{}]", items.join(",")))
}
