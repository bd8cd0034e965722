//! Catalog records as served by the plant API, and the normalized selection derived from them.

use serde::Deserialize;

/// Storefront used when a plant carries no purchase link of its own.
pub const DEFAULT_STOREFRONT_URL: &str = "https://smartstore.naver.com/namu_dw";
/// Thumbnail shown for plants without an embedded image.
pub const PLACEHOLDER_THUMBNAIL: &str = "plant/placeholder.png";
pub const UNNAMED_PLANT: &str = "이름 없는 식물";

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// One entry of the catalog API. Loosely typed to match what the server actually sends.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlantRecord {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Size class code: `B`, `M` or `S`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_label: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub size: Option<String>,
    /// Won. Integers, floats and numeric strings are accepted; anything else reads as no price.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "truthy_flag")]
    pub is_sold_out: Option<bool>,
    /// Bare base64 PNG or a full data URI.
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub results: Vec<PlantRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SizeClass {
    /// Raw code from the record, when present.
    pub code: Option<String>,
    pub label: String,
}

impl SizeClass {
    fn from_record(record: &PlantRecord) -> Self {
        let code = record
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let label = non_empty(record.status_label.as_deref())
            .map(str::to_owned)
            .or_else(|| code.as_deref().and_then(label_for_code).map(str::to_owned))
            .unwrap_or_else(|| "중형".to_owned());
        Self { code, label }
    }
}

/// Display label for a size class code.
pub fn label_for_code(code: &str) -> Option<&'static str> {
    match code {
        "B" => Some("대형"),
        "M" => Some("중형"),
        "S" => Some("소형"),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum Thumbnail {
    DataUri(String),
    Placeholder(String),
}

impl Thumbnail {
    pub fn src(&self) -> &str {
        match self {
            Thumbnail::DataUri(s) | Thumbnail::Placeholder(s) => s,
        }
    }
}

/// A catalog entry ready for display and placement.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SelectedPlant {
    pub id: String,
    pub name: String,
    pub size_class: SizeClass,
    /// Height with a `cm` suffix, or empty when unknown.
    pub size_cm: String,
    pub price: Option<i64>,
    pub purchase_url: String,
    pub sold_out: bool,
    pub thumbnail: Thumbnail,
}

impl SelectedPlant {
    pub fn from_record(record: &PlantRecord, storefront_url: &str, placeholder: &str) -> Self {
        let thumbnail = match non_empty(record.image_base64.as_deref()) {
            Some(b64) if b64.starts_with("data:") => Thumbnail::DataUri(b64.to_owned()),
            Some(b64) => Thumbnail::DataUri(format!("{PNG_DATA_URI_PREFIX}{b64}")),
            None => Thumbnail::Placeholder(placeholder.to_owned()),
        };
        Self {
            id: record.id.clone(),
            name: non_empty(record.name.as_deref())
                .unwrap_or(UNNAMED_PLANT)
                .to_owned(),
            size_class: SizeClass::from_record(record),
            size_cm: size_with_unit(record.size.as_deref()),
            price: record.price,
            purchase_url: resolve_purchase_url(record.link.as_deref(), storefront_url),
            sold_out: record.is_sold_out.unwrap_or(false),
            thumbnail,
        }
    }

    /// `"name · label · 120cm"`, dropping the height when unknown.
    pub fn display_label(&self) -> String {
        if self.size_cm.is_empty() {
            format!("{} · {}", self.name, self.size_class.label)
        } else {
            format!("{} · {} · {}", self.name, self.size_class.label, self.size_cm)
        }
    }

    /// Price chip text such as `"35,000원"`; `None` when the plant has no price.
    pub fn price_text(&self) -> Option<String> {
        self.price.map(|p| format!("{}원", group_thousands(p)))
    }
}

/// Normalize all records, keeping server order.
pub fn normalize_records(
    records: &[PlantRecord],
    storefront_url: &str,
    placeholder: &str,
) -> Vec<SelectedPlant> {
    records
        .iter()
        .map(|r| SelectedPlant::from_record(r, storefront_url, placeholder))
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SizeFilter {
    #[default]
    All,
    /// Match on the display label, e.g. `대형`.
    Class(String),
}

impl SizeFilter {
    /// `ALL` (any case) or empty selects everything; anything else is a label, or a
    /// `B`/`M`/`S` code translated to its label.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        let label = label_for_code(&raw.to_ascii_uppercase()).unwrap_or(raw);
        Self::Class(label.to_owned())
    }

    pub fn matches(&self, plant: &SelectedPlant) -> bool {
        match self {
            SizeFilter::All => true,
            SizeFilter::Class(label) => plant.size_class.label == *label,
        }
    }
}

pub fn filter_plants<'a>(plants: &'a [SelectedPlant], filter: &SizeFilter) -> Vec<&'a SelectedPlant> {
    plants.iter().filter(|p| filter.matches(p)).collect()
}

fn size_with_unit(raw: Option<&str>) -> String {
    let Some(raw) = non_empty(raw) else {
        return String::new();
    };
    if raw.to_lowercase().ends_with("cm") {
        raw.to_owned()
    } else {
        format!("{raw}cm")
    }
}

fn resolve_purchase_url(link: Option<&str>, storefront_url: &str) -> String {
    let storefront = non_empty(Some(storefront_url)).unwrap_or(DEFAULT_STOREFRONT_URL);
    match non_empty(link) {
        None => storefront.to_owned(),
        Some(l) if l.starts_with("http://") || l.starts_with("https://") => l.to_owned(),
        Some(l) => format!(
            "{}/{}",
            storefront.trim_end_matches('/'),
            l.trim_start_matches('/')
        ),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn scalar_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    opt_scalar_string(de)?.ok_or_else(|| serde::de::Error::custom("expected a string or number"))
}

fn opt_scalar_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a string or number, got {other}"
            )));
        }
    })
}

fn lenient_price<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    let number = match &value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(f64::round).and_then(whole_won)),
        serde_json::Value::String(s) => {
            let s = s.trim().replace(',', "");
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(f64::round).and_then(whole_won))
        }
        _ => None,
    };
    Ok(number)
}

fn whole_won(v: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; stay strictly inside the range.
    (v.is_finite() && v.abs() < 9.0e18).then_some(v as i64)
}

/// Boolean-ish scalar: numbers are true unless zero, strings unless empty, `"0"` or `"false"`.
fn truthy_flag<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(de)? {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            Some(!(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")))
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Some(true),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
