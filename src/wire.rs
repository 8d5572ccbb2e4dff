use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct BuildRequest {
    pub title: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Paragraph {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        font_size: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        align: Option<&'static str>,
    },
    Image {
        asset_id: String,
        width: f64,
        height: f64,
    },
    Path {
        points: Vec<[f64; 2]>,
        stroke_width: f64,
        close: bool,
    },
    Field {
        name: String,
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct DocumentEnvelope {
    pub document: Document,
}

#[derive(Debug, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub byte_size: u64,
}

#[derive(Debug, Deserialize)]
pub struct AssetEnvelope {
    pub asset: Asset,
}

#[derive(Debug, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub byte_size: u64,
}
