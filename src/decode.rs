use crate::{
    builder::{Align, DocumentBuilder, FieldKind, Part},
    wire, AssetInfo, DocMillError, DocumentInfo,
};

pub(crate) fn build_request(document: DocumentBuilder) -> Result<wire::BuildRequest, DocMillError> {
    if document.title.trim().is_empty() {
        return Err(DocMillError::Validation(
            "document title cannot be empty".to_owned(),
        ));
    }
    if document.parts.is_empty() {
        return Err(DocMillError::Validation(
            "document must contain at least one part".to_owned(),
        ));
    }

    let parts = document
        .parts
        .into_iter()
        .map(encode_part)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(wire::BuildRequest {
        title: document.title,
        parts,
    })
}

fn encode_part(part: Part) -> Result<wire::Part, DocMillError> {
    match part {
        Part::Paragraph(paragraph) => {
            if let Some(size) = paragraph.font_size {
                if !size.is_finite() || size <= 0.0 {
                    return Err(DocMillError::Validation(format!(
                        "paragraph font size '{size}' must be finite and positive"
                    )));
                }
            }
            Ok(wire::Part::Paragraph {
                text: paragraph.text,
                font_size: paragraph.font_size,
                align: paragraph.align.map(align_name),
            })
        }
        Part::Image(image) => {
            if image.asset_id.trim().is_empty() {
                return Err(DocMillError::Validation(
                    "image asset id cannot be empty".to_owned(),
                ));
            }
            if !dimension_is_valid(image.width) || !dimension_is_valid(image.height) {
                return Err(DocMillError::Validation(format!(
                    "image dimensions {}x{} must be finite and positive",
                    image.width, image.height
                )));
            }
            Ok(wire::Part::Image {
                asset_id: image.asset_id,
                width: image.width,
                height: image.height,
            })
        }
        Part::Path(path) => {
            if path.points.len() < 2 {
                return Err(DocMillError::Validation(
                    "path must contain at least two points".to_owned(),
                ));
            }
            if path
                .points
                .iter()
                .any(|(x, y)| !x.is_finite() || !y.is_finite())
            {
                return Err(DocMillError::Validation(
                    "path points must be finite".to_owned(),
                ));
            }
            if !path.stroke_width.is_finite() || path.stroke_width < 0.0 {
                return Err(DocMillError::Validation(format!(
                    "path stroke width '{}' must be finite and non-negative",
                    path.stroke_width
                )));
            }
            Ok(wire::Part::Path {
                points: path.points.into_iter().map(|(x, y)| [x, y]).collect(),
                stroke_width: path.stroke_width,
                close: path.close,
            })
        }
        Part::Field(field) => {
            if field.name.trim().is_empty() {
                return Err(DocMillError::Validation(
                    "form field name cannot be empty".to_owned(),
                ));
            }
            Ok(wire::Part::Field {
                name: field.name,
                kind: field_kind_name(field.kind),
                value: field.value,
            })
        }
    }
}

fn dimension_is_valid(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
        Align::Justify => "justify",
    }
}

fn field_kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Checkbox => "checkbox",
        FieldKind::Signature => "signature",
    }
}

pub(crate) fn decode_document(
    envelope: wire::DocumentEnvelope,
) -> Result<DocumentInfo, DocMillError> {
    let document = envelope.document;
    if document.id.trim().is_empty() {
        return Err(DocMillError::Decode(
            "document response is missing an id".to_owned(),
        ));
    }
    Ok(DocumentInfo {
        id: document.id,
        title: document.title,
        page_count: document.page_count,
        byte_size: document.byte_size,
    })
}

pub(crate) fn decode_asset(envelope: wire::AssetEnvelope) -> Result<AssetInfo, DocMillError> {
    let asset = envelope.asset;
    if asset.id.trim().is_empty() {
        return Err(DocMillError::Decode(
            "asset response is missing an id".to_owned(),
        ));
    }
    Ok(AssetInfo {
        id: asset.id,
        name: asset.name,
        byte_size: asset.byte_size,
    })
}
